use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::time::sleep;

const DATA_USER: u64 = 7;
const EMPTY_USER: u64 = 8;
const FAILING_USER: u64 = 9;

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[cfg(unix)]
mod cleanup {
    use std::sync::Mutex;
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PIDS: Mutex<Vec<i32>> = Mutex::new(Vec::new());

    pub fn register(pid: u32) {
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
        PIDS.lock().unwrap().push(pid as i32);
    }

    extern "C" fn on_exit() {
        for pid in PIDS.lock().unwrap().iter() {
            if *pid > 0 {
                unsafe {
                    libc::kill(*pid, libc::SIGTERM);
                }
            }
        }
    }
}

async fn stub_statements(Path(user): Path<u64>) -> Response {
    match user {
        DATA_USER => Json(json!({
            "statement_types": [
                {"type_id": "1", "name": "Mood", "color": "#ff6b4a"},
                {"type_id": "2", "name": "Sleep"}
            ],
            "user_statments": {
                "2024-03-01": [{"name": "Mood", "type_id": "1", "estimation": 7}],
                "2024-03-03": [{"name": "Mood", "type_id": "1", "estimation": 5}]
            }
        }))
        .into_response(),
        FAILING_USER => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => Json(json!({})).into_response(),
    }
}

async fn stub_custom(Path(user): Path<u64>) -> Json<Value> {
    match user {
        DATA_USER => Json(json!({
            "costume_statements_names": ["Focus Time"],
            "user_costume_statments": {
                "2024-03-02": [{"name": "Focus Time", "costume_state_id": 3, "estimation": 4}]
            }
        })),
        _ => Json(json!({})),
    }
}

async fn stub_binary(Path(user): Path<u64>) -> Json<Value> {
    match user {
        DATA_USER | FAILING_USER => Json(json!({
            "binary_answer_names": ["Stress"],
            "binary_answer": {
                "2024-03-01": [{"name": "Stress", "type_id": 4, "answer": true}],
                "2024-03-02": [{"name": "Stress", "type_id": 4, "answer": false}]
            }
        })),
        _ => Json(json!({})),
    }
}

async fn stub_notes(Path(user): Path<u64>) -> Json<Value> {
    match user {
        DATA_USER => Json(json!({
            "notes": {
                "2024-03-05": [{"note": "a"}, {"note": "b"}]
            }
        })),
        _ => Json(json!({})),
    }
}

fn stub_router() -> Router {
    Router::new()
        .route("/api/statements/:user", get(stub_statements))
        .route("/api/costume-statements/:user", get(stub_custom))
        .route("/api/binary-answers/:user", get(stub_binary))
        .route("/api/dairy-notes/:user", get(stub_notes))
}

static STUB_PORT: Lazy<u16> = Lazy::new(|| {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub port");
    let port = listener.local_addr().unwrap().port();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("stub runtime");
        runtime.block_on(async move {
            listener.set_nonblocking(true).unwrap();
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, stub_router()).await.unwrap();
        });
    });
    port
});

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/chart")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let stub_port = *STUB_PORT;
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_diary_dashboard"))
        .env("PORT", port.to_string())
        .env("STATS_API_BASE", format!("http://127.0.0.1:{stub_port}/api"))
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn refresh(client: &Client, server: &TestServer, body: Value) -> reqwest::Response {
    client
        .post(format!("{}/api/refresh", server.base_url))
        .json(&body)
        .send()
        .await
        .unwrap()
}

fn refresh_body(user: u64) -> Value {
    json!({ "user": user, "date_from": "2024-03-01", "date_to": "2024-03-07" })
}

fn type_ids(payload: &Value) -> Vec<&str> {
    payload["types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn http_refresh_builds_full_chart_payload() {
    let server = spawn_server().await;
    let client = Client::new();

    let response = refresh(&client, &server, refresh_body(DATA_USER)).await;
    assert!(response.status().is_success());
    let payload: Value = response.json().await.unwrap();

    let ids = type_ids(&payload);
    assert_eq!(ids, ["basic_1", "custom_focus-time", "binary_stress", "note"]);
    assert!(payload["types"]
        .as_array()
        .unwrap()
        .iter()
        .all(|t| t["selected"].as_bool().unwrap()));

    let mood = &payload["types"][0];
    assert_eq!(mood["color"], "#ff6b4a");
    assert_eq!(mood["axis"], "y");

    let axes = payload["axes"]["axes"].as_array().unwrap();
    let axis_ids: Vec<&str> = axes.iter().map(|a| a["id"].as_str().unwrap()).collect();
    assert_eq!(axis_ids, ["y", "binary:stress", "notes"]);
    assert_eq!(axes[0]["weight"], 10);
    assert_eq!(axes[1]["weight"], 1);
    assert_eq!(axes[1]["labels"], json!(["yes", "no"]));

    let chart = &payload["chart"];
    assert_eq!(chart["labels"].as_array().unwrap().len(), 7);
    assert_eq!(chart["labels"][0], "2024-03-01");
    assert_eq!(chart["labels"][6], "2024-03-07");

    let series = chart["series"].as_array().unwrap();
    assert_eq!(series.len(), 4);
    let stress = series.iter().find(|s| s["type_id"] == "binary_stress").unwrap();
    assert_eq!(stress["show_line"], false);
    let values: Vec<f64> = stress["points"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["value"].as_f64().unwrap())
        .collect();
    assert_eq!(values, [1.0, 0.0]);

    assert!(payload["message"].is_null());
}

#[tokio::test]
async fn http_selection_persists_across_refetch() {
    let server = spawn_server().await;
    let client = Client::new();

    refresh(&client, &server, refresh_body(DATA_USER)).await;

    let narrowed: Value = client
        .post(format!("{}/api/selection", server.base_url))
        .json(&json!({ "type_ids": ["basic_1"] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(narrowed["chart"]["series"].as_array().unwrap().len(), 1);

    let response = refresh(
        &client,
        &server,
        json!({ "user": DATA_USER, "date_from": "2024-03-01", "date_to": "2024-03-03" }),
    )
    .await;
    let payload: Value = response.json().await.unwrap();

    for entry in payload["types"].as_array().unwrap() {
        let expected = entry["id"] == "basic_1";
        assert_eq!(entry["selected"].as_bool().unwrap(), expected);
    }
    assert_eq!(payload["chart"]["series"].as_array().unwrap().len(), 1);
    assert_eq!(payload["chart"]["labels"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn http_empty_sources_yield_no_data_message() {
    let server = spawn_server().await;
    let client = Client::new();

    let response = refresh(&client, &server, refresh_body(EMPTY_USER)).await;
    assert!(response.status().is_success());
    let payload: Value = response.json().await.unwrap();

    assert!(payload["chart"].is_null());
    assert!(payload["types"].as_array().unwrap().is_empty());
    assert_eq!(payload["message"], "no statistics in the selected period");
}

#[tokio::test]
async fn http_failing_source_fails_the_whole_refresh() {
    let server = spawn_server().await;
    let client = Client::new();

    let response = refresh(&client, &server, refresh_body(FAILING_USER)).await;
    assert_eq!(response.status().as_u16(), 502);
    assert_eq!(response.text().await.unwrap(), "failed to load statistics");

    // The failed refresh must not leave partial data behind.
    let payload: Value = client
        .get(format!("{}/api/chart", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(payload["chart"].is_null());
    assert!(payload["types"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn http_preconditions_block_the_fetch() {
    let server = spawn_server().await;
    let client = Client::new();

    let response = refresh(&client, &server, json!({ "user": DATA_USER })).await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(response.text().await.unwrap(), "select both dates");

    let response = refresh(
        &client,
        &server,
        json!({ "date_from": "2024-03-01", "date_to": "2024-03-07" }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(response.text().await.unwrap(), "user not found");

    let response = refresh(
        &client,
        &server,
        json!({ "user": DATA_USER, "date_from": "2024-03-07", "date_to": "2024-03-01" }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(response.text().await.unwrap(), "date range is inverted");
}

#[tokio::test]
async fn http_point_and_day_notes_round_trip() {
    let server = spawn_server().await;
    let client = Client::new();

    let payload: Value = refresh(&client, &server, refresh_body(DATA_USER))
        .await
        .json()
        .await
        .unwrap();
    let series = payload["chart"]["series"].as_array().unwrap();
    let note_index = series.iter().position(|s| s["type_id"] == "note").unwrap();

    let result: Value = client
        .post(format!("{}/api/point", server.base_url))
        .json(&json!({ "series": note_index, "point": 0 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(result["date"], "2024-03-05");
    assert_eq!(result["notes"], json!(["a", "b"]));

    let out_of_range: Value = client
        .post(format!("{}/api/point", server.base_url))
        .json(&json!({ "series": note_index, "point": 99 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(out_of_range["date"].is_null());
    assert_eq!(out_of_range["notes"], json!([]));

    let miss: Value = client
        .get(format!("{}/api/notes/2024-03-04", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(miss["date"], "2024-03-04");
    assert_eq!(miss["notes"], json!([]));
}
