use crate::models::DateRange;
use crate::normalize::date_key;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BasicTypeDecl {
    #[serde(default)]
    pub type_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub axis_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BasicEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub type_id: String,
    #[serde(default)]
    pub estimation: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BasicPayload {
    #[serde(default)]
    pub statement_types: Vec<BasicTypeDecl>,
    #[serde(default)]
    pub user_statments: BTreeMap<String, Vec<BasicEntry>>,
}

impl BasicPayload {
    pub fn is_empty(&self) -> bool {
        self.statement_types.is_empty() && self.user_statments.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub estimation: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomPayload {
    #[serde(default)]
    pub costume_statements_names: Vec<String>,
    #[serde(default)]
    pub user_costume_statments: BTreeMap<String, Vec<CustomEntry>>,
}

impl CustomPayload {
    pub fn is_empty(&self) -> bool {
        self.costume_statements_names.is_empty() && self.user_costume_statments.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BinaryEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub answer: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BinaryPayload {
    #[serde(default)]
    pub binary_answer_names: Vec<String>,
    #[serde(default)]
    pub binary_answer: BTreeMap<String, Vec<BinaryEntry>>,
}

impl BinaryPayload {
    pub fn is_empty(&self) -> bool {
        self.binary_answer_names.is_empty() && self.binary_answer.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteEntry {
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotesPayload {
    #[serde(default)]
    pub notes: BTreeMap<String, Vec<NoteEntry>>,
}

impl NotesPayload {
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct SourceBundle {
    pub basic: BasicPayload,
    pub custom: CustomPayload,
    pub binary: BinaryPayload,
    pub notes: NotesPayload,
}

#[derive(Debug)]
pub struct FetchError {
    pub source: &'static str,
    pub error: reqwest::Error,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fetching {}: {}", self.source, self.error)
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[derive(Debug, Clone)]
pub struct StatsClient {
    http: reqwest::Client,
    base: String,
}

impl StatsClient {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    // All four sources must answer before normalization starts; the first
    // failure fails the whole refresh so a partial chart is never shown.
    pub async fn fetch_all(&self, user: u64, range: &DateRange) -> Result<SourceBundle, FetchError> {
        let (basic, custom, binary, notes) = tokio::try_join!(
            self.fetch::<BasicPayload>("statements", user, range),
            self.fetch::<CustomPayload>("costume-statements", user, range),
            self.fetch::<BinaryPayload>("binary-answers", user, range),
            self.fetch::<NotesPayload>("dairy-notes", user, range),
        )?;
        Ok(SourceBundle {
            basic,
            custom,
            binary,
            notes,
        })
    }

    async fn fetch<T>(&self, path: &'static str, user: u64, range: &DateRange) -> Result<T, FetchError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}/{}", self.base, path, user);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("date_from", date_key(range.from)),
                ("date_to", date_key(range.to)),
            ])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| FetchError { source: path, error })?;

        response
            .json::<T>()
            .await
            .map_err(|error| FetchError { source: path, error })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_a_valid_no_data_body() {
        let basic: BasicPayload = serde_json::from_str("{}").unwrap();
        let custom: CustomPayload = serde_json::from_str("{}").unwrap();
        let binary: BinaryPayload = serde_json::from_str("{}").unwrap();
        let notes: NotesPayload = serde_json::from_str("{}").unwrap();
        assert!(basic.is_empty());
        assert!(custom.is_empty());
        assert!(binary.is_empty());
        assert!(notes.is_empty());
    }

    #[test]
    fn basic_payload_round_trips_the_wire_shape() {
        let payload: BasicPayload = serde_json::from_value(serde_json::json!({
            "statement_types": [
                {"type_id": "1", "name": "Mood", "color": "#ff6b4a"},
                {"type_id": "2", "name": "Sleep", "visible": false}
            ],
            "user_statments": {
                "2024-01-01": [{"name": "Mood", "type_id": "1", "estimation": 7}]
            }
        }))
        .unwrap();

        assert!(!payload.is_empty());
        assert_eq!(payload.statement_types.len(), 2);
        assert_eq!(payload.statement_types[0].color.as_deref(), Some("#ff6b4a"));
        assert_eq!(payload.statement_types[1].visible, Some(false));
        assert_eq!(payload.user_statments["2024-01-01"][0].estimation, 7.0);
    }

    #[test]
    fn unknown_wire_fields_are_ignored() {
        let payload: BinaryPayload = serde_json::from_value(serde_json::json!({
            "binary_answer_names": ["Stress"],
            "binary_answer": {
                "2024-02-01": [{"name": "Stress", "type_id": 4, "answer": true}]
            }
        }))
        .unwrap();

        assert_eq!(payload.binary_answer["2024-02-01"][0].name, "Stress");
        assert!(payload.binary_answer["2024-02-01"][0].answer);
    }
}
