use std::env;
use std::time::Duration;

pub const DEFAULT_SHOW_DAYS: i64 = 7;

const DEFAULT_STATS_API_BASE: &str = "https://catsbutton.herokuapp.com/api";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub stats_api_base: String,
    pub default_user: Option<u64>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);
        let stats_api_base =
            env::var("STATS_API_BASE").unwrap_or_else(|_| DEFAULT_STATS_API_BASE.to_string());
        let default_user = env::var("DASHBOARD_USER")
            .ok()
            .and_then(|value| value.parse::<u64>().ok());
        let timeout_secs = env::var("STATS_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(10);

        Self {
            port,
            stats_api_base,
            default_user,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}
