use crate::config::Config;
use crate::session::Session;
use crate::sources::StatsClient;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub client: StatsClient,
    pub session: Arc<Mutex<Session>>,
    pub refresh_gate: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: Config, client: StatsClient) -> Self {
        Self {
            config,
            client,
            session: Arc::new(Mutex::new(Session::default())),
            refresh_gate: Arc::new(Mutex::new(())),
        }
    }
}
