pub mod app;
pub mod axes;
pub mod catalog;
pub mod chart;
pub mod color;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod session;
pub mod sources;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use sources::StatsClient;
pub use state::AppState;
