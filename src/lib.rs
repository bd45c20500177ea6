pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod store;
pub mod streak;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use config::{Config, open_store};
pub use state::AppState;
