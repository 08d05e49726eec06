pub mod app_state;
pub mod config;
pub mod constants;

pub use app_state::AppState;
pub use config::{Cli, Configuration, StoreMode};
