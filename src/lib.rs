// Library root for the GitHub organization statistics web app

pub mod api;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod github;
pub mod utils;

pub use crate::config::environment::EnvironmentVariables;
pub use crate::config::state::AppState;
pub use crate::core::server::create_app;
pub use crate::error::AppError;
