//! Account and order API for the BuhPro marketplace.
//!
//! Four account roles (user, customer, coach, executor) share one
//! registration/login/refresh flow; orders are plain CRUD behind the
//! bearer-token gate.

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod orders;

pub use app::{build_router, AppState};
pub use config::{AppConfig, ConfigError, StorageBackend};
