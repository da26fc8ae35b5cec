// Library crate for the squash bot
// This file exposes the public API for integration tests

pub mod app;
pub mod config;
pub mod core;
pub mod match_tracker;
pub mod notify;
pub mod scheduled;
pub mod sessions;
pub mod shared;
pub mod storage;
pub mod timetable;

pub use app::{build_registry, build_state, router};
pub use config::Settings;
pub use shared::{AppError, AppState};
