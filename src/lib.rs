// Library entry so integration tests can reference internal modules.
// Re-exports the same modules used by the binary (`main.rs`).
pub mod commands;
pub mod config;
pub mod constants;
pub mod database;
pub mod flow;
pub mod format;
pub mod handler;
pub mod interactions;
pub mod model;
pub mod report;
pub mod ui;

pub use model::AppState;
