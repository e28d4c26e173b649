//! Research Intelligence: Case File Analysis Terminal
//!
//! A themed terminal dashboard over a small fixed set of research
//! "case file" records: a case list, a derived alignment chart, and a
//! scripted line-oriented analysis console.
//!
//! All data is compiled in. There is no server, no persistence, and no
//! network protocol; every "analysis" command returns pre-written text
//! keyed by its exact command name.
//!
//! # Architecture
//!
//! - `data` - Case records and the compiled-in registry
//! - `analysis` - Score aggregation over the registry
//! - `console` - The scripted command console state machine
//! - `tui` - Terminal user interface with ratatui

pub mod analysis;
pub mod console;
pub mod data;
pub mod tui;

pub use data::CaseFile;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the application
pub type Result<T> = anyhow::Result<T>;

/// Custom error types
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("case registry is empty")]
    EmptyRegistry,

    #[error("document unavailable: {0}")]
    DocumentUnavailable(String),
}
