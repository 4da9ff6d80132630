//! Core of the container list screen.
//!
//! Derives the owned and shared container views from the loaded listings,
//! a search term and a sort order, and decides when those views recompute.

pub mod config;
pub mod controller;
pub mod loader;
pub mod logging;
pub mod model;
pub mod view;

pub use config::{ConfigError, ControllerConfig, SearchCommitPolicy};
pub use controller::{ContainerListController, ContainerViews, LoadState, Trigger};
pub use loader::{
    cancel_pair, decode_payload, ingest_payload, load_containers, payload_from_response,
    CancelSignal, ContainerSource, JsonFileSource, LoadCanceller, LoadError, LoadResult,
    StaticSource,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::container::{
    parse_timestamp, Collection, ContainerPayload, ContainerRecord, ContainerValidationError,
};
pub use model::query::{QueryState, SortOrder};
pub use view::engine::{compute_view, filter_records, sort_records};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
