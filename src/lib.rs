//! Voter Lookup Library
//!
//! Core modules of the voter lookup service. The server binary (`main.rs`) and the
//! terminal client (`ui/`) are thin shells around this crate.
//!
//! ## Modules
//! - **`search`**: The ranking query engine over the read-only SQLite register and the
//!   HTTP handlers exposing it.
//! - **`client`**: The client-side search view: debounced input, single in-flight fetch,
//!   "load more" pagination and match highlighting.
//! - **`wards`**: Static ward code reference data.
//! - **`config`**: Command-line/environment configuration and logging setup.

pub mod client;
pub mod config;
pub mod search;
pub mod wards;

#[cfg(test)]
mod test_support;

use axum::routing::get;
use axum::{Extension, Router};
use search::engine::VoterDirectory;
use search::handlers::{handle_search, handle_wards};
use std::sync::Arc;

pub const ENDPOINT_SEARCH: &str = "/search";
pub const ENDPOINT_WARDS: &str = "/wards";

/// HTTP routes served by the lookup node.
pub fn router(directory: Arc<VoterDirectory>) -> Router {
    Router::new()
        .route(ENDPOINT_SEARCH, get(handle_search))
        .route(ENDPOINT_WARDS, get(handle_wards))
        .layer(Extension(directory))
}
