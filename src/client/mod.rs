//! Search Client Module
//!
//! Everything the interactive front end needs apart from drawing.
//!
//! ## Submodules
//! - **`view`**: `SearchView`, the I/O-free screen state (debounced query, paging, in-flight guard).
//! - **`debounce`**: The cancellable delayed action behind the 400ms typing quiescence.
//! - **`driver`**: Async event loop binding a view to a backend.
//! - **`http`**: `SearchBackend` over `GET /search` using reqwest.
//! - **`highlight`**: Case-insensitive match segmentation for display fields.

pub mod debounce;
pub mod driver;
pub mod highlight;
pub mod http;
pub mod view;


use crate::search::types::SearchResponse;
use anyhow::Result;
use std::future::Future;
use view::FetchRequest;

/// Source of search pages for a [`view::SearchView`].
pub trait SearchBackend: Send + Sync + 'static {
    fn fetch(&self, request: &FetchRequest)
        -> impl Future<Output = Result<SearchResponse>> + Send;
}
