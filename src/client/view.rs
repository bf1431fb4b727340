//! Search View State
//!
//! The client-side state of a search screen, kept free of I/O. Inputs arrive as
//! method calls (or [`ViewEvent`]s) stamped with the current time; whenever the
//! view decides a fetch should start it hands back a [`FetchRequest`], and the
//! caller reports the outcome through [`SearchView::complete`].
//!
//! ## Rules
//! - Typing schedules a fresh page-1 search after 400ms without further input.
//! - Submitting searches immediately and cancels the pending debounce.
//! - "Load more" asks for the next page and appends to what is already shown.
//! - Only one fetch may be in flight; anything requested meanwhile is dropped.
//! - A blank query resets everything.

use super::debounce::Debouncer;
use super::highlight::Highlighter;
use crate::search::types::{SearchResponse, VoterRecord, DEFAULT_LIMIT};

use anyhow::Result;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Fresh search: results replace the current list.
    Replace,
    /// Next page: results are appended.
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub query: String,
    pub ward: Option<String>,
    pub page: i64,
    pub limit: i64,
    pub mode: FetchMode,
}

/// User input fed into a [`SearchView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    QueryChanged(String),
    SetWard(Option<String>),
    Submit,
    LoadMore,
}

#[derive(Debug)]
pub struct SearchView {
    query: String,
    ward: Option<String>,
    limit: i64,
    page: i64,
    results: Vec<VoterRecord>,
    total: i64,
    has_more: bool,
    is_searching: bool,
    is_loading_more: bool,
    in_flight: bool,
    debounce: Debouncer,
}

impl SearchView {
    pub fn new(limit: i64) -> Self {
        Self::with_debouncer(limit, Debouncer::default())
    }

    pub fn with_debouncer(limit: i64, debounce: Debouncer) -> Self {
        Self {
            query: String::new(),
            ward: None,
            limit: limit.max(1),
            page: 1,
            results: Vec::new(),
            total: 0,
            has_more: false,
            is_searching: false,
            is_loading_more: false,
            in_flight: false,
            debounce,
        }
    }

    /// Applies one input event, returning the fetch to start, if any.
    pub fn handle(&mut self, event: ViewEvent, now: Instant) -> Option<FetchRequest> {
        match event {
            ViewEvent::QueryChanged(text) => {
                self.set_query(text, now);
                None
            }
            ViewEvent::SetWard(ward) => {
                self.set_ward(ward, now);
                None
            }
            ViewEvent::Submit => self.submit(),
            ViewEvent::LoadMore => self.load_more(),
        }
    }

    /// Replaces the query text. Returns `false` if the text did not change.
    pub fn set_query(&mut self, text: impl Into<String>, now: Instant) -> bool {
        let text = text.into();
        if text == self.query {
            return false;
        }
        self.query = text;

        if self.query.trim().is_empty() {
            self.debounce.cancel();
            self.reset();
        } else {
            self.debounce.schedule(now);
        }
        true
    }

    /// Sets or clears the ward filter; a non-blank query is searched again after the debounce.
    pub fn set_ward(&mut self, ward: Option<String>, now: Instant) {
        let ward = ward
            .map(|ward| ward.trim().to_string())
            .filter(|ward| !ward.is_empty());
        if ward == self.ward {
            return;
        }
        self.ward = ward;

        if !self.query.trim().is_empty() {
            self.debounce.schedule(now);
        }
    }

    /// Fires the debounced search once its deadline has passed.
    pub fn poll_debounce(&mut self, now: Instant) -> Option<FetchRequest> {
        if self.debounce.fire(now) {
            self.begin(1, FetchMode::Replace)
        } else {
            None
        }
    }

    /// Immediate fresh search, bypassing the debounce.
    pub fn submit(&mut self) -> Option<FetchRequest> {
        let request = self.begin(1, FetchMode::Replace)?;
        self.debounce.cancel();
        Some(request)
    }

    pub fn load_more(&mut self) -> Option<FetchRequest> {
        if !self.can_load_more() {
            tracing::debug!("Load more ignored (has_more={}, in_flight={})", self.has_more, self.in_flight);
            return None;
        }
        self.begin(self.page + 1, FetchMode::Append)
    }

    fn begin(&mut self, page: i64, mode: FetchMode) -> Option<FetchRequest> {
        if self.query.trim().is_empty() {
            return None;
        }
        if self.in_flight {
            tracing::debug!("Dropping {:?} request for page {}: fetch in flight", mode, page);
            return None;
        }

        self.in_flight = true;
        match mode {
            FetchMode::Replace => self.is_searching = true,
            FetchMode::Append => self.is_loading_more = true,
        }

        Some(FetchRequest {
            query: self.query.clone(),
            ward: self.ward.clone(),
            page,
            limit: self.limit,
            mode,
        })
    }

    /// Records the outcome of the fetch started by `request`.
    pub fn complete(&mut self, request: &FetchRequest, outcome: Result<SearchResponse>) {
        self.in_flight = false;
        self.is_searching = false;
        self.is_loading_more = false;

        if self.query.trim().is_empty() {
            tracing::debug!("Discarding results for '{}': query cleared", request.query);
            return;
        }

        match (request.mode, outcome) {
            (FetchMode::Replace, Ok(response)) => {
                self.results = response.results;
                self.total = response.total;
                self.page = response.page;
                self.has_more = response.has_more;
            }
            (FetchMode::Append, Ok(response)) => {
                self.results.extend(response.results);
                self.total = response.total;
                self.page = response.page;
                self.has_more = response.has_more;
            }
            (FetchMode::Replace, Err(e)) => {
                tracing::warn!("Search for '{}' failed: {:#}", request.query, e);
                self.results.clear();
                self.total = 0;
                self.has_more = false;
            }
            (FetchMode::Append, Err(e)) => {
                tracing::warn!(
                    "Loading page {} for '{}' failed: {:#}",
                    request.page,
                    request.query,
                    e
                );
            }
        }
    }

    fn reset(&mut self) {
        self.results.clear();
        self.total = 0;
        self.page = 1;
        self.has_more = false;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn ward(&self) -> Option<&str> {
        self.ward.as_deref()
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn results(&self) -> &[VoterRecord] {
        &self.results
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn can_submit(&self) -> bool {
        !self.is_searching && !self.query.trim().is_empty()
    }

    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.in_flight
    }

    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    pub fn highlighter(&self) -> Highlighter {
        Highlighter::new(&self.query)
    }
}

impl Default for SearchView {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}
