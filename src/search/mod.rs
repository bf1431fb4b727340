//! Voter Search Module
//!
//! Answers free-text lookups against the read-only voter register.
//!
//! ## Overview
//! A lookup is a single SQL pass over the `voters` table: every row that contains
//! the term in one of seven text fields qualifies, optionally restricted to one
//! ward, and is ordered by a weighted relevance score (ties broken by English name).
//! A second statement with the same filter counts all matches for pagination.
//!
//! ## Submodules
//! - **`ranking`**: The scoring rules and the SQL generated from them.
//! - **`engine`**: `VoterDirectory`, the pooled read-only executor of those statements.
//! - **`handlers`**: Axum handlers for `GET /search` and `GET /wards`.
//! - **`types`**: Records, request normalization and response DTOs.

pub mod engine;
pub mod handlers;
pub mod ranking;
pub mod types;
