use super::engine::VoterDirectory;
use super::types::{ErrorResponse, Pagination, SearchFilter, SearchParams, SearchResponse};
use crate::wards::{Ward, WARDS};

use axum::extract::Query;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use std::sync::Arc;

pub const SEARCH_FAILED: &str = "Failed to search voters";

pub async fn handle_search(
    Query(pairs): Query<Vec<(String, String)>>,
    Extension(directory): Extension<Arc<VoterDirectory>>,
) -> Response {
    let params = SearchParams::from_pairs(pairs);
    let filter = SearchFilter::new(
        params.q.as_deref().unwrap_or_default(),
        params.ward.as_deref().unwrap_or_default(),
    );
    let pagination = Pagination::from_params(params.page.as_deref(), params.limit.as_deref());

    if filter.is_empty() {
        return no_store((StatusCode::OK, Json(SearchResponse::empty(pagination))));
    }

    match directory.lookup(&filter, pagination).await {
        Ok(response) => no_store((StatusCode::OK, Json(response))),
        Err(e) => {
            tracing::error!("Search API error for '{}': {:#}", filter.term, e);
            no_store((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: SEARCH_FAILED.to_string(),
                }),
            ))
        }
    }
}

pub async fn handle_wards() -> Json<&'static [Ward]> {
    Json(WARDS)
}

fn no_store(response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
