use super::view::FetchRequest;
use super::SearchBackend;
use crate::search::types::{ErrorResponse, SearchResponse};
use crate::ENDPOINT_SEARCH;

use anyhow::{Context, Result};

/// Calls `GET /search` on a running lookup node.
#[derive(Debug, Clone)]
pub struct HttpSearchBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSearchBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn search(&self, request: &FetchRequest) -> Result<SearchResponse> {
        let url = format!("{}{}", self.base_url, ENDPOINT_SEARCH);

        let mut params = vec![
            ("q", request.query.clone()),
            ("page", request.page.to_string()),
            ("limit", request.limit.to_string()),
        ];
        if let Some(ward) = &request.ward {
            params.push(("ward", ward.clone()));
        }

        let resp = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .with_context(|| format!("search request to {} failed", self.base_url))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "invalid json".to_string());
            return Err(anyhow::anyhow!("search returned {}: {}", status, message));
        }

        resp.json::<SearchResponse>()
            .await
            .context("failed to decode search response")
    }
}

impl SearchBackend for HttpSearchBackend {
    async fn fetch(&self, request: &FetchRequest) -> Result<SearchResponse> {
        self.search(request).await
    }
}

/// Adds a scheme when missing and strips trailing slashes.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();

    let normalized = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    normalized.trim_end_matches('/').to_string()
}
