use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// One row of the voter register.
///
/// Field names match the `voters` table columns and the JSON keys served by `/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VoterRecord {
    pub id: i64,
    pub serial: i64,

    pub name_en: String,
    pub name_ml: String,

    pub guardian_en: String,
    pub guardian_ml: String,

    pub house_no: String,
    pub house_name_en: String,
    pub house_name_ml: String,

    pub gender: String,
    pub age: i64,

    pub voter_id: String,

    pub ward: String,
    pub ward_name: String,

    pub polling_station: String,
    pub district: String,
    pub local_body: String,
}

/// A matched record together with the relevance score it was ordered by.
///
/// Only lives between the database and the response; `/search` never serializes it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScoredVoter {
    #[sqlx(flatten)]
    pub record: VoterRecord,
    pub score: i64,
}

/// Raw query string of `GET /search`.
///
/// Numbers are kept as text so that malformed values fall back to defaults
/// instead of failing extraction.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub q: Option<String>,
    pub ward: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl SearchParams {
    /// Collects decoded query pairs. A repeated key keeps its first value; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "q" => &mut params.q,
                "ward" => &mut params.ward,
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// Normalized search term and ward restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub term: String,
    pub ward: String,
}

impl SearchFilter {
    pub fn new(term: &str, ward: &str) -> Self {
        Self {
            term: term.trim().to_string(),
            ward: ward.trim().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }
}

/// Clamped page/limit pair and the row offset it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Parses raw query values, treating anything unparsable as absent.
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page.and_then(parse_int).unwrap_or(DEFAULT_PAGE);
        let limit = limit.and_then(parse_int).unwrap_or(DEFAULT_LIMIT);
        Self::new(page, limit)
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
    pub results: Vec<VoterRecord>,
}

impl SearchResponse {
    pub fn empty(pagination: Pagination) -> Self {
        Self {
            page: pagination.page,
            limit: pagination.limit,
            total: 0,
            has_more: false,
            results: Vec::new(),
        }
    }

    pub fn from_window(pagination: Pagination, total: i64, results: Vec<VoterRecord>) -> Self {
        let returned = results.len() as i64;
        Self {
            page: pagination.page,
            limit: pagination.limit,
            total,
            has_more: pagination.offset().saturating_add(returned) < total,
            results,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
