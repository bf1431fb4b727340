use super::ranking::{MatchOptions, QueryPlan, Slot};
use super::types::{Pagination, ScoredVoter, SearchFilter, SearchResponse, VoterRecord};

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Arguments, Sqlite};
use std::path::Path;

/// Read-only access to the voter register.
///
/// Holds the connection pool and the two generated statements. sqlx keeps each
/// statement prepared per pooled connection; lookups never write and may run
/// concurrently.
pub struct VoterDirectory {
    pool: SqlitePool,
    options: MatchOptions,
    search_plan: QueryPlan,
    count_plan: QueryPlan,
}

/// Values for one execution of a generated statement.
struct Binds<'a> {
    prefix: String,
    contains: String,
    ward: &'a str,
    limit: i64,
    offset: i64,
}

impl<'a> Binds<'a> {
    /// Lays the values out in the order the plan's placeholders expect.
    fn arguments(&self, plan: &QueryPlan) -> Result<SqliteArguments<'a>> {
        let mut args = SqliteArguments::default();
        for slot in &plan.slots {
            let added = match slot {
                Slot::Prefix => args.add(self.prefix.clone()),
                Slot::Contains => args.add(self.contains.clone()),
                Slot::Ward => args.add(self.ward),
                Slot::Limit => args.add(self.limit),
                Slot::Offset => args.add(self.offset),
            };
            added.map_err(|e| anyhow::anyhow!("failed to bind {:?}: {}", slot, e))?;
        }
        Ok(args)
    }
}

impl VoterDirectory {
    /// Opens the dataset file read-only. Never creates it.
    pub async fn open(path: &Path, max_connections: u32, options: MatchOptions) -> Result<Self> {
        let connect = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let max_connections = max_connections.max(1);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect)
            .await
            .with_context(|| format!("failed to open voter dataset {}", path.display()))?;

        tracing::info!(
            "Opened voter dataset {} ({} connections, literal wildcards: {})",
            path.display(),
            max_connections,
            options.literal_wildcards
        );

        Ok(Self::from_pool(pool, options))
    }

    pub fn from_pool(pool: SqlitePool, options: MatchOptions) -> Self {
        Self {
            pool,
            options,
            search_plan: options.search_plan(),
            count_plan: options.count_plan(),
        }
    }

    /// Number of rows matching `filter`, ignoring any window.
    pub async fn count(&self, filter: &SearchFilter) -> Result<i64> {
        let args = self
            .binds(filter, Pagination::default())
            .arguments(&self.count_plan)?;

        sqlx::query_scalar_with::<Sqlite, i64, _>(&self.count_plan.sql, args)
            .fetch_one(&self.pool)
            .await
            .context("count query failed")
    }

    /// One window of matches, best score first, with scores attached.
    pub async fn search_scored(
        &self,
        filter: &SearchFilter,
        pagination: Pagination,
    ) -> Result<Vec<ScoredVoter>> {
        let args = self.binds(filter, pagination).arguments(&self.search_plan)?;

        sqlx::query_as_with::<Sqlite, ScoredVoter, _>(&self.search_plan.sql, args)
            .fetch_all(&self.pool)
            .await
            .context("search query failed")
    }

    /// Same as [`search_scored`](Self::search_scored) with the scores dropped.
    pub async fn search(
        &self,
        filter: &SearchFilter,
        pagination: Pagination,
    ) -> Result<Vec<VoterRecord>> {
        let rows = self.search_scored(filter, pagination).await?;
        Ok(rows.into_iter().map(|row| row.record).collect())
    }

    /// Count and window for one page, combined into the endpoint payload.
    ///
    /// An empty term never reaches the database.
    pub async fn lookup(
        &self,
        filter: &SearchFilter,
        pagination: Pagination,
    ) -> Result<SearchResponse> {
        if filter.is_empty() {
            return Ok(SearchResponse::empty(pagination));
        }

        let (total, results) =
            tokio::try_join!(self.count(filter), self.search(filter, pagination))?;

        tracing::debug!(
            "Lookup '{}' (ward '{}') page {}: {} of {} matches",
            filter.term,
            filter.ward,
            pagination.page,
            results.len(),
            total
        );

        Ok(SearchResponse::from_window(pagination, total, results))
    }

    fn binds<'a>(&self, filter: &'a SearchFilter, pagination: Pagination) -> Binds<'a> {
        Binds {
            prefix: self.options.prefix_pattern(&filter.term),
            contains: self.options.contains_pattern(&filter.term),
            ward: &filter.ward,
            limit: pagination.limit,
            offset: pagination.offset(),
        }
    }
}
