//! Database operations for the `analyses` history table.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::DbError;

pub const DEFAULT_HISTORY_LIMIT: i64 = 10;
pub const MAX_HISTORY_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `analyses` table. `report` is the serialized report as
/// it was returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRow {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub report: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Stores one report and returns the inserted row.
///
/// # Errors
///
/// Returns [`DbError::Encode`] if `report` cannot be serialized, or
/// [`DbError::Sqlx`] if the insert fails.
pub async fn insert_analysis<T: Serialize + ?Sized>(
    pool: &PgPool,
    report: &T,
) -> Result<AnalysisRow, DbError> {
    let report = serde_json::to_value(report)?;

    let row = sqlx::query_as::<_, AnalysisRow>(
        "INSERT INTO analyses (report) VALUES ($1) \
         RETURNING id, created_at, report",
    )
    .bind(report)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Returns the most recent reports, newest first. `limit` is clamped to
/// `1..=MAX_HISTORY_LIMIT`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_analyses(pool: &PgPool, limit: i64) -> Result<Vec<AnalysisRow>, DbError> {
    let rows = sqlx::query_as::<_, AnalysisRow>(
        "SELECT id, created_at, report FROM analyses \
         ORDER BY created_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(clamp_limit(limit))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[must_use]
pub(crate) fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(1, MAX_HISTORY_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(-5), 1);
        assert_eq!(clamp_limit(10), 10);
        assert_eq!(clamp_limit(100), 100);
        assert_eq!(clamp_limit(1_000), 100);
    }
}
