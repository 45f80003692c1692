//! The `history` command.

use codetally_core::AppConfig;
use codetally_db::AnalysisRow;

/// Connects to the configured database and applies pending migrations.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset or the database is
/// unreachable.
pub(crate) async fn connect(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let Some(url) = config.database_url.as_deref() else {
        anyhow::bail!("DATABASE_URL is required for history");
    };
    let pool =
        codetally_db::connect_pool(url, codetally_db::PoolConfig::from_app_config(config)).await?;
    codetally_db::run_migrations(&pool).await?;
    Ok(pool)
}

/// Prints the most recent stored reports, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub(crate) async fn run_history(pool: &sqlx::PgPool, limit: i64, json: bool) -> anyhow::Result<()> {
    let rows = codetally_db::list_recent_analyses(pool, limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("no stored analyses; run `codetally analyse --persist` first");
        return Ok(());
    }

    println!(
        "{:<8}{:<22}{:<10}{:<8}{:<8}GRADE",
        "ID", "CREATED", "ACCOUNTS", "TOTAL", "UNIQUE"
    );
    for row in &rows {
        println!("{}", summary_line(row));
    }
    Ok(())
}

/// One table line. Fields missing from an older stored report print as `-`.
pub(crate) fn summary_line(row: &AnalysisRow) -> String {
    let overall = &row.report["overall"];
    let field = |value: &serde_json::Value| {
        value
            .as_u64()
            .map_or_else(|| "-".to_string(), |n| n.to_string())
    };
    let grade = row.report["aiInsights"]["performanceScore"]["grade"]
        .as_str()
        .unwrap_or("-");

    format!(
        "{:<8}{:<22}{:<10}{:<8}{:<8}{}",
        row.id,
        row.created_at.format("%Y-%m-%d %H:%M:%S"),
        field(&overall["totalAccounts"]),
        field(&overall["stats"]["total"]),
        field(&overall["uniqueProblems"]),
        grade
    )
}
