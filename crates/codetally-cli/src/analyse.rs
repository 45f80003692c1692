//! The `analyse` command: validate flags, run the pipeline, print JSON.

use clap::Args;
use codetally_analyzer::{AnalysisReport, Analyzer};
use codetally_core::{AppConfig, ProfileInput, ProfileRequest, RequestError, Source};

#[derive(Debug, Args)]
pub(crate) struct AnalyseArgs {
    /// LeetCode username or profile URL (repeatable)
    #[arg(long)]
    pub leetcode: Vec<String>,
    /// Codeforces handle or profile URL (repeatable)
    #[arg(long)]
    pub codeforces: Vec<String>,
    /// GeeksforGeeks username or profile URL (repeatable)
    #[arg(long)]
    pub gfg: Vec<String>,
    /// Store the report in the history table (requires DATABASE_URL)
    #[arg(long)]
    pub persist: bool,
    /// Print single-line JSON
    #[arg(long)]
    pub compact: bool,
}

impl AnalyseArgs {
    /// Builds the validated request from the per-source flags.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::EmptyProfiles`] when no non-blank identifier
    /// was given.
    pub(crate) fn to_request(&self) -> Result<ProfileRequest, RequestError> {
        let raw = [
            (Source::Leetcode, &self.leetcode),
            (Source::Codeforces, &self.codeforces),
            (Source::Gfg, &self.gfg),
        ]
        .into_iter()
        .filter(|(_, ids)| !ids.is_empty())
        .map(|(source, ids)| (source.as_str().to_owned(), ProfileInput::Many(ids.clone())));

        ProfileRequest::from_raw(raw)
    }
}

/// Runs the analysis and prints the report to stdout.
///
/// # Errors
///
/// Returns an error if the flags name no account, the adapters cannot be
/// built, or the report cannot be serialized. Storage failures are logged
/// and skipped.
pub(crate) async fn run_analyse(config: &AppConfig, args: &AnalyseArgs) -> anyhow::Result<()> {
    let request = args.to_request()?;
    let analyzer = Analyzer::from_app_config(config)?;
    let report = analyzer.analyze(&request).await;

    if args.persist {
        persist(config, &report).await;
    }

    let rendered = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{rendered}");
    Ok(())
}

async fn persist(config: &AppConfig, report: &AnalysisReport) {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("--persist given but DATABASE_URL is not set; report not stored");
        return;
    };

    let pool_config = codetally_db::PoolConfig::from_app_config(config);
    let stored = async {
        let pool = codetally_db::connect_pool(url, pool_config).await?;
        codetally_db::run_migrations(&pool).await?;
        let row = codetally_db::insert_analysis(&pool, report).await?;
        Ok::<_, codetally_db::DbError>(row.id)
    }
    .await;

    match stored {
        Ok(id) => tracing::info!(analysis_id = id, "analysis stored"),
        Err(e) => tracing::warn!(error = %e, "failed to store analysis; continuing"),
    }
}
