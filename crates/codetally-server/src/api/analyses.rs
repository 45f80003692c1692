use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};
use codetally_analyzer::AnalysisReport;
use codetally_core::{ProfileInput, ProfileRequest};
use codetally_db::AnalysisRow;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct AnalyseBody {
    #[serde(default)]
    profiles: BTreeMap<String, ProfileInput>,
}

#[derive(Debug, Deserialize)]
pub(super) struct HistoryQuery {
    pub limit: Option<i64>,
}

/// Validates the body, runs the pipeline, and stores the report when a
/// database is configured. A failed write is logged and does not change
/// the response.
pub(super) async fn analyse(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<AnalyseBody>, JsonRejection>,
) -> Result<Json<ApiResponse<AnalysisReport>>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        ApiError::new(
            req_id.0.clone(),
            "validation_error",
            rejection.body_text(),
        )
    })?;

    let request = ProfileRequest::from_raw(body.profiles)
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let report = state.analyzer.analyze(&request).await;

    if let Some(pool) = &state.pool {
        match codetally_db::insert_analysis(pool, &report).await {
            Ok(row) => tracing::debug!(analysis_id = row.id, "analysis stored"),
            Err(e) => tracing::warn!(error = %e, "failed to store analysis; continuing"),
        }
    }

    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_history(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<AnalysisRow>>>, ApiError> {
    let Some(pool) = &state.pool else {
        return Err(ApiError::new(
            req_id.0,
            "unavailable",
            "analysis history requires DATABASE_URL",
        ));
    };

    let data = codetally_db::list_recent_analyses(pool, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
