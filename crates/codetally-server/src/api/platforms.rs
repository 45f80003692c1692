use axum::{Extension, Json};
use codetally_core::Source;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, ResponseMeta};

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(super) struct PlatformItem {
    id: Source,
    name: &'static str,
    description: &'static str,
    url_format: &'static str,
}

impl From<Source> for PlatformItem {
    fn from(source: Source) -> Self {
        Self {
            id: source,
            name: source.display_name(),
            description: source.description(),
            url_format: source.url_format(),
        }
    }
}

pub(super) async fn list_platforms(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<PlatformItem>>> {
    Json(ApiResponse {
        data: Source::ALL.into_iter().map(PlatformItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    })
}
