use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use shopinsight_core::StoreRecord;
use shopinsight_db::StoreRepository;
use shopinsight_scraper::ExtractError;

use crate::middleware::RequestId;

use super::{require_website_url, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct InsightsQuery {
    pub website_url: Option<String>,
}

/// GET /shopify_insights: extract a storefront record, save it, and return it.
///
/// A failed save does not fail the request; it is reported through
/// `meta.persisted`.
pub(super) async fn shopify_insights(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<InsightsQuery>,
) -> Result<Json<ApiResponse<StoreRecord>>, ApiError> {
    let website_url = require_website_url(&req_id.0, query.website_url.as_deref())?;

    let record = state
        .extractor
        .extract_insights(&website_url)
        .await
        .map_err(|e| map_extract_error(&req_id.0, &e))?;

    let persisted = match state.repo.save(&record).await {
        Ok(store_id) => {
            tracing::info!(store_id, website_url = %record.website_url, "store record persisted");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, website_url = %record.website_url, "failed to persist store record");
            false
        }
    };

    let mut meta = ResponseMeta::new(req_id.0);
    meta.persisted = Some(persisted);
    Ok(Json(ApiResponse { data: record, meta }))
}

fn map_extract_error(request_id: &str, error: &ExtractError) -> ApiError {
    match error {
        ExtractError::Unreachable { url, status } => {
            tracing::warn!(url = %url, status = ?status, "storefront unreachable");
            ApiError::new(
                request_id,
                "unreachable",
                "Website not found or inaccessible",
            )
        }
        ExtractError::Internal { reason } => {
            tracing::error!(reason = %reason, "extraction failed");
            ApiError::new(request_id, "internal_error", "failed to extract insights")
        }
    }
}
