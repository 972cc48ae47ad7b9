use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use shopinsight_core::{canonical_site_url, StoreRecord};
use shopinsight_db::StoreRepository;

use crate::middleware::RequestId;

use super::{map_db_error, require_website_url, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct StoreQuery {
    pub website_url: Option<String>,
}

/// GET /api/v1/stores: the last saved record for a site.
pub(super) async fn get_store(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<StoreQuery>,
) -> Result<Json<ApiResponse<StoreRecord>>, ApiError> {
    let rid = &req_id.0;
    let website_url = require_website_url(rid, query.website_url.as_deref())?;
    let site_url = canonical_site_url(&website_url)
        .map_err(|e| ApiError::new(rid.as_str(), "bad_request", e.to_string()))?;

    let record = state
        .repo
        .load(&site_url)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?
        .ok_or_else(|| {
            ApiError::new(
                rid.as_str(),
                "not_found",
                format!("no stored record for {site_url}"),
            )
        })?;

    Ok(Json(ApiResponse {
        data: record,
        meta: ResponseMeta::new(req_id.0),
    }))
}
