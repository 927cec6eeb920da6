use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use common::types::DataResponse;
use service::{Deal, DealFilter, DealInput};
use tracing::{debug, info, warn};

use crate::errors::ApiError;
use crate::extract::DealPayload;
use crate::observability;
use crate::routes::AppState;

/// Path ids must be positive integers; anything else names no deal.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            debug!(raw, "path id is not a positive integer");
            Err(ApiError::NotFound)
        }
    }
}

fn reject(operation: &'static str, err: ApiError) -> ApiError {
    observability::record(operation, err.outcome());
    warn!(operation, outcome = err.outcome(), "deal request rejected");
    err
}

/// Resolve a path id to one known to be in the store.
async fn existing_id(state: &AppState, operation: &'static str, raw: &str) -> Result<u64, ApiError> {
    let id = parse_id(raw).map_err(|e| reject(operation, e))?;
    if !state.store.exists(id).await {
        return Err(reject(operation, ApiError::NotFound));
    }
    Ok(id)
}

#[utoipa::path(
    get, path = "/api/deals", tag = "deals",
    params(
        ("seller" = Option<String>, Query, description = "Exact seller match"),
        ("buyer" = Option<String>, Query, description = "Exact buyer match"),
        ("country" = Option<String>, Query, description = "Exact country match"),
        ("technology" = Option<String>, Query, description = "Exact technology match"),
        ("capacity" = Option<i64>, Query, description = "Capacity match"),
        ("term" = Option<String>, Query, description = "Exact term match"),
        ("date" = Option<String>, Query, description = "Exact date match")
    ),
    responses(
        (status = 200, description = "Deals matching every query parameter", body = crate::openapi::DealListEnvelopeDoc)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<DataResponse<Vec<Deal>>> {
    let filter = DealFilter::from(params);
    let deals = state.store.list(&filter).await;
    observability::record("list", "ok");
    info!(count = deals.len(), filtered = !filter.is_empty(), "list deals");
    Json(DataResponse::new(deals))
}

#[utoipa::path(
    get, path = "/api/deals/{id}", tag = "deals",
    params(("id" = u64, Path, description = "Deal ID")),
    responses(
        (status = 200, description = "Single-element list with the deal", body = crate::openapi::DealListEnvelopeDoc),
        (status = 400, description = "Could not find this id", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<DataResponse<Vec<Deal>>>, ApiError> {
    let id = existing_id(&state, "get", &raw).await?;
    let deals = state.store.get_by_id(id).await;
    observability::record("get", "ok");
    Ok(Json(DataResponse::new(deals)))
}

#[utoipa::path(
    post, path = "/api/deals", tag = "deals",
    request_body = crate::openapi::DealInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::DealEnvelopeDoc),
        (status = 400, description = "Empty or missing properties and/or values", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    DealPayload(payload): DealPayload,
) -> Result<(StatusCode, Json<DataResponse<Deal>>), ApiError> {
    let input = DealInput::try_from_payload(&payload).map_err(|e| reject("create", e.into()))?;
    let (deal, total) = state.store.create_counted(input).await;
    observability::record("create", "ok");
    observability::set_stored(total);
    info!(id = deal.id, seller = %deal.seller, technology = %deal.technology, "created deal");
    Ok((StatusCode::CREATED, Json(DataResponse::new(deal))))
}

#[utoipa::path(
    patch, path = "/api/deals/{id}", tag = "deals",
    params(("id" = u64, Path, description = "Deal ID")),
    request_body = crate::openapi::DealInputDoc,
    responses(
        (status = 200, description = "Replaced", body = crate::openapi::DealEnvelopeDoc),
        (status = 400, description = "Unknown id or invalid payload", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    DealPayload(payload): DealPayload,
) -> Result<Json<DataResponse<Deal>>, ApiError> {
    let id = existing_id(&state, "update", &raw).await?;
    let input = DealInput::try_from_payload(&payload).map_err(|e| reject("update", e.into()))?;
    // the deal may have been deleted since the existence check
    let deal = state
        .store
        .update_by_id(id, input)
        .await
        .map_err(|e| reject("update", e.into()))?;
    observability::record("update", "ok");
    info!(id = deal.id, "updated deal");
    Ok(Json(DataResponse::new(deal)))
}

#[utoipa::path(
    delete, path = "/api/deals/{id}", tag = "deals",
    params(("id" = u64, Path, description = "Deal ID")),
    responses(
        (status = 200, description = "Remaining deals", body = crate::openapi::DealListEnvelopeDoc),
        (status = 400, description = "Could not find this id", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<DataResponse<Vec<Deal>>>, ApiError> {
    let id = existing_id(&state, "delete", &raw).await?;
    let remaining = state.store.delete_by_id(id).await;
    observability::record("delete", "ok");
    observability::set_stored(remaining.len());
    info!(id, remaining = remaining.len(), "deleted deal");
    Ok(Json(DataResponse::new(remaining)))
}
