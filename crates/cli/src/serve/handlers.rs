//! HTTP route handlers: health, supplier rules CRUD, resolution.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use commis_core::{resolve, RulesDoc};
use commis_store::{RulesStore, StoreError, SupplierRecord};

use super::json_error;
use super::state::AppState;

/// Fallback handler for unmatched routes.
pub(crate) async fn handle_not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "not found")
}

/// GET /health
pub(crate) async fn handle_health() -> Response {
    let response = serde_json::json!({ "status": "ok" });
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /suppliers
pub(crate) async fn handle_list_suppliers(State(state): State<Arc<AppState>>) -> Response {
    let records = match state.store.list().await {
        Ok(r) => r,
        Err(e) => return json_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    };

    let suppliers: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            let delivery_mode = if r.rules.delivery_days.is_empty() {
                format!("delay +{}d", r.rules.delivery_delay_days)
            } else {
                "delivery days".to_string()
            };
            serde_json::json!({
                "supplier_id": r.supplier_id,
                "order_days": r.rules.order_days,
                "delivery_mode": delivery_mode,
                "updated_at": r.updated_at,
            })
        })
        .collect();

    let response = serde_json::json!({ "suppliers": suppliers });
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /suppliers/{id}/rules
pub(crate) async fn handle_get_rules(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.store.fetch(&id).await {
        Ok(record) => {
            let response = serde_json::json!({
                "supplier_id": record.supplier_id,
                "rules": record.rules,
                "updated_at": record.updated_at,
            });
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(StoreError::NotFound { .. }) => json_error(
            StatusCode::NOT_FOUND,
            &format!("no delivery rules for supplier '{}'", id),
        ),
        Err(e) => json_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

/// PUT /suppliers/{id}/rules
///
/// Validates the document and stores it (last-write-wins). A failed
/// validation returns 422 with the full violation list so the
/// administrative form can highlight every problem in one pass.
pub(crate) async fn handle_put_rules(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(doc): Json<RulesDoc>,
) -> Response {
    if let Err(violations) = doc.validate() {
        let body = serde_json::json!({
            "error": "validation failed",
            "violations": violations,
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
    }

    match state.store.upsert(SupplierRecord::new(id.clone(), doc)).await {
        Ok(()) => {
            let response = serde_json::json!({
                "supplier_id": id,
                "status": "stored",
            });
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => json_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

/// DELETE /suppliers/{id}/rules
pub(crate) async fn handle_delete_rules(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.store.remove(&id).await {
        Ok(()) => {
            let response = serde_json::json!({
                "supplier_id": id,
                "status": "removed",
            });
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(StoreError::NotFound { .. }) => json_error(
            StatusCode::NOT_FOUND,
            &format!("no delivery rules for supplier '{}'", id),
        ),
        Err(e) => json_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

#[derive(Deserialize)]
pub(crate) struct ResolutionQuery {
    now: Option<String>,
}

/// GET /suppliers/{id}/resolution?now=YYYY-MM-DDTHH:MM[:SS]
pub(crate) async fn handle_resolution(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<ResolutionQuery>,
) -> Response {
    let record = match state.store.fetch(&id).await {
        Ok(r) => r,
        Err(StoreError::NotFound { .. }) => {
            return json_error(
                StatusCode::NOT_FOUND,
                &format!("no delivery rules for supplier '{}'", id),
            )
        }
        Err(e) => return json_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    };

    // Stored documents were validated on write; this parse re-derives the
    // typed rules and only fails if the store was populated out of band.
    let rules = match record.rules.validate() {
        Ok(r) => r,
        Err(violations) => {
            eprintln!(
                "stored rules invalid for supplier '{}': {} violation(s)",
                id,
                violations.len()
            );
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "stored rules are invalid");
        }
    };

    let now = match &query.now {
        Some(raw) => match crate::parse_naive_instant(raw) {
            Some(dt) => dt,
            None => {
                return json_error(
                    StatusCode::BAD_REQUEST,
                    &format!("invalid 'now' value '{}' (expected YYYY-MM-DDTHH:MM[:SS])", raw),
                )
            }
        },
        None => crate::naive_now(),
    };

    match resolve(&rules, now) {
        Ok(resolution) => {
            let mut body = resolution.to_json();
            body["supplier_id"] = serde_json::json!(id);
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            // Defensive: unreachable for validated rules.
            eprintln!("resolution failure for supplier '{}': {}", id, e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal resolution failure")
        }
    }
}
