//! `commis serve` -- HTTP JSON API for the delivery-rules engine.
//!
//! Exposes the validator, the rules store, and the resolver as an async
//! HTTP service using `axum` + `tokio`. Supports concurrent request
//! handling; the resolver is pure, so requests share nothing but the
//! rules store.
//!
//! Endpoints:
//! - GET    /health                        - Server status
//! - GET    /suppliers                     - List stored suppliers
//! - GET    /suppliers/{id}/rules          - A supplier's rules document
//! - PUT    /suppliers/{id}/rules          - Validate and store rules (last-write-wins)
//! - DELETE /suppliers/{id}/rules          - Remove a supplier's rules
//! - GET    /suppliers/{id}/resolution     - Resolve; `?now=` overrides the instant
//!
//! All responses use Content-Type: application/json.

mod handlers;
mod state;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

use commis_core::RulesDoc;
use commis_store::{MemoryStore, RulesStore, SupplierRecord};

use self::handlers::{
    handle_delete_rules, handle_get_rules, handle_health, handle_list_suppliers,
    handle_not_found, handle_put_rules, handle_resolution,
};
use self::state::AppState;

/// A supplier record as pre-loaded from disk.
#[derive(Deserialize)]
struct SupplierDoc {
    supplier_id: String,
    rules: RulesDoc,
}

/// Construct a JSON error response with the given status code and message.
fn json_error(status: StatusCode, message: &str) -> axum::response::Response {
    (status, Json(serde_json::json!({"error": message}))).into_response()
}

/// Start the HTTP server on the given port, optionally pre-loading
/// supplier records from disk.
pub async fn start_server(
    port: u16,
    supplier_paths: Vec<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryStore::new();

    // Pre-load supplier records; invalid files are skipped with a warning.
    for path in &supplier_paths {
        match load_supplier(path) {
            Ok(doc) => {
                eprintln!("Loaded supplier: {} (from {})", doc.supplier_id, path.display());
                store
                    .upsert(SupplierRecord::new(doc.supplier_id, doc.rules))
                    .await?;
            }
            Err(e) => {
                eprintln!("Warning: failed to load {}: {}", path.display(), e);
            }
        }
    }

    let state = Arc::new(AppState { store });

    // CORS: permissive for local dev.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/suppliers", get(handle_list_suppliers))
        .route(
            "/suppliers/{id}/rules",
            get(handle_get_rules)
                .put(handle_put_rules)
                .delete(handle_delete_rules),
        )
        .route("/suppliers/{id}/resolution", get(handle_resolution))
        .fallback(handle_not_found)
        .layer(cors)
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    eprintln!("commis API listening on http://0.0.0.0:{}", port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    eprintln!("\nServer shut down.");
    Ok(())
}

/// Read and validate one supplier record file.
fn load_supplier(path: &Path) -> Result<SupplierDoc, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let doc: SupplierDoc = serde_json::from_str(&text).map_err(|e| e.to_string())?;
    if let Err(violations) = doc.rules.validate() {
        let messages: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
        return Err(messages.join("; "));
    }
    Ok(doc)
}

/// Wait for a shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    eprintln!("\nReceived shutdown signal...");
}
