//! HTTP surface of the service.
//!
//! Thin adapters over [`MercadoPublicoClient`]: each handler validates its
//! parameters (rejecting with `400` before any upstream call), invokes the
//! client, and maps the outcome — empty result sets become `404`, upstream
//! failures become `500` with a generic body.

mod handlers;

mod params;
pub use params::*;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::MercadoPublicoClient;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Upstream client, governor included.
    pub client: Arc<MercadoPublicoClient>,
}

/// Assemble the API router around `client`.
pub fn router(client: Arc<MercadoPublicoClient>) -> Router {
    Router::new()
        .route("/api/test", get(handlers::liveness))
        .route("/api/contador", get(handlers::counters))
        .route("/api/licitaciones", get(handlers::search_tenders))
        .route("/api/licitacion/{codigo}", get(handlers::tender_detail))
        .route("/api/proveedor/{rut}", get(handlers::supplier_lookup))
        .with_state(AppState { client })
}
