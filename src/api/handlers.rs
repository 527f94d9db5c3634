use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{ApiError, AppState, Estado, Fecha, Rut, TenderCode};

/// Liveness probe.
pub(crate) async fn liveness() -> &'static str {
    "API LicitaSeguro está corriendo correctamente"
}

/// Fixed dashboard counters consumed by the frontend home page.
pub(crate) async fn counters() -> Json<Value> {
    Json(json!({
        "licitaciones": 887,
        "proveedores": 1939,
        "usuarios": 1231,
    }))
}

#[derive(Deserialize)]
pub(crate) struct SearchQuery {
    fecha: Option<String>,
    estado: Option<String>,
}

/// `GET /api/licitaciones?fecha=DDMMYYYY&estado=...`
pub(crate) async fn search_tenders(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    let (Some(fecha), Some(estado)) = (query.fecha.as_deref(), query.estado.as_deref()) else {
        return Err(ApiError::Validation(
            "Debes incluir parámetros \"fecha\" y \"estado\".",
        ));
    };

    let fecha = Fecha::try_from(fecha).map_err(ApiError::Validation)?;
    let estado = Estado::try_from(estado).map_err(ApiError::Validation)?;

    let listing = state
        .client
        .search_tenders(fecha.as_str(), estado.as_query())
        .await?;

    if listing.is_empty() {
        return Err(ApiError::NotFound(
            "No se encontraron licitaciones con esos filtros.",
        ));
    }

    Ok(Json(listing.into_value()))
}

/// `GET /api/licitacion/{codigo}`
pub(crate) async fn tender_detail(
    State(state): State<AppState>,
    Path(codigo): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let codigo = TenderCode::try_from(codigo.as_str()).map_err(ApiError::Validation)?;

    let listing = state.client.tender_by_code(codigo.as_str()).await?;

    match listing.first() {
        Some(record) => Ok(Json(record.clone())),
        None => Err(ApiError::NotFound("Licitación no encontrada")),
    }
}

/// `GET /api/proveedor/{rut}`
pub(crate) async fn supplier_lookup(
    State(state): State<AppState>,
    Path(rut): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let rut = Rut::try_from(rut.as_str()).map_err(ApiError::Validation)?;

    let listing = state.client.supplier_by_rut(rut.as_query()).await?;

    if listing.is_empty() {
        return Err(ApiError::NotFound("Proveedor no encontrado"));
    }

    Ok(Json(listing.into_payload()))
}
