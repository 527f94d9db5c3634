//! End-to-end tests over real sockets: a mock Mercado Público server on one
//! ephemeral port, the service under test on another, a plain HTTP client in
//! between.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Json;
use serde_json::{Value, json};

use licitaseguro::{AppOptions, GovernorOptions, UpstreamOptions, build_app};

/// Tender code the mock upstream answers with an empty `Listado`.
const MISSING_CODE: &str = "2669-126-L125";

/// Date that triggers two contention replies before a success.
const CONTENTION_FECHA: &str = "01012025";

#[derive(Clone)]
struct MockUpstream {
    contention_hits: Arc<AtomicUsize>,
}

async fn mock_licitaciones(
    State(upstream): State<MockUpstream>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    assert!(params.contains_key("ticket"), "ticket must reach the upstream");

    if let Some(codigo) = params.get("codigo") {
        if codigo == MISSING_CODE {
            return (StatusCode::OK, Json(json!({ "Cantidad": 0, "Listado": [] })));
        }

        return (
            StatusCode::OK,
            Json(json!({
                "Cantidad": 1,
                "Listado": [{ "CodigoExterno": codigo, "Nombre": "Construcción de sede" }],
            })),
        );
    }

    if params.get("fecha").map(String::as_str) == Some(CONTENTION_FECHA)
        && upstream.contention_hits.fetch_add(1, Ordering::SeqCst) < 2
    {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "Codigo": 10500,
                "Mensaje": "No es posible atender peticiones simultáneas",
            })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "Cantidad": 1,
            "FechaCreacion": "11-06-2025 0:00:00",
            "Listado": [{ "CodigoExterno": "1509-5-L125", "Estado": "Publicada" }],
        })),
    )
}

async fn mock_proveedor(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    assert_eq!(
        params.get("rutempresaproveedor").map(String::as_str),
        Some("77.596.940-7"),
        "RUT must arrive formatted"
    );

    Json(json!({
        "Cantidad": 1,
        "FechaCreacion": "11-06-2025 0:00:00",
        "listaEmpresas": [{ "NombreEmpresa": "Proveedora Austral" }],
    }))
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// Spin up mock upstream + service; returns the service's base URL.
async fn start_stack() -> String {
    let upstream = MockUpstream {
        contention_hits: Arc::new(AtomicUsize::new(0)),
    };
    let mock = Router::new()
        .route("/publico/licitaciones.json", get(mock_licitaciones))
        .route("/Publico/Empresas/BuscarProveedor", get(mock_proveedor))
        .with_state(upstream);
    let upstream_url = serve(mock).await;

    let options = AppOptions {
        listen_port: 0,
        upstream: UpstreamOptions {
            base_url: upstream_url,
            ticket: "itest-ticket".to_string(),
            request_timeout: Duration::from_secs(5),
        },
        governor: GovernorOptions {
            min_request_interval: Duration::from_millis(20),
            max_retries: 3,
            retry_delay: Duration::from_millis(30),
        },
    };

    serve(build_app(&options).unwrap()).await
}

async fn get_json(url: &str) -> (StatusCode, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn search_round_trips_a_listing() {
    let base = start_stack().await;

    let (status, body) =
        get_json(&format!("{base}/api/licitaciones?fecha=11062025&estado=publicada")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Listado"][0]["CodigoExterno"], "1509-5-L125");
}

#[tokio::test]
async fn search_validates_before_touching_the_upstream() {
    let base = start_stack().await;

    let (status, _) =
        get_json(&format!("{base}/api/licitaciones?fecha=11062025&estado=invalido")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        get_json(&format!("{base}/api/licitaciones?fecha=2025-06-11&estado=publicada")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_recovers_from_upstream_contention() {
    let base = start_stack().await;

    let (status, body) = get_json(&format!(
        "{base}/api/licitaciones?fecha={CONTENTION_FECHA}&estado=publicada"
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Cantidad"], 1);
}

#[tokio::test]
async fn detail_of_a_missing_tender_is_not_found() {
    let base = start_stack().await;

    let (status, _) = get_json(&format!("{base}/api/licitacion/{MISSING_CODE}")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn detail_returns_a_single_record() {
    let base = start_stack().await;

    let (status, body) = get_json(&format!("{base}/api/licitacion/1057539-17-LR25")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["CodigoExterno"], "1057539-17-LR25");
}

#[tokio::test]
async fn supplier_lookup_formats_the_rut_and_returns_the_subset() {
    let base = start_stack().await;

    let (status, body) = get_json(&format!("{base}/api/proveedor/775969407")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Cantidad"], 1);
    assert_eq!(body["listaEmpresas"][0]["NombreEmpresa"], "Proveedora Austral");
}
