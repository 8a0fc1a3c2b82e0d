//! End-to-end tests of the catalog API against an in-process mock gateway.
//!
//! The gateway serves fixture payloads in each provider's native envelope
//! dialect on an ephemeral port; the tests drive the real application
//! router with `tower::ServiceExt::oneshot`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    extract::Query,
    http::{Method, Request, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use partshub_server::{api::app_router, build_state, config::Config};

fn autopartsplus_items() -> Value {
    json!([
        {
            "sku": "BRK-001",
            "title": "Brake pad set",
            "desc": "Front brake pads",
            "unit_price": 50,
            "qty_available": 0,
            "brand_name": "Brembo",
            "model": "Corolla",
            "year": 2015,
            "img_urls": ["http://img/brk-front.jpg"],
            "category_name": "brakes"
        },
        {
            "part_id": "FLT-010",
            "name": "Oil filter",
            "description": "Filtro de aceite para motor",
            "unit_price": "9.99",
            "qty_available": "7",
            "brand": "Mann",
            "year": 2016,
            "category": "filters"
        }
    ])
}

fn repuestosmax_producto() -> Value {
    json!({
        "identificacion": { "sku": "BRK-001" },
        "informacionBasica": {
            "nombre": "Pastillas de freno",
            "descripcion": "Juego de pastillas de freno delanteras para eje delantero",
            "marca": { "nombre": "Brembo" },
            "categoria": { "nombre": "frenos" }
        },
        "precio": { "valor": 40 },
        "inventario": { "cantidad": 5 }
    })
}

fn globalparts_items() -> Value {
    json!([
        {
            "ItemHeader": { "ExternalReferences": { "SKU": { "Value": "BRK-001" } } },
            "ProductDetails": {
                "NameInfo": { "DisplayName": "Brake pad set" },
                "Description": { "FullText": "Ceramic front brake pads" }
            },
            "PricingInfo": { "ListPrice": { "Amount": "45.00" } },
            "AvailabilityInfo": { "QuantityInfo": { "AvailableQuantity": 0 } }
        },
        {
            "partNumber": "WPR-220",
            "name": "Wiper blade",
            "unitPrice": 6,
            "stock": 11
        }
    ])
}

/// Gateway serving every provider's happy-path fixtures. Counts catalog
/// hits against the AutoPartsPlus endpoint so tests can observe caching.
fn gateway(catalog_hits: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route(
            "/api/autopartsplus/catalog",
            get(move || {
                let hits = catalog_hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(json!({
                        "success": true,
                        "parts": autopartsplus_items(),
                        "pagination": { "page": 1 }
                    }))
                }
            }),
        )
        .route(
            "/api/autopartsplus/parts",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("sku").map(String::as_str) == Some("BRK-001") {
                    Json(json!({ "success": true, "parts": [autopartsplus_items()[0]] }))
                } else {
                    Json(json!({ "success": true, "parts": [] }))
                }
            }),
        )
        .route(
            "/api/repuestosmax/catalogo",
            get(|| async {
                Json(json!({
                    "exito": true,
                    "productos": [repuestosmax_producto()],
                    "paginacion": {}
                }))
            }),
        )
        .route(
            "/api/repuestosmax/productos",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("codigo").map(String::as_str) == Some("BRK-001") {
                    Json(json!({
                        "exito": true,
                        "resultado": { "productos": [repuestosmax_producto()] }
                    }))
                } else {
                    Json(json!({ "exito": false }))
                }
            }),
        )
        .route(
            "/api/globalparts/inventory/catalog",
            get(|| async {
                Json(json!({
                    "ResponseEnvelope": {
                        "Body": { "CatalogListing": { "Items": globalparts_items() } }
                    }
                }))
            }),
        )
        .route(
            "/api/globalparts/inventory/search",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("partNumber").map(String::as_str) == Some("BRK-001") {
                    Json(json!({
                        "ResponseEnvelope": {
                            "Body": { "SearchResults": { "Items": [globalparts_items()[0]] } }
                        }
                    }))
                } else {
                    Json(json!({
                        "ResponseEnvelope": { "Body": { "SearchResults": { "Items": [] } } }
                    }))
                }
            }),
        )
}

/// Gateway where only AutoPartsPlus is healthy: RepuestosMax answers
/// garbage and GlobalParts is down.
fn degraded_gateway() -> Router {
    Router::new()
        .route(
            "/api/autopartsplus/catalog",
            get(|| async { Json(json!({ "success": true, "parts": [autopartsplus_items()[1]] })) }),
        )
        .route(
            "/api/repuestosmax/catalogo",
            get(|| async { Json(json!("temporarily unavailable")) }),
        )
        .route(
            "/api/globalparts/inventory/catalog",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        )
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn test_config(provider_base_url: String) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        provider_base_url,
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
    }
}

async fn build_app(gateway_router: Router) -> Router {
    let base_url = spawn(gateway_router).await;
    let config = test_config(base_url);
    app_router(build_state(&config), &config)
}

async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    // Extractor rejections answer with plain text, not JSON
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn catalog_merges_duplicate_skus_across_providers() {
    let app = build_app(gateway(Arc::new(AtomicUsize::new(0)))).await;

    let (status, body) = call(&app, Method::GET, "/api/parts/catalog").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 20);
    assert_eq!(body["hasMore"], false);

    let parts = body["parts"].as_array().unwrap();
    let brake = parts
        .iter()
        .find(|part| part["sku"] == "BRK-001")
        .unwrap();

    // Cheapest in-stock offer sets the price; stock is the best case
    assert_eq!(brake["price"].as_f64().unwrap(), 40.0);
    assert_eq!(brake["stock"], 5);

    let offers = brake["providers"].as_array().unwrap();
    assert_eq!(offers.len(), 3);
    let prices: Vec<f64> = offers
        .iter()
        .map(|offer| offer["price"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, vec![40.0, 45.0, 50.0]);
    assert_eq!(offers[0]["provider"], "RepuestosMax");

    // First provider seeds metadata; the longer description wins the fill
    assert_eq!(brake["name"], "Brake pad set");
    assert_eq!(brake["brand"], "Brembo");
    assert_eq!(brake["model"], "Corolla");
    assert_eq!(brake["year"], 2015);
    assert_eq!(brake["category"], "brakes");
    assert_eq!(
        brake["description"],
        "Juego de pastillas de freno delanteras para eje delantero"
    );
}

#[tokio::test]
async fn search_and_filters_conjoin_before_pagination() {
    let app = build_app(gateway(Arc::new(AtomicUsize::new(0)))).await;

    let (status, body) = call(&app, Method::GET, "/api/parts/catalog?search=FILTRO").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["parts"][0]["sku"], "FLT-010");

    let (_, body) = call(&app, Method::GET, "/api/parts/catalog?year=2015").await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["parts"][0]["sku"], "BRK-001");

    // Brand matches but the year does not
    let (_, body) = call(&app, Method::GET, "/api/parts/catalog?brand=mann&year=2015").await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn pagination_slices_in_merge_order() {
    let app = build_app(gateway(Arc::new(AtomicUsize::new(0)))).await;

    let (_, first) = call(&app, Method::GET, "/api/parts/catalog?page=1&limit=2").await;
    assert_eq!(first["total"], 3);
    assert_eq!(first["hasMore"], true);
    let skus: Vec<&str> = first["parts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|part| part["sku"].as_str().unwrap())
        .collect();
    assert_eq!(skus, vec!["BRK-001", "FLT-010"]);

    let (_, second) = call(&app, Method::GET, "/api/parts/catalog?page=2&limit=2").await;
    assert_eq!(second["hasMore"], false);
    assert_eq!(second["parts"][0]["sku"], "WPR-220");
}

#[tokio::test]
async fn unparseable_pagination_values_are_rejected() {
    let app = build_app(gateway(Arc::new(AtomicUsize::new(0)))).await;
    let (status, _) = call(&app, Method::GET, "/api/parts/catalog?page=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn single_part_merges_every_provider_that_answers() {
    let app = build_app(gateway(Arc::new(AtomicUsize::new(0)))).await;

    let (status, body) = call(&app, Method::GET, "/api/parts/BRK-001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sku"], "BRK-001");
    assert_eq!(body["price"].as_f64().unwrap(), 40.0);
    assert_eq!(body["stock"], 5);
    assert_eq!(body["providers"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_and_blank_skus_answer_400() {
    let app = build_app(gateway(Arc::new(AtomicUsize::new(0)))).await;

    let (status, body) = call(&app, Method::GET, "/api/parts/NOPE-999").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert_eq!(body["message"], "Part not found");

    let (status, body) = call(&app, Method::GET, "/api/parts/%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "SKU is required");
}

#[tokio::test]
async fn dead_providers_reduce_the_catalog_instead_of_failing_it() {
    let app = build_app(degraded_gateway()).await;

    let (status, body) = call(&app, Method::GET, "/api/parts/catalog").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["parts"][0]["sku"], "FLT-010");
}

#[tokio::test]
async fn catalog_is_cached_until_explicitly_cleared() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = build_app(gateway(hits.clone())).await;

    call(&app, Method::GET, "/api/parts/catalog").await;
    call(&app, Method::GET, "/api/parts/catalog?search=filtro").await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    let (status, _) = call(&app, Method::POST, "/api/parts/cache/clear").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    call(&app, Method::GET, "/api/parts/catalog").await;
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
