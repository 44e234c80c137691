#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod product_routes;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::{
    Extension, Json,
    extract::State,
    handler::HandlerWithoutStateExt as _,
    http::{HeaderName, HeaderValue, StatusCode},
};
use feed_core::ports::{Application, CatalogRepository};
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::Arc;
use time::OffsetDateTime;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

/// The path the product routes are mounted under
pub const PRODUCT_FEED_PATH: &str = "/api/ucp/products";

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(inline)]
struct HealthResponse {
    status: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schemars(with = "String")]
    timestamp: OffsetDateTime,
    merchant_id: String,
}

/// Simple health check endpoint
async fn health_check<T: ApiApplication>(State(app): State<T>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: OffsetDateTime::now_utc(),
        merchant_id: app.merchant_id().to_owned(),
    })
}

/// Discovery document describing this feed
#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(inline)]
struct ProfileResponse {
    merchant_id: String,
    name: String,
    capabilities: Vec<String>,
    endpoints: ProfileEndpoints,
}

#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ProfileEndpoints {
    product_feed: String,
    health: String,
}

/// Describe the feed so that agents can discover it
async fn ucp_profile<T: ApiApplication>(State(app): State<T>) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        merchant_id: app.merchant_id().to_owned(),
        name: "Product Feed Service".to_string(),
        capabilities: vec![
            "product_feed".to_string(),
            "inventory_management".to_string(),
        ],
        endpoints: ProfileEndpoints {
            product_feed: PRODUCT_FEED_PATH.to_string(),
            health: "/health".to_string(),
        },
    })
}

/// Hardening headers added to every response that does not set them itself.
const SECURITY_HEADERS: [(&str, &str); 9] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-permitted-cross-domain-policies", "none"),
    ("x-xss-protection", "0"),
    ("referrer-policy", "no-referrer"),
    ("cross-origin-opener-policy", "same-origin"),
    ("strict-transport-security", "max-age=15552000; includeSubDomains"),
];

/// Answer unknown routes in the same envelope as every other failure.
async fn not_found() -> (StatusCode, Json<product_routes::MessageResponse>) {
    product_routes::failure(StatusCode::NOT_FOUND, "Not found")
}

/// Construct a full API router with the given state
pub fn router<T: ApiApplication>(state: T, config: &AxumConfig) -> axum::Router {
    let mut api = OpenApi::default();
    let mut router = ApiRouter::new()
        .api_route_with("/health", get(health_check::<T>), |route| {
            route.tag("discovery")
        })
        .api_route_with("/ucp/profile", get(ucp_profile::<T>), |route| {
            route.tag("discovery")
        })
        .nest(PRODUCT_FEED_PATH, product_routes::router())
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs)
        .fallback(not_found);

    if let Some(images) = &config.images_dir {
        router = router.nest_service(
            "/images",
            ServeDir::new(images).not_found_service(not_found.into_service()),
        );
    }

    let router = router
        .layer(Extension(Arc::new(api)))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    SECURITY_HEADERS
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            ))
        })
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let service = router(app, &config);
    axum::serve(listener, service).await
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything one might reasonably want to do should work.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<Repository: CatalogRepository + Send + Sync + 'static>
{
}

// this is the blanket implementation
impl<T: Clone + Send + Sync + 'static> ApiApplication for T where
    T: Application<Repository: CatalogRepository + Send + Sync + 'static>
{
}
