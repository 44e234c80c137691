//! OpenAPI documentation generation and serving.
//!
//! The generated document is served as JSON under `/docs/api.json`, with a
//! RapiDoc viewer at `/docs`.

use std::sync::Arc;

use aide::{
    axum::{ApiRouter, IntoApiResponse, routing::get},
    openapi::{OpenApi, Tag},
    transform::TransformOpenApi,
};
use axum::{
    Extension, Json,
    response::{Html, IntoResponse},
};

/// Serve the RapiDoc viewer for the generated document.
async fn serve_rapidoc() -> impl IntoApiResponse {
    let html = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <script src="https://cdnjs.cloudflare.com/ajax/libs/rapidoc/9.3.8/rapidoc-min.js" integrity="sha512-0ES6eX4K9J1PrIEjIizv79dTlN5HwI2GW9Ku6ymb8dijMHF5CIplkS8N0iFJ/wl3GybCSqBJu8HDhiFkZRAf0g==" crossorigin="anonymous" referrerpolicy="no-referrer"></script>
  </head>
  <body>
    <rapi-doc spec-url="/docs/api.json"
        show-method-in-nav-bar="as-colored-text"
        use-path-in-nav-bar="true"
        allow-authentication="false"
    ></rapi-doc>
  </body>
</html>"#;
    Html(html).into_response()
}

/// Routes for the documentation endpoints, nested under `/docs`.
pub(crate) fn docs_routes() -> ApiRouter {
    ApiRouter::new()
        .route("/", get(serve_rapidoc))
        .route("/api.json", get(serve_docs))
}

async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
    Json(api).into_response()
}

/// Document-level metadata and tags.
pub(crate) fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title("Product Feed API")
        .summary("Merchant product feed with validation and pluggable storage.")
        .description(
            "Submit products in batches, then read, update and remove them by id. \
             Discovery endpoints describe the merchant and the feed location.",
        )
        .version("0.1")
        .tag(Tag {
            name: "products".into(),
            description: Some("Batch submission and CRUD operations on products".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "discovery".into(),
            description: Some("Health and merchant profile".into()),
            ..Default::default()
        })
}
