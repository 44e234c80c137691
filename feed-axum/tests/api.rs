use axum::http::StatusCode;
use axum_test::TestServer;
use feed_axum::{config::AxumConfig, router};
use feed_core::ports::CatalogRepository;
use rstest::rstest;
use rstest_reuse::apply;
use serde_json::{Value, json};
use std::{any::Any, future::Future};

mod app;
use app::TestApp;

mod backends;
use backends::*;

const PRODUCTS: &str = "/api/ucp/products";

fn product(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title}, freshly made"),
        "price": { "value": 29.99, "currency": "USD" },
        "availability": "in_stock",
        "link": format!("https://shop.example/{id}"),
        "image_link": format!("https://shop.example/{id}.png"),
        "brand": "Acme",
    })
}

fn server(db: impl CatalogRepository + 'static) -> TestServer {
    server_with(db, &AxumConfig::default())
}

fn server_with(db: impl CatalogRepository + 'static, config: &AxumConfig) -> TestServer {
    TestServer::new(router(TestApp::new(db, "merchant-42"), config)).unwrap()
}

#[apply(all_backends)]
async fn crud(
    #[case] backend: impl Future<Output = (impl CatalogRepository + 'static, Box<dyn Any>)>,
) {
    let (db, _guard) = backend.await;
    let server = server(db);

    // Submit two products
    let response = server
        .post(PRODUCTS)
        .json(&json!({ "products": [product("sku1", "Mug"), product("sku2", "Bowl")] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": true,
            "message": "All products processed successfully",
            "itemsProcessed": 2,
        })
    );

    // List them
    let response = server.get(PRODUCTS).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["count"], json!(2));
    assert_eq!(body["products"][0]["id"], json!("sku1"));
    assert_eq!(body["products"][1]["id"], json!("sku2"));

    // Read one back
    let response = server.get(&format!("{PRODUCTS}/sku1")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": true, "product": product("sku1", "Mug") })
    );

    // Update it; the id in the body is ignored
    let response = server
        .put(&format!("{PRODUCTS}/sku1"))
        .json(&json!({ "id": "sku9", "availability": "preorder", "condition": "new" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Product updated successfully"));
    assert_eq!(body["product"]["id"], json!("sku1"));
    assert_eq!(body["product"]["availability"], json!("preorder"));
    assert_eq!(body["product"]["condition"], json!("new"));
    assert_eq!(body["product"]["title"], json!("Mug"));

    let response = server.get(&format!("{PRODUCTS}/sku9")).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    // Delete it, twice
    let response = server.delete(&format!("{PRODUCTS}/sku1")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": true, "message": "Product deleted successfully" })
    );

    let response = server.delete(&format!("{PRODUCTS}/sku1")).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "message": "Product not found" })
    );

    let response = server.get(PRODUCTS).await;
    assert_eq!(response.json::<Value>()["count"], json!(1));
}

#[apply(all_backends)]
async fn partial_batch(
    #[case] backend: impl Future<Output = (impl CatalogRepository + 'static, Box<dyn Any>)>,
) {
    let (db, _guard) = backend.await;
    let server = server(db);

    let mut free = product("sku3", "Sample");
    free["price"]["value"] = json!(-5);

    let response = server
        .post(PRODUCTS)
        .json(&json!({
            "products": [product("sku1", "Mug"), { "id": "sku2" }, free, 17]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::MULTI_STATUS);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": false,
            "message": "Some products failed to process",
            "itemsProcessed": 1,
            "errors": [
                { "productId": "sku2", "error": "Product title is required and must be a string" },
                { "productId": "sku3", "error": "Product price must be a valid positive number" },
                { "error": "Product ID is required and must be a string" },
            ],
        })
    );

    let response = server.get(PRODUCTS).await;
    assert_eq!(response.json::<Value>()["count"], json!(1));
}

#[apply(all_backends)]
async fn malformed_requests(
    #[case] backend: impl Future<Output = (impl CatalogRepository + 'static, Box<dyn Any>)>,
) {
    let (db, _guard) = backend.await;
    let server = server(db);

    for body in [json!({ "products": { "id": "sku1" } }), json!({})] {
        let response = server.post(PRODUCTS).json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({ "success": false, "message": "Products must be an array" })
        );
    }

    server
        .post(PRODUCTS)
        .json(&json!({ "products": [product("sku1", "Mug")] }))
        .await;

    // A merged product that breaks the rules is rejected and nothing changes
    let response = server
        .put(&format!("{PRODUCTS}/sku1"))
        .json(&json!({ "title": "" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "message": "Product title is required and must be a string" })
    );

    let response = server.get(&format!("{PRODUCTS}/sku1")).await;
    assert_eq!(response.json::<Value>()["product"]["title"], json!("Mug"));

    let response = server
        .put(&format!("{PRODUCTS}/missing"))
        .json(&json!({ "title": "Anything" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn discovery() {
    let server = server(feed_local::MemoryDb::new());

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["merchantId"], json!("merchant-42"));
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(
        time::OffsetDateTime::parse(
            timestamp,
            &time::format_description::well_known::Rfc3339
        )
        .is_ok()
    );

    let response = server.get("/ucp/profile").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "merchantId": "merchant-42",
            "name": "Product Feed Service",
            "capabilities": ["product_feed", "inventory_management"],
            "endpoints": {
                "productFeed": "/api/ucp/products",
                "health": "/health",
            },
        })
    );
}

#[test_log::test(tokio::test)]
async fn docs_are_served() {
    let server = server(feed_local::MemoryDb::new());

    let response = server.get("/docs/api.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["info"]["title"], json!("Product Feed API"));
    assert!(body["paths"]["/api/ucp/products/{product_id}"].is_object());
}

#[apply(all_backends)]
async fn unparseable_bodies(
    #[case] backend: impl Future<Output = (impl CatalogRepository + 'static, Box<dyn Any>)>,
) {
    let (db, _guard) = backend.await;
    let server = server(db);

    // Not JSON at all, or JSON under the wrong content type
    let response = server
        .post(PRODUCTS)
        .bytes("{ oops".into())
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["success"], json!(false));
    assert!(response.json::<Value>()["message"].is_string());

    let response = server.post(PRODUCTS).text("products").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["success"], json!(false));

    // JSON, but not an object carrying a `products` array
    for body in [json!("nope"), json!([[product("sku7", "Cup")]]), json!(null)] {
        let response = server.post(PRODUCTS).json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({ "success": false, "message": "Products must be an array" })
        );
    }
    assert_eq!(server.get(PRODUCTS).await.json::<Value>()["count"], json!(0));

    server
        .post(PRODUCTS)
        .json(&json!({ "products": [product("sku1", "Mug")] }))
        .await;

    for body in [json!(["x"]), json!("Bowl"), json!(null)] {
        let response = server.put(&format!("{PRODUCTS}/sku1")).json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({ "success": false, "message": "Request body must be a JSON object" })
        );
    }

    let response = server
        .put(&format!("{PRODUCTS}/sku1"))
        .bytes("{ \"title\": ".into())
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["success"], json!(false));

    let response = server.get(&format!("{PRODUCTS}/sku1")).await;
    assert_eq!(response.json::<Value>()["product"]["title"], json!("Mug"));
}

#[test_log::test(tokio::test)]
async fn unknown_routes_answer_in_the_envelope() {
    let server = server(feed_local::MemoryDb::new());

    let response = server.get("/nowhere").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "message": "Not found" })
    );
}

#[test_log::test(tokio::test)]
async fn responses_carry_security_headers() {
    let server = server(feed_local::MemoryDb::new());

    for path in ["/health", PRODUCTS, "/nowhere"] {
        let response = server.get(path).await;
        assert_eq!(response.header("x-content-type-options"), "nosniff");
        assert_eq!(response.header("x-frame-options"), "SAMEORIGIN");
        assert_eq!(response.header("referrer-policy"), "no-referrer");
    }
}

#[test_log::test(tokio::test)]
async fn images_are_served_from_the_configured_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sku1.png"), b"not really a png").unwrap();
    let config = AxumConfig {
        images_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    let server = server_with(feed_local::MemoryDb::new(), &config);

    let response = server.get("/images/sku1.png").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "not really a png");
    assert_eq!(response.header("x-content-type-options"), "nosniff");

    let response = server.get("/images/sku2.png").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "message": "Not found" })
    );

    let server = server_with(
        feed_local::MemoryDb::new(),
        &AxumConfig {
            images_dir: None,
            ..Default::default()
        },
    );
    let response = server.get("/images/sku1.png").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
