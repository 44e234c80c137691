//! REST API endpoints for product operations.
//!
//! These routes map the catalog operations onto HTTP. Every response body
//! carries a `success` flag; failures carry a `message` alongside it.

use crate::ApiApplication;
use aide::{
    axum::{
        ApiRouter,
        routing::{get, get_with},
    },
    transform::TransformOperation,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use feed_core::{
    UpdateError,
    models::{BatchOutcome, Product, ProductDraft},
};
use serde_json::Value;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// Path parameter for product-specific endpoints.
#[derive(Deserialize, JsonSchema)]
#[schemars(inline)]
struct Id {
    /// The unique identifier of the product
    product_id: String,
}

/// A bare status report, used for deletions and for every failure.
#[derive(Serialize, JsonSchema)]
pub(crate) struct MessageResponse {
    success: bool,
    message: String,
}

/// A single product.
#[derive(Serialize, JsonSchema)]
struct ProductResponse {
    success: bool,
    product: Product,
}

/// Every product in the catalog.
#[derive(Serialize, JsonSchema)]
struct ProductListResponse {
    success: bool,
    count: usize,
    products: Vec<Product>,
}

/// The stored result of an update.
#[derive(Serialize, JsonSchema)]
struct UpdateResponse {
    success: bool,
    message: String,
    product: Product,
}

pub(crate) type Failure = (StatusCode, Json<MessageResponse>);

pub(crate) fn failure(status: StatusCode, message: impl Into<String>) -> Failure {
    (
        status,
        Json(MessageResponse {
            success: false,
            message: message.into(),
        }),
    )
}

fn not_found() -> Failure {
    failure(StatusCode::NOT_FOUND, "Product not found")
}

/// Unwrap a JSON body, answering in the failure envelope when it does not parse.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, Failure> {
    body.map(|Json(value)| value)
        .map_err(|rejection| failure(StatusCode::BAD_REQUEST, rejection.body_text()))
}

/// Creates a router with product-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get_with(list_products::<T>, list_products_docs)
                .post_with(add_products::<T>, add_products_docs),
            |route| route.tag("products"),
        )
        .api_route_with(
            "/{product_id}",
            get(read_product::<T>)
                .put_with(update_product::<T>, update_product_docs)
                .delete(delete_product::<T>),
            |route| route.tag("products"),
        )
}

/// Validate and store a batch of products.
///
/// Each item is validated and stored independently; one bad item never
/// prevents the others from being stored.
///
/// # Returns
///
/// - `200 OK`: Every item was stored
/// - `207 Multi-Status`: Some items were rejected, see `errors`
/// - `400 Bad Request`: The body is not JSON, or `products` is not an array
/// - `500 Internal Server Error`: The catalog could not be persisted
async fn add_products<T: ApiApplication>(
    State(app): State<T>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<BatchOutcome>), Failure> {
    let mut body = json_body(body)?;
    let Some(Value::Array(items)) = body.get_mut("products").map(Value::take) else {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "Products must be an array",
        ));
    };

    let outcome = app
        .catalog()
        .add_products(items.into_iter().map(ProductDraft).collect())
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            failure(StatusCode::INTERNAL_SERVER_ERROR, "failed to store products")
        })?;

    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };
    Ok((status, Json(outcome)))
}

/// List every product in the catalog.
async fn list_products<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<ProductListResponse>, Failure> {
    let products = app.catalog().get_all_products().await.map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        failure(StatusCode::INTERNAL_SERVER_ERROR, "failed to list products")
    })?;

    Ok(Json(ProductListResponse {
        success: true,
        count: products.len(),
        products,
    }))
}

/// Retrieve a product.
///
/// # Returns
///
/// - `200 OK`: Product data
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database query failed
async fn read_product<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { product_id }): Path<Id>,
) -> Result<Json<ProductResponse>, Failure> {
    let product = app
        .catalog()
        .get_product(&product_id)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to get product {}", product_id),
            )
        })?
        .ok_or_else(not_found)?;

    Ok(Json(ProductResponse {
        success: true,
        product,
    }))
}

/// Merge the given fields into an existing product.
///
/// The product keeps its id, whatever the body says.
///
/// # Returns
///
/// - `200 OK`: The updated product
/// - `400 Bad Request`: The body is not a JSON object, or the merged product is invalid
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
async fn update_product<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { product_id }): Path<Id>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdateResponse>, Failure> {
    let Value::Object(patch) = json_body(body)? else {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "Request body must be a JSON object",
        ));
    };

    let product = app
        .catalog()
        .update_product(&product_id, patch)
        .await
        .map_err(|err| match err {
            UpdateError::Invalid(err) => failure(StatusCode::BAD_REQUEST, err.to_string()),
            UpdateError::Repository(err) => {
                event!(Level::ERROR, err = err.to_string());
                failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("failed to update product {}", product_id),
                )
            }
        })?
        .ok_or_else(not_found)?;

    Ok(Json(UpdateResponse {
        success: true,
        message: "Product updated successfully".to_string(),
        product,
    }))
}

/// Remove a product from the catalog.
///
/// # Returns
///
/// - `200 OK`: Product deleted
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
async fn delete_product<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { product_id }): Path<Id>,
) -> Result<Json<MessageResponse>, Failure> {
    let deleted = app
        .catalog()
        .delete_product(&product_id)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to delete product {}", product_id),
            )
        })?;

    if !deleted {
        return Err(not_found());
    }

    Ok(Json(MessageResponse {
        success: true,
        message: "Product deleted successfully".to_string(),
    }))
}

fn list_products_docs(op: TransformOperation<'_>) -> TransformOperation<'_> {
    op.summary("List products")
        .description("Return every product in the catalog, with a count.")
        .response_with::<500, Json<MessageResponse>, _>(|res| {
            res.description("Database query failed")
        })
}

fn add_products_docs(op: TransformOperation<'_>) -> TransformOperation<'_> {
    op.summary("Submit products")
        .description(
            r#"
            Validate and store a batch of products. Items are processed
            independently: valid items are stored (overwriting any product
            with the same id) even when others are rejected.
            "#,
        )
        .response_with::<207, Json<BatchOutcome>, _>(|res| {
            res.description("Some items were rejected")
        })
        .response_with::<400, Json<MessageResponse>, _>(|res| {
            res.description("The body is not JSON, or `products` is not an array")
        })
}

fn update_product_docs(op: TransformOperation<'_>) -> TransformOperation<'_> {
    op.summary("Update product")
        .description(
            r#"
            Overlay the given top-level fields onto a product. Nested objects
            such as `price` are replaced whole. The merged product must pass
            the same validation as a new one.
            "#,
        )
        .response_with::<400, Json<MessageResponse>, _>(|res| {
            res.description("The merged product is invalid")
        })
        .response_with::<404, Json<MessageResponse>, _>(|res| {
            res.description("Product does not exist")
        })
}
