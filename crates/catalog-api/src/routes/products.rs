//! Routes for products, in both public versions.
//!
//! The version is fixed by the router a handler is mounted on; handlers pass
//! it to the query handlers as a type parameter.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use catalog_products::application::{command_handlers, query_handlers};
use catalog_products::domain::commands::{CreateProduct, DeleteProduct, UpdateProduct};
use catalog_products::domain::representation::{ProductV1, ProductV2};

use crate::base_url::RequestBaseUrl;
use crate::error::ApiError;
use crate::state::AppState;

/// Query string of listing endpoints.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// 1-based page number.
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

/// Query string of single-product endpoints.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    /// Product UUID.
    pub id: Uuid,
}

/// Request body for POST /product.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Product name.
    pub name: String,
    /// Product brand.
    pub brand: String,
    /// Initial stock.
    pub stock: u32,
    /// Seller UUID.
    pub seller: Uuid,
}

/// Request body for PUT /product.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    /// New name.
    pub name: String,
    /// New brand.
    pub brand: String,
    /// New stock.
    pub stock: u32,
}

/// GET /api/v1/products
#[instrument(skip(state))]
async fn list_v1(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<ProductV1>>, ApiError> {
    let offset = query_handlers::page_offset(query.page)?;
    let products =
        query_handlers::list_products(offset, query_handlers::PAGE_SIZE, &(), &*state.products)
            .await?;
    Ok(Json(products))
}

/// GET /api/v2/products
#[instrument(skip(state, base))]
async fn list_v2(
    State(state): State<AppState>,
    RequestBaseUrl(base): RequestBaseUrl,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<ProductV2>>, ApiError> {
    let offset = query_handlers::page_offset(query.page)?;
    let products =
        query_handlers::list_products(offset, query_handlers::PAGE_SIZE, &base, &*state.products)
            .await?;
    Ok(Json(products))
}

/// GET /api/v1/product?id=
#[instrument(skip(state), fields(product_uuid = %query.id))]
async fn get_v1(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<ProductV1>, ApiError> {
    let product = query_handlers::find_product(query.id, &(), &*state.products).await?;
    Ok(Json(product))
}

/// GET /api/v2/product?id=
#[instrument(skip(state, base), fields(product_uuid = %query.id))]
async fn get_v2(
    State(state): State<AppState>,
    RequestBaseUrl(base): RequestBaseUrl,
    Query(query): Query<IdQuery>,
) -> Result<Json<ProductV2>, ApiError> {
    let product = query_handlers::find_product(query.id, &base, &*state.products).await?;
    Ok(Json(product))
}

/// POST /api/v1/product
#[instrument(skip(state, request), fields(seller_uuid = %request.seller))]
async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<Json<ProductV1>, ApiError> {
    let command = CreateProduct {
        correlation_id: Uuid::new_v4(),
        name: request.name,
        brand: request.brand,
        stock: request.stock,
        seller_uuid: request.seller,
    };

    let product =
        command_handlers::handle_create_product(&command, &*state.products, &*state.sellers)
            .await?;
    Ok(Json(product))
}

/// PUT /api/v1/product?id=
#[instrument(skip(state, request), fields(product_uuid = %query.id))]
async fn update(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<ProductV1>, ApiError> {
    let command = UpdateProduct {
        correlation_id: Uuid::new_v4(),
        product_uuid: query.id,
        name: request.name,
        brand: request.brand,
        stock: request.stock,
    };

    let product = command_handlers::handle_update_product(
        &command,
        &*state.products,
        &*state.sellers,
        &*state.notifier,
    )
    .await?;
    Ok(Json(product))
}

/// DELETE /api/v1/product?id=
#[instrument(skip(state), fields(product_uuid = %query.id))]
async fn delete(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let command = DeleteProduct {
        correlation_id: Uuid::new_v4(),
        product_uuid: query.id,
    };

    command_handlers::handle_delete_product(&command, &*state.products).await?;
    Ok(Json(serde_json::json!({})))
}

/// Returns the v1 product router.
pub fn v1_router() -> Router<AppState> {
    Router::new().route("/products", get(list_v1)).route(
        "/product",
        get(get_v1).post(create).put(update).delete(delete),
    )
}

/// Returns the v2 product router.
pub fn v2_router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_v2))
        .route("/product", get(get_v2))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use catalog_core::repository::{ProductRepository, SellerRepository};
    use catalog_products::domain::links::BaseUrl;
    use catalog_test_support::{FailingProductRepository, InMemoryCatalog, RecordingNotifier};
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::routes::build_router;
    use crate::state::AppState;

    struct Harness {
        catalog: Arc<InMemoryCatalog>,
        notifier: Arc<RecordingNotifier>,
        seller: Uuid,
    }

    impl Harness {
        fn new() -> Self {
            let catalog = Arc::new(InMemoryCatalog::new());
            let seller = catalog.add_seller("seller@acme.test", "+15550100");
            Self {
                catalog,
                notifier: Arc::new(RecordingNotifier::new()),
                seller,
            }
        }

        fn app(&self) -> axum::Router {
            let state = AppState::new(
                Arc::clone(&self.catalog) as Arc<dyn ProductRepository>,
                Arc::clone(&self.catalog) as Arc<dyn SellerRepository>,
                self.notifier.clone(),
                BaseUrl::parse("https://api.example.com").unwrap(),
            );
            build_router(state, Duration::from_secs(5))
        }
    }

    fn failing_app() -> axum::Router {
        let state = AppState::new(
            Arc::new(FailingProductRepository),
            Arc::new(FailingProductRepository),
            Arc::new(RecordingNotifier::new()),
            BaseUrl::parse("https://api.example.com").unwrap(),
        );
        build_router(state, Duration::from_secs(5))
    }

    async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn with_json(method: &str, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_v1_returns_flat_product() {
        // Arrange
        let harness = Harness::new();
        let uuid = harness.catalog.add_product("Kettle", "Acme", 5, harness.seller);

        // Act
        let (status, json) = send(harness.app(), get(&format!("/api/v1/product?id={uuid}"))).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["uuid"], uuid.to_string());
        assert_eq!(json["seller_uuid"], harness.seller.to_string());
        assert!(json.get("seller").is_none());
        assert!(json.get("product_id").is_none());
    }

    #[tokio::test]
    async fn test_get_v2_links_seller_through_forwarded_host() {
        // Arrange
        let harness = Harness::new();
        let uuid = harness.catalog.add_product("Kettle", "Acme", 5, harness.seller);
        let request = Request::builder()
            .method("GET")
            .uri(format!("/api/v2/product?id={uuid}"))
            .header("x-forwarded-host", "shop.example.com")
            .header("x-forwarded-proto", "https")
            .body(Body::empty())
            .unwrap();

        // Act
        let (status, json) = send(harness.app(), request).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["seller"]["uuid"], harness.seller.to_string());
        assert_eq!(
            json["seller"]["_links"]["self"]["href"],
            format!("https://shop.example.com/api/v1/sellers/{}", harness.seller)
        );
        assert!(json.get("seller_uuid").is_none());
    }

    #[tokio::test]
    async fn test_get_absent_product_returns_404() {
        let harness = Harness::new();

        let (status, json) = send(
            harness.app(),
            get(&format!("/api/v1/product?id={}", Uuid::new_v4())),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "not_found");
    }

    #[tokio::test]
    async fn test_get_with_malformed_id_returns_400() {
        let harness = Harness::new();

        let (status, _) = send(harness.app(), get("/api/v1/product?id=not-a-uuid")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_pages_by_ten() {
        // Arrange
        let harness = Harness::new();
        for i in 0..12 {
            harness
                .catalog
                .add_product(&format!("Product {i}"), "Acme", i, harness.seller);
        }

        // Act
        let (first_status, first) = send(harness.app(), get("/api/v1/products")).await;
        let (second_status, second) = send(harness.app(), get("/api/v2/products?page=2")).await;

        // Assert
        assert_eq!(first_status, StatusCode::OK);
        assert_eq!(second_status, StatusCode::OK);
        assert_eq!(first.as_array().unwrap().len(), 10);
        let second = second.as_array().unwrap();
        assert_eq!(second.len(), 2);
        assert!(second[0]["seller"]["_links"]["self"]["href"].is_string());
    }

    #[tokio::test]
    async fn test_list_page_zero_returns_400() {
        let harness = Harness::new();

        let (status, json) = send(harness.app(), get("/api/v1/products?page=0")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_create_returns_product_with_fresh_uuid() {
        // Arrange
        let harness = Harness::new();
        let body = serde_json::json!({
            "name": "Kettle",
            "brand": "Acme",
            "stock": 4,
            "seller": harness.seller
        });

        // Act
        let (status, json) = send(harness.app(), with_json("POST", "/api/v1/product", &body)).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        let uuid = Uuid::parse_str(json["uuid"].as_str().unwrap()).unwrap();
        assert_eq!(harness.catalog.products()[0].uuid, uuid);
        assert_eq!(json["stock"], 4);
    }

    #[tokio::test]
    async fn test_create_with_unknown_seller_returns_400() {
        let harness = Harness::new();
        let body = serde_json::json!({
            "name": "Kettle",
            "brand": "Acme",
            "stock": 4,
            "seller": Uuid::new_v4()
        });

        let (status, json) = send(harness.app(), with_json("POST", "/api/v1/product", &body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_reference");
    }

    #[tokio::test]
    async fn test_create_with_negative_stock_is_rejected() {
        let harness = Harness::new();
        let body = serde_json::json!({
            "name": "Kettle",
            "brand": "Acme",
            "stock": -1,
            "seller": harness.seller
        });

        let (status, _) = send(harness.app(), with_json("POST", "/api/v1/product", &body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(harness.catalog.products().is_empty());
    }

    #[tokio::test]
    async fn test_update_stock_publishes_stock_change() {
        // Arrange
        let harness = Harness::new();
        let uuid = harness.catalog.add_product("Kettle", "Acme", 5, harness.seller);
        let body = serde_json::json!({ "name": "Kettle", "brand": "Acme", "stock": 3 });

        // Act
        let (status, json) = send(
            harness.app(),
            with_json("PUT", &format!("/api/v1/product?id={uuid}"), &body),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["stock"], 3);
        let received = harness.notifier.received();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].old_stock, 5);
        assert_eq!(received[0].new_stock, 3);
    }

    #[tokio::test]
    async fn test_update_name_only_publishes_nothing() {
        let harness = Harness::new();
        let uuid = harness.catalog.add_product("Kettle", "Acme", 5, harness.seller);
        let body = serde_json::json!({ "name": "Tea Kettle", "brand": "Acme", "stock": 5 });

        let (status, json) = send(
            harness.app(),
            with_json("PUT", &format!("/api/v1/product?id={uuid}"), &body),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Tea Kettle");
        assert!(harness.notifier.received().is_empty());
    }

    #[tokio::test]
    async fn test_delete_returns_empty_object_then_404() {
        // Arrange
        let harness = Harness::new();
        let uuid = harness.catalog.add_product("Kettle", "Acme", 5, harness.seller);
        let delete = |uuid: Uuid| {
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/product?id={uuid}"))
                .body(Body::empty())
                .unwrap()
        };

        // Act
        let (first_status, first) = send(harness.app(), delete(uuid)).await;
        let (second_status, _) = send(harness.app(), delete(uuid)).await;

        // Assert
        assert_eq!(first_status, StatusCode::OK);
        assert_eq!(first, serde_json::json!({}));
        assert_eq!(second_status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_v2_has_no_mutation_routes() {
        let harness = Harness::new();
        let body = serde_json::json!({
            "name": "Kettle",
            "brand": "Acme",
            "stock": 4,
            "seller": harness.seller
        });

        let (status, _) = send(harness.app(), with_json("POST", "/api/v2/product", &body)).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_repository_failure_returns_500() {
        let (status, json) = send(failing_app(), get("/api/v1/products")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "query_error");
    }
}
