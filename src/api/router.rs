use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::api::handlers::{
    create_category_handler, create_product_handler, delete_category_handler,
    delete_product_handler, get_category_handler, get_product_handler, health_handler,
    list_categories_handler, list_products_handler, readiness_handler, update_category_handler,
    update_product_handler,
};
use crate::api::middleware::{cors, request_logging};
use crate::api::openapi;
use crate::application::use_cases::{
    CreateCategoryUseCase, CreateProductUseCase, DeleteCategoryUseCase, DeleteProductUseCase,
    GetCategoryUseCase, GetProductUseCase, ListCategoriesUseCase, ListProductsUseCase,
    UpdateCategoryUseCase, UpdateProductUseCase,
};
use crate::config::Config;

/// Application state container
#[derive(Clone)]
pub struct AppState {
    /// `None` when running on the in-memory backend
    pub pool: Option<PgPool>,
    pub create_product_use_case: Arc<CreateProductUseCase>,
    pub list_products_use_case: Arc<ListProductsUseCase>,
    pub get_product_use_case: Arc<GetProductUseCase>,
    pub update_product_use_case: Arc<UpdateProductUseCase>,
    pub delete_product_use_case: Arc<DeleteProductUseCase>,
    pub create_category_use_case: Arc<CreateCategoryUseCase>,
    pub list_categories_use_case: Arc<ListCategoriesUseCase>,
    pub get_category_use_case: Arc<GetCategoryUseCase>,
    pub update_category_use_case: Arc<UpdateCategoryUseCase>,
    pub delete_category_use_case: Arc<DeleteCategoryUseCase>,
    pub config: Config,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let cors_layer = cors::create_cors_layer_for_environment(
        &state.config.environment,
        &state.config.allowed_origins,
    );
    let body_limit = RequestBodyLimitLayer::new(state.config.max_request_body_bytes);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/health/ready",
            get(readiness_handler).with_state(state.pool.clone()),
        )
        // Products
        .route(
            "/products",
            post(create_product_handler).with_state(state.create_product_use_case),
        )
        .route(
            "/products",
            get(list_products_handler).with_state(state.list_products_use_case),
        )
        .route(
            "/products/{id}",
            get(get_product_handler).with_state(state.get_product_use_case),
        )
        .route(
            "/products/{id}",
            put(update_product_handler).with_state(state.update_product_use_case),
        )
        .route(
            "/products/{id}",
            delete(delete_product_handler).with_state(state.delete_product_use_case),
        )
        // Categories
        .route(
            "/categories",
            post(create_category_handler).with_state(state.create_category_use_case),
        )
        .route(
            "/categories",
            get(list_categories_handler).with_state(state.list_categories_use_case),
        )
        .route(
            "/categories/{id}",
            get(get_category_handler).with_state(state.get_category_use_case),
        )
        .route(
            "/categories/{id}",
            put(update_category_handler).with_state(state.update_category_use_case),
        )
        .route(
            "/categories/{id}",
            delete(delete_category_handler).with_state(state.delete_category_use_case),
        )
        .merge(openapi::swagger_ui())
        .layer(body_limit)
        .layer(cors_layer)
        .layer(axum_middleware::from_fn(
            request_logging::request_logging_middleware,
        ))
}
