use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use crate::api::errors::{ApiError, ErrorResponse};
use crate::api::middleware::validation::validate_and_respond;
use crate::application::{
    dto::{CreateProductRequest, ListProductsQuery, ProductDto, UpdateProductRequest},
    use_cases::{
        CreateProductUseCase, DeleteProductUseCase, GetProductUseCase, ListProductsUseCase,
        UpdateProductUseCase,
    },
};

/// POST /products
/// Create a product in an existing category
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductDto),
        (status = 400, description = "Invalid product data", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Resource conflict", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_product_handler(
    State(use_case): State<Arc<CreateProductUseCase>>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductDto>), ApiError> {
    let Json(request) = payload?;
    validate_and_respond(&request)?;

    let product = use_case.execute(request).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products
/// List products, optionally filtered by category
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "Products retrieved", body = [ProductDto]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_products_handler(
    State(use_case): State<Arc<ListProductsUseCase>>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<Vec<ProductDto>>, ApiError> {
    let products = use_case.execute(query.category_id).await?;
    Ok(Json(products))
}

/// GET /products/{id}
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product retrieved", body = ProductDto),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_product_handler(
    State(use_case): State<Arc<GetProductUseCase>>,
    Path(product_id): Path<String>,
) -> Result<Json<ProductDto>, ApiError> {
    let product = use_case.execute(&product_id).await?;
    Ok(Json(product))
}

/// PUT /products/{id}
/// Partial update; absent fields keep their values
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductDto),
        (status = 400, description = "Invalid product data", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_product_handler(
    State(use_case): State<Arc<UpdateProductUseCase>>,
    Path(product_id): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductDto>, ApiError> {
    let Json(request) = payload?;
    validate_and_respond(&request)?;

    let product = use_case.execute(&product_id, request).await?;
    Ok(Json(product))
}

/// DELETE /products/{id}
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_product_handler(
    State(use_case): State<Arc<DeleteProductUseCase>>,
    Path(product_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    use_case.execute(&product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
