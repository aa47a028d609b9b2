use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use crate::api::errors::{ApiError, ErrorResponse};
use crate::api::middleware::validation::validate_and_respond;
use crate::application::{
    dto::{CategoryDto, CreateCategoryRequest, UpdateCategoryRequest},
    use_cases::{
        CreateCategoryUseCase, DeleteCategoryUseCase, GetCategoryUseCase, ListCategoriesUseCase,
        UpdateCategoryUseCase,
    },
};

/// POST /categories
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryDto),
        (status = 400, description = "Invalid category data", body = ErrorResponse),
        (status = 409, description = "Category name already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_category_handler(
    State(use_case): State<Arc<CreateCategoryUseCase>>,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CategoryDto>), ApiError> {
    let Json(request) = payload?;
    validate_and_respond(&request)?;

    let category = use_case.execute(request).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Categories retrieved", body = [CategoryDto]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_categories_handler(
    State(use_case): State<Arc<ListCategoriesUseCase>>,
) -> Result<Json<Vec<CategoryDto>>, ApiError> {
    Ok(Json(use_case.execute().await?))
}

/// GET /categories/{id}
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category retrieved", body = CategoryDto),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_category_handler(
    State(use_case): State<Arc<GetCategoryUseCase>>,
    Path(category_id): Path<String>,
) -> Result<Json<CategoryDto>, ApiError> {
    Ok(Json(use_case.execute(&category_id).await?))
}

/// PUT /categories/{id}
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "categories",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryDto),
        (status = 400, description = "Invalid category data", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Category name already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_category_handler(
    State(use_case): State<Arc<UpdateCategoryUseCase>>,
    Path(category_id): Path<String>,
    payload: Result<Json<UpdateCategoryRequest>, JsonRejection>,
) -> Result<Json<CategoryDto>, ApiError> {
    let Json(request) = payload?;
    validate_and_respond(&request)?;

    Ok(Json(use_case.execute(&category_id, request).await?))
}

/// DELETE /categories/{id}
/// Removes the category and every product in it
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "categories",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category and its products deleted"),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_category_handler(
    State(use_case): State<Arc<DeleteCategoryUseCase>>,
    Path(category_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    use_case.execute(&category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
