use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::errors::{ErrorResponse, FieldError};
use crate::api::handlers::health::{HealthResponse, ReadinessResponse};
use crate::application::dto::{
    CategoryDto, CreateCategoryRequest, CreateProductRequest, ProductDto, UpdateCategoryRequest,
    UpdateProductRequest,
};
use crate::application::errors::ErrorCode;

/// OpenAPI specification for the catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Catalog API",
        version = "1.0.0",
        description = "Products and the categories they belong to"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::readiness_handler,
        crate::api::handlers::products::create_product_handler,
        crate::api::handlers::products::list_products_handler,
        crate::api::handlers::products::get_product_handler,
        crate::api::handlers::products::update_product_handler,
        crate::api::handlers::products::delete_product_handler,
        crate::api::handlers::categories::create_category_handler,
        crate::api::handlers::categories::list_categories_handler,
        crate::api::handlers::categories::get_category_handler,
        crate::api::handlers::categories::update_category_handler,
        crate::api::handlers::categories::delete_category_handler,
    ),
    components(
        schemas(
            ProductDto,
            CategoryDto,
            CreateProductRequest,
            UpdateProductRequest,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            ErrorResponse,
            FieldError,
            ErrorCode,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "products", description = "Product management"),
        (name = "categories", description = "Category management")
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/api/docs`, document at `/api-docs/openapi.json`
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_catalog_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/products",
            "/products/{id}",
            "/categories",
            "/categories/{id}",
            "/health",
            "/health/ready",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}"
            );
        }
    }
}
