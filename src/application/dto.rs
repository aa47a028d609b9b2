use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::entities::{Category, CategoryPatch, Product, ProductPatch};

/// DTO for product responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub available: bool,
    /// Preparation time in minutes
    pub prep_time: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.name().to_string(),
            description: product.description().to_string(),
            price: product.price(),
            category_id: product.category_id().to_string(),
            image_url: product.image_url().map(|u| u.to_string()),
            available: product.available(),
            prep_time: product.prep_time(),
            created_at: product.created_at().to_rfc3339(),
            updated_at: product.updated_at().to_rfc3339(),
        }
    }
}

/// DTO for category responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id().to_string(),
            name: category.name().to_string(),
            description: category.description().map(|d| d.to_string()),
            created_at: category.created_at().to_rfc3339(),
            updated_at: category.updated_at().to_rfc3339(),
        }
    }
}

/// Request to create a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProductRequest {
    #[validate(length(max = 255, message = "name must be at most 255 characters"))]
    #[schema(example = "Hamburger")]
    pub name: String,

    #[schema(example = "Delicious beef burger")]
    pub description: String,

    #[validate(range(min = 0.0, message = "price must not be negative"))]
    #[schema(example = 15.99, minimum = 0)]
    pub price: f64,

    /// Preparation time in minutes
    #[validate(range(min = 1, message = "prepTime must be at least 1 minute"))]
    #[schema(example = 15, minimum = 1)]
    pub prep_time: i32,

    #[validate(length(max = 255, message = "categoryId must be at most 255 characters"))]
    pub category_id: String,

    #[validate(length(max = 2048, message = "imageUrl must be at most 2048 characters"))]
    #[schema(example = "https://example.com/image.jpg")]
    pub image_url: Option<String>,

    /// Defaults to true
    pub available: Option<bool>,
}

/// Request to update a product; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProductRequest {
    #[validate(length(max = 255, message = "name must be at most 255 characters"))]
    #[schema(example = "Cheeseburger")]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "price must not be negative"))]
    #[schema(example = 17.99)]
    pub price: Option<f64>,

    #[validate(range(min = 1, message = "prepTime must be at least 1 minute"))]
    pub prep_time: Option<i32>,

    /// `null` clears the image, an absent key keeps it
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(max = 2048, message = "imageUrl must be at most 2048 characters"))]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,

    pub available: Option<bool>,
}

// Only called when the key is present, so `null` becomes `Some(None)`
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(request: UpdateProductRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            price: request.price,
            prep_time: request.prep_time,
            image_url: request.image_url,
            available: request.available,
        }
    }
}

/// Request to create a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCategoryRequest {
    #[validate(length(max = 255, message = "name must be at most 255 characters"))]
    #[schema(example = "Burgers")]
    pub name: String,

    #[schema(example = "All types of burgers")]
    pub description: Option<String>,
}

/// Request to update a category; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCategoryRequest {
    #[validate(length(max = 255, message = "name must be at most 255 characters"))]
    pub name: Option<String>,

    pub description: Option<String>,
}

impl From<UpdateCategoryRequest> for CategoryPatch {
    fn from(request: UpdateCategoryRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
        }
    }
}

/// Query parameters for listing products
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    /// Filter products by category ID
    pub category_id: Option<String>,
}
