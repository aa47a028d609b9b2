use std::sync::Arc;

use tracing::info;

use crate::application::{
    dto::{CategoryDto, CreateCategoryRequest, UpdateCategoryRequest},
    errors::CatalogError,
    ports::CategoryRepository,
};
use crate::domain::{
    entities::{Category, CategoryPatch},
    errors::DomainError,
    value_objects::CategoryId,
};

/// Use case for creating categories
pub struct CreateCategoryUseCase {
    category_repo: Arc<dyn CategoryRepository>,
}

impl CreateCategoryUseCase {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }

    pub async fn execute(
        &self,
        request: CreateCategoryRequest,
    ) -> Result<CategoryDto, CatalogError> {
        let category = Category::new(request.name, request.description);

        if !category.is_valid() {
            return Err(DomainError::InvalidEntity { entity: "category" }.into());
        }

        let created = self.category_repo.create(&category).await?;
        info!(category_id = %created.id(), name = %created.name(), "category created");

        Ok(created.into())
    }
}

/// Use case for listing every category
pub struct ListCategoriesUseCase {
    category_repo: Arc<dyn CategoryRepository>,
}

impl ListCategoriesUseCase {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }

    pub async fn execute(&self) -> Result<Vec<CategoryDto>, CatalogError> {
        let categories = self.category_repo.find_all().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }
}

pub struct GetCategoryUseCase {
    category_repo: Arc<dyn CategoryRepository>,
}

impl GetCategoryUseCase {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }

    pub async fn execute(&self, category_id: &str) -> Result<CategoryDto, CatalogError> {
        let id = CategoryId::from(category_id);

        let category = self
            .category_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Category", &id))?;

        Ok(category.into())
    }
}

/// Use case for updating categories
pub struct UpdateCategoryUseCase {
    category_repo: Arc<dyn CategoryRepository>,
}

impl UpdateCategoryUseCase {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }

    pub async fn execute(
        &self,
        category_id: &str,
        request: UpdateCategoryRequest,
    ) -> Result<CategoryDto, CatalogError> {
        let id = CategoryId::from(category_id);

        let mut category = self
            .category_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Category", &id))?;

        let patch = CategoryPatch::from(request);
        category.apply_patch(&patch);
        if !category.is_valid() {
            return Err(DomainError::InvalidEntity { entity: "category" }.into());
        }

        let updated = self
            .category_repo
            .update(&id, &patch, *category.updated_at())
            .await?;

        Ok(updated.into())
    }
}

/// Use case for deleting categories
///
/// Products referencing the category are removed with it.
pub struct DeleteCategoryUseCase {
    category_repo: Arc<dyn CategoryRepository>,
}

impl DeleteCategoryUseCase {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }

    pub async fn execute(&self, category_id: &str) -> Result<(), CatalogError> {
        let id = CategoryId::from(category_id);

        if self.category_repo.find_by_id(&id).await?.is_none() {
            return Err(CatalogError::not_found("Category", &id));
        }

        self.category_repo.delete(&id).await?;
        info!(category_id = %id, "category deleted");
        Ok(())
    }
}
