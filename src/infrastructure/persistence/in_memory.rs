use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::application::ports::{CategoryRepository, ProductRepository, RepositoryError};
use crate::domain::entities::{
    Category, CategoryDbData, CategoryPatch, Product, ProductDbData, ProductPatch,
};
use crate::domain::value_objects::{CategoryId, ProductId};

use super::sql_errors::{DUPLICATE_VALUE, MISSING_REFERENCE};

#[derive(Default)]
struct CatalogState {
    // Vectors keep insertion order, which is the listing order.
    categories: Vec<Category>,
    products: Vec<Product>,
}

/// Process-local catalog backing both repository ports.
///
/// One lock covers both collections so a category delete and the removal of
/// its products happen atomically. Mirrors the PostgreSQL constraints: unique
/// category names and products referencing an existing category.
#[derive(Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogState {
    fn category_name_taken(&self, name: &str, except: Option<&CategoryId>) -> bool {
        self.categories
            .iter()
            .any(|c| c.name() == name && Some(c.id()) != except)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalog {
    async fn create(&self, category: &Category) -> Result<Category, RepositoryError> {
        let mut state = self.state.write();

        if state.categories.iter().any(|c| c.id() == category.id()) {
            return Err(RepositoryError::Conflict(DUPLICATE_VALUE.to_string()));
        }
        if state.category_name_taken(category.name(), None) {
            return Err(RepositoryError::Conflict(DUPLICATE_VALUE.to_string()));
        }

        state.categories.push(category.clone());
        Ok(category.clone())
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, RepositoryError> {
        let state = self.state.read();
        Ok(state.categories.iter().find(|c| c.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        Ok(self.state.read().categories.clone())
    }

    async fn update(
        &self,
        id: &CategoryId,
        patch: &CategoryPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Category, RepositoryError> {
        let mut state = self.state.write();

        if let Some(name) = &patch.name {
            if state.category_name_taken(name, Some(id)) {
                return Err(RepositoryError::Conflict(DUPLICATE_VALUE.to_string()));
            }
        }

        let slot = state
            .categories
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        let updated = Category::from_db(CategoryDbData {
            id: slot.id().clone(),
            name: patch.name.clone().unwrap_or_else(|| slot.name().to_string()),
            description: patch
                .description
                .clone()
                .or_else(|| slot.description().map(str::to_string)),
            created_at: *slot.created_at(),
            updated_at,
        });
        *slot = updated.clone();

        Ok(updated)
    }

    async fn delete(&self, id: &CategoryId) -> Result<(), RepositoryError> {
        let mut state = self.state.write();

        let before = state.categories.len();
        state.categories.retain(|c| c.id() != id);
        if state.categories.len() == before {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        state.products.retain(|p| p.category_id() != id);
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn create(&self, product: &Product) -> Result<Product, RepositoryError> {
        let mut state = self.state.write();

        if !state
            .categories
            .iter()
            .any(|c| c.id() == product.category_id())
        {
            return Err(RepositoryError::Conflict(MISSING_REFERENCE.to_string()));
        }
        if state.products.iter().any(|p| p.id() == product.id()) {
            return Err(RepositoryError::Conflict(DUPLICATE_VALUE.to_string()));
        }

        state.products.push(product.clone());
        Ok(product.clone())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let state = self.state.read();
        Ok(state.products.iter().find(|p| p.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.state.read().products.clone())
    }

    async fn find_by_category(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<Product>, RepositoryError> {
        let state = self.state.read();
        Ok(state
            .products
            .iter()
            .filter(|p| p.category_id() == category_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Product, RepositoryError> {
        let mut state = self.state.write();

        let slot = state
            .products
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        let updated = Product::from_db(ProductDbData {
            id: slot.id().clone(),
            name: patch.name.clone().unwrap_or_else(|| slot.name().to_string()),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| slot.description().to_string()),
            price: patch.price.unwrap_or(slot.price()),
            category_id: slot.category_id().clone(),
            image_url: match &patch.image_url {
                Some(image_url) => image_url.clone(),
                None => slot.image_url().map(str::to_string),
            },
            available: patch.available.unwrap_or(slot.available()),
            prep_time: patch.prep_time.unwrap_or(slot.prep_time()),
            created_at: *slot.created_at(),
            updated_at,
        });
        *slot = updated.clone();

        Ok(updated)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
        let mut state = self.state.write();

        let before = state.products.len();
        state.products.retain(|p| p.id() != id);
        if state.products.len() == before {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
