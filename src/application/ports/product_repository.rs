use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::entities::{Product, ProductPatch};
use crate::domain::value_objects::{CategoryId, ProductId};
#[cfg(test)]
use mockall::{automock, predicate::*};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Port for product persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product and return the stored record
    async fn create(&self, product: &Product) -> Result<Product, RepositoryError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;

    /// All products in creation order
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Products referencing the given category, in creation order
    async fn find_by_category(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<Product>, RepositoryError>;

    /// Apply a partial update and return the stored record
    async fn update(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Product, RepositoryError>;

    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError>;
}
