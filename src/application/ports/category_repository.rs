use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RepositoryError;
use crate::domain::entities::{Category, CategoryPatch};
use crate::domain::value_objects::CategoryId;
#[cfg(test)]
use mockall::{automock, predicate::*};

/// Port for category persistence operations
///
/// Category names are unique; implementations report a duplicate as
/// [`RepositoryError::Conflict`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: &Category) -> Result<Category, RepositoryError>;

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError>;

    async fn update(
        &self,
        id: &CategoryId,
        patch: &CategoryPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Category, RepositoryError>;

    /// Delete a category together with the products that reference it
    async fn delete(&self, id: &CategoryId) -> Result<(), RepositoryError>;
}
