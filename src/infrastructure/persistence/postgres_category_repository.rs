use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::sql_errors::classify;
use crate::application::ports::{CategoryRepository, RepositoryError};
use crate::domain::entities::{Category, CategoryDbData, CategoryPatch};
use crate::domain::value_objects::CategoryId;

pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, category: &Category) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (id, name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(category.id().as_str())
        .bind(category.name())
        .bind(category.description())
        .bind(category.created_at())
        .bind(category.updated_at())
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.into_domain())
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_domain))
    }

    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_domain).collect())
    }

    async fn update(
        &self,
        id: &CategoryId,
        patch: &CategoryPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = $4
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(id.as_str())
        .bind(patch.name.as_deref())
        .bind(patch.description.as_deref())
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        row.map(CategoryRow::into_domain)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &CategoryId) -> Result<(), RepositoryError> {
        // products.category_id is ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_domain(self) -> Category {
        Category::from_db(CategoryDbData {
            id: CategoryId::from(self.id),
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
