use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::sql_errors::classify;
use crate::application::ports::{ProductRepository, RepositoryError};
use crate::domain::entities::{Product, ProductDbData, ProductPatch};
use crate::domain::value_objects::{CategoryId, ProductId};

const PRODUCT_COLUMNS: &str = "id, name, description, price, category_id, image_url, \
                               available, prep_time, created_at, updated_at";

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: &Product) -> Result<Product, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO products (
                id, name, description, price, category_id, image_url,
                available, prep_time, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(product.id().as_str())
            .bind(product.name())
            .bind(product.description())
            .bind(product.price())
            .bind(product.category_id().as_str())
            .bind(product.image_url())
            .bind(product.available())
            .bind(product.prep_time())
            .bind(product.created_at())
            .bind(product.updated_at())
            .fetch_one(&self.pool)
            .await
            .map_err(classify)?;

        Ok(row.into_domain())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ProductRow::into_domain))
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at, id");

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ProductRow::into_domain).collect())
    }

    async fn find_by_category(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE category_id = $1 ORDER BY created_at, id"
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(category_id.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ProductRow::into_domain).collect())
    }

    async fn update(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Product, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                prep_time = COALESCE($5, prep_time),
                image_url = CASE WHEN $6 THEN $7 ELSE image_url END,
                available = COALESCE($8, available),
                updated_at = $9
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.as_str())
            .bind(patch.name.as_deref())
            .bind(patch.description.as_deref())
            .bind(patch.price)
            .bind(patch.prep_time)
            .bind(patch.image_url.is_some())
            .bind(patch.image_url.clone().flatten())
            .bind(patch.available)
            .bind(updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;

        row.map(ProductRow::into_domain)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

// Internal row mapping struct
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: String,
    price: f64,
    category_id: String,
    image_url: Option<String>,
    available: bool,
    prep_time: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_domain(self) -> Product {
        Product::from_db(ProductDbData {
            id: ProductId::from(self.id),
            name: self.name,
            description: self.description,
            price: self.price,
            category_id: CategoryId::from(self.category_id),
            image_url: self.image_url,
            available: self.available,
            prep_time: self.prep_time,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
