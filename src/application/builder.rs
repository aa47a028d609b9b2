use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::api::router::AppState;
use crate::application::{
    ports::{CategoryRepository, ProductRepository},
    use_cases::{
        CreateCategoryUseCase, CreateProductUseCase, DeleteCategoryUseCase, DeleteProductUseCase,
        GetCategoryUseCase, GetProductUseCase, ListCategoriesUseCase, ListProductsUseCase,
        UpdateCategoryUseCase, UpdateProductUseCase,
    },
};
use crate::config::{Config, StorageBackend};
use crate::infrastructure::persistence::{
    InMemoryCatalog, PostgresCategoryRepository, PostgresProductRepository,
};

type BuildError = Box<dyn std::error::Error + Send + Sync>;

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    pool: Option<PgPool>,
    product_repo: Option<Arc<dyn ProductRepository>>,
    category_repo: Option<Arc<dyn CategoryRepository>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pool: None,
            product_repo: None,
            category_repo: None,
        }
    }

    /// Initialize database connection pool with retry logic.
    ///
    /// Does nothing on the in-memory backend.
    pub async fn with_database(mut self) -> Result<Self, BuildError> {
        if self.config.storage_backend != StorageBackend::Postgres {
            return Ok(self);
        }

        info!("Connecting to database");

        // Retry connection with exponential backoff
        let mut retries = 3;
        let mut delay = Duration::from_secs(1);
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(self.config.db_max_connections)
                .min_connections(self.config.db_min_connections)
                .acquire_timeout(Duration::from_secs(self.config.db_acquire_timeout_secs))
                .idle_timeout(Some(Duration::from_secs(self.config.db_idle_timeout_secs)))
                .max_lifetime(Some(Duration::from_secs(self.config.db_max_lifetime_secs)))
                .connect(&self.config.database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) if retries > 0 => {
                    retries -= 1;
                    tracing::warn!(
                        "Database connection failed, retrying in {:?} ({} retries left): {}",
                        delay,
                        retries,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    tracing::error!("Failed to connect to database after retries: {}", e);
                    return Err(Box::new(e));
                }
            }
        };

        info!(
            "Database pool configured: max={}, min={}, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
            self.config.db_max_connections,
            self.config.db_min_connections,
            self.config.db_acquire_timeout_secs,
            self.config.db_idle_timeout_secs,
            self.config.db_max_lifetime_secs
        );

        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to run migrations: {}", e);
                e
            })?;

        self.pool = Some(pool);
        Ok(self)
    }

    /// Initialize the repositories for the configured backend
    pub fn with_infrastructure(mut self) -> Result<Self, BuildError> {
        match self.config.storage_backend {
            StorageBackend::Postgres => {
                let pool = self.pool.as_ref().ok_or("Database pool not initialized")?;
                let product_repo: Arc<dyn ProductRepository> =
                    Arc::new(PostgresProductRepository::new(pool.clone()));
                let category_repo: Arc<dyn CategoryRepository> =
                    Arc::new(PostgresCategoryRepository::new(pool.clone()));
                self.product_repo = Some(product_repo);
                self.category_repo = Some(category_repo);
            }
            StorageBackend::Memory => {
                // One store behind both ports so the category cascade sees the products
                let catalog = Arc::new(InMemoryCatalog::new());
                let product_repo: Arc<dyn ProductRepository> = catalog.clone();
                let category_repo: Arc<dyn CategoryRepository> = catalog;
                self.product_repo = Some(product_repo);
                self.category_repo = Some(category_repo);
            }
        }

        info!(backend = %self.config.storage_backend, "Infrastructure layer initialized");
        Ok(self)
    }

    /// Build application state with all use cases
    pub fn build(self) -> Result<AppState, BuildError> {
        let product_repo = self
            .product_repo
            .ok_or("Product repository not initialized")?;
        let category_repo = self
            .category_repo
            .ok_or("Category repository not initialized")?;

        let state = AppState {
            pool: self.pool,
            create_product_use_case: Arc::new(CreateProductUseCase::new(
                Arc::clone(&product_repo),
                Arc::clone(&category_repo),
            )),
            list_products_use_case: Arc::new(ListProductsUseCase::new(Arc::clone(&product_repo))),
            get_product_use_case: Arc::new(GetProductUseCase::new(Arc::clone(&product_repo))),
            update_product_use_case: Arc::new(UpdateProductUseCase::new(Arc::clone(
                &product_repo,
            ))),
            delete_product_use_case: Arc::new(DeleteProductUseCase::new(product_repo)),
            create_category_use_case: Arc::new(CreateCategoryUseCase::new(Arc::clone(
                &category_repo,
            ))),
            list_categories_use_case: Arc::new(ListCategoriesUseCase::new(Arc::clone(
                &category_repo,
            ))),
            get_category_use_case: Arc::new(GetCategoryUseCase::new(Arc::clone(&category_repo))),
            update_category_use_case: Arc::new(UpdateCategoryUseCase::new(Arc::clone(
                &category_repo,
            ))),
            delete_category_use_case: Arc::new(DeleteCategoryUseCase::new(category_repo)),
            config: self.config,
        };

        info!("Application layer initialized");
        Ok(state)
    }
}
