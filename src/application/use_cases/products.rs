use std::sync::Arc;

use tracing::info;

use crate::application::{
    dto::{CreateProductRequest, ProductDto, UpdateProductRequest},
    errors::CatalogError,
    ports::{CategoryRepository, ProductRepository},
};
use crate::domain::{
    entities::{NewProduct, Product, ProductPatch},
    errors::DomainError,
    value_objects::{CategoryId, ProductId},
};

/// Use case for creating products
pub struct CreateProductUseCase {
    product_repo: Arc<dyn ProductRepository>,
    category_repo: Arc<dyn CategoryRepository>,
}

impl CreateProductUseCase {
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        category_repo: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            product_repo,
            category_repo,
        }
    }

    pub async fn execute(&self, request: CreateProductRequest) -> Result<ProductDto, CatalogError> {
        let category_id = CategoryId::from(request.category_id);

        // 1. The referenced category must exist
        if self.category_repo.find_by_id(&category_id).await?.is_none() {
            return Err(CatalogError::not_found("Category", &category_id));
        }

        // 2. Build and validate the entity
        let product = Product::new(NewProduct {
            name: request.name,
            description: request.description,
            price: request.price,
            prep_time: request.prep_time,
            category_id,
            image_url: request.image_url,
            available: request.available.unwrap_or(true),
        });

        if !product.is_valid() {
            return Err(DomainError::InvalidEntity { entity: "product" }.into());
        }

        // 3. Persist
        let created = self.product_repo.create(&product).await?;
        info!(product_id = %created.id(), category_id = %created.category_id(), "product created");

        Ok(created.into())
    }
}

/// Use case for listing products, optionally restricted to one category
pub struct ListProductsUseCase {
    product_repo: Arc<dyn ProductRepository>,
}

impl ListProductsUseCase {
    pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(&self, category_id: Option<String>) -> Result<Vec<ProductDto>, CatalogError> {
        // An empty filter means no filter
        let products = match category_id.filter(|c| !c.is_empty()) {
            Some(category_id) => {
                self.product_repo
                    .find_by_category(&CategoryId::from(category_id))
                    .await?
            }
            None => self.product_repo.find_all().await?,
        };

        Ok(products.into_iter().map(Into::into).collect())
    }
}

/// Use case for getting a single product
pub struct GetProductUseCase {
    product_repo: Arc<dyn ProductRepository>,
}

impl GetProductUseCase {
    pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(&self, product_id: &str) -> Result<ProductDto, CatalogError> {
        let id = ProductId::from(product_id);

        let product = self
            .product_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Product", &id))?;

        Ok(product.into())
    }
}

/// Use case for updating products
pub struct UpdateProductUseCase {
    product_repo: Arc<dyn ProductRepository>,
}

impl UpdateProductUseCase {
    pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(
        &self,
        product_id: &str,
        request: UpdateProductRequest,
    ) -> Result<ProductDto, CatalogError> {
        let id = ProductId::from(product_id);

        let mut product = self
            .product_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Product", &id))?;

        // Dry-run the patch on the loaded copy so storage never sees an
        // invalid product.
        let patch = ProductPatch::from(request);
        product.apply_patch(&patch)?;
        if !product.is_valid() {
            return Err(DomainError::InvalidEntity { entity: "product" }.into());
        }

        let updated = self
            .product_repo
            .update(&id, &patch, *product.updated_at())
            .await?;

        Ok(updated.into())
    }
}

/// Use case for deleting products
pub struct DeleteProductUseCase {
    product_repo: Arc<dyn ProductRepository>,
}

impl DeleteProductUseCase {
    pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(&self, product_id: &str) -> Result<(), CatalogError> {
        let id = ProductId::from(product_id);

        if self.product_repo.find_by_id(&id).await?.is_none() {
            return Err(CatalogError::not_found("Product", &id));
        }

        self.product_repo.delete(&id).await?;
        info!(product_id = %id, "product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::ErrorCode;
    use crate::application::ports::{MockCategoryRepository, MockProductRepository, RepositoryError};
    use crate::domain::entities::Category;
    use mockall::predicate::*;

    fn create_request(category_id: &str) -> CreateProductRequest {
        CreateProductRequest {
            name: "Burger".to_string(),
            description: "Delicious beef burger".to_string(),
            price: 10.5,
            prep_time: 10,
            category_id: category_id.to_string(),
            image_url: None,
            available: None,
        }
    }

    fn test_product(category_id: &str) -> Product {
        Product::new(NewProduct {
            name: "Burger".to_string(),
            description: "Delicious beef burger".to_string(),
            price: 10.5,
            prep_time: 10,
            category_id: CategoryId::from(category_id),
            image_url: None,
            available: true,
        })
    }

    mod create_product_tests {
        use super::*;

        #[tokio::test]
        async fn test_create_product_success() {
            let mut category_repo = MockCategoryRepository::new();
            category_repo
                .expect_find_by_id()
                .with(eq(CategoryId::from("cat-1")))
                .times(1)
                .returning(|_| Ok(Some(Category::new("Burgers".to_string(), None))));

            let mut product_repo = MockProductRepository::new();
            product_repo
                .expect_create()
                .times(1)
                .returning(|product| Ok(product.clone()));

            let use_case =
                CreateProductUseCase::new(Arc::new(product_repo), Arc::new(category_repo));

            let product = use_case.execute(create_request("cat-1")).await.unwrap();

            assert_eq!(product.price, 10.5);
            assert!(!product.id.is_empty());
            assert_eq!(product.category_id, "cat-1");
            assert!(product.available);
        }

        #[tokio::test]
        async fn test_create_product_unknown_category() {
            let mut category_repo = MockCategoryRepository::new();
            category_repo
                .expect_find_by_id()
                .times(1)
                .returning(|_| Ok(None));

            let mut product_repo = MockProductRepository::new();
            product_repo.expect_create().times(0);

            let use_case =
                CreateProductUseCase::new(Arc::new(product_repo), Arc::new(category_repo));

            let err = use_case.execute(create_request("missing")).await.unwrap_err();

            assert_eq!(err.code(), ErrorCode::NotFound);
            assert!(err.to_string().contains("missing"));
        }

        #[tokio::test]
        async fn test_create_product_zero_price_is_invalid() {
            let mut category_repo = MockCategoryRepository::new();
            category_repo
                .expect_find_by_id()
                .times(1)
                .returning(|_| Ok(Some(Category::new("Burgers".to_string(), None))));

            let mut product_repo = MockProductRepository::new();
            product_repo.expect_create().times(0);

            let use_case =
                CreateProductUseCase::new(Arc::new(product_repo), Arc::new(category_repo));

            let request = CreateProductRequest {
                price: 0.0,
                ..create_request("cat-1")
            };
            let err = use_case.execute(request).await.unwrap_err();

            assert_eq!(err.code(), ErrorCode::InvalidData);
        }

        #[tokio::test]
        async fn test_create_product_respects_explicit_availability() {
            let mut category_repo = MockCategoryRepository::new();
            category_repo
                .expect_find_by_id()
                .returning(|_| Ok(Some(Category::new("Burgers".to_string(), None))));

            let mut product_repo = MockProductRepository::new();
            product_repo
                .expect_create()
                .withf(|product| !product.available())
                .times(1)
                .returning(|product| Ok(product.clone()));

            let use_case =
                CreateProductUseCase::new(Arc::new(product_repo), Arc::new(category_repo));

            let request = CreateProductRequest {
                available: Some(false),
                ..create_request("cat-1")
            };
            let product = use_case.execute(request).await.unwrap();

            assert!(!product.available);
        }

        #[tokio::test]
        async fn test_create_product_repository_error() {
            let mut category_repo = MockCategoryRepository::new();
            category_repo
                .expect_find_by_id()
                .returning(|_| Ok(Some(Category::new("Burgers".to_string(), None))));

            let mut product_repo = MockProductRepository::new();
            product_repo
                .expect_create()
                .times(1)
                .returning(|_| Err(RepositoryError::Database(sqlx::Error::PoolTimedOut)));

            let use_case =
                CreateProductUseCase::new(Arc::new(product_repo), Arc::new(category_repo));

            let err = use_case.execute(create_request("cat-1")).await.unwrap_err();

            assert_eq!(err.code(), ErrorCode::Unexpected);
        }
    }

    mod list_products_tests {
        use super::*;

        #[tokio::test]
        async fn test_list_all_products() {
            let products = vec![test_product("cat-1"), test_product("cat-2")];

            let mut product_repo = MockProductRepository::new();
            product_repo
                .expect_find_all()
                .times(1)
                .returning(move || Ok(products.clone()));
            product_repo.expect_find_by_category().times(0);

            let use_case = ListProductsUseCase::new(Arc::new(product_repo));

            let result = use_case.execute(None).await.unwrap();

            assert_eq!(result.len(), 2);
        }

        #[tokio::test]
        async fn test_list_products_by_category() {
            let products = vec![test_product("cat-1")];

            let mut product_repo = MockProductRepository::new();
            product_repo
                .expect_find_by_category()
                .with(eq(CategoryId::from("cat-1")))
                .times(1)
                .returning(move |_| Ok(products.clone()));
            product_repo.expect_find_all().times(0);

            let use_case = ListProductsUseCase::new(Arc::new(product_repo));

            let result = use_case.execute(Some("cat-1".to_string())).await.unwrap();

            assert_eq!(result.len(), 1);
            assert!(result.iter().all(|p| p.category_id == "cat-1"));
        }

        #[tokio::test]
        async fn test_list_products_empty_category_lists_all() {
            let products = vec![test_product("cat-1"), test_product("cat-2")];

            let mut product_repo = MockProductRepository::new();
            product_repo
                .expect_find_all()
                .times(1)
                .returning(move || Ok(products.clone()));
            product_repo.expect_find_by_category().times(0);

            let use_case = ListProductsUseCase::new(Arc::new(product_repo));

            let result = use_case.execute(Some(String::new())).await.unwrap();

            assert_eq!(result.len(), 2);
        }
    }

    mod get_product_tests {
        use super::*;

        #[tokio::test]
        async fn test_get_product_success() {
            let product = test_product("cat-1");
            let id = product.id().clone();

            let mut product_repo = MockProductRepository::new();
            product_repo
                .expect_find_by_id()
                .with(eq(id.clone()))
                .times(1)
                .returning(move |_| Ok(Some(product.clone())));

            let use_case = GetProductUseCase::new(Arc::new(product_repo));

            let result = use_case.execute(id.as_str()).await.unwrap();

            assert_eq!(result.id, id.to_string());
            assert_eq!(result.name, "Burger");
        }

        #[tokio::test]
        async fn test_get_product_not_found() {
            let mut product_repo = MockProductRepository::new();
            product_repo
                .expect_find_by_id()
                .times(1)
                .returning(|_| Ok(None));

            let use_case = GetProductUseCase::new(Arc::new(product_repo));

            let err = use_case.execute("prod-404").await.unwrap_err();

            assert_eq!(err.code(), ErrorCode::NotFound);
            assert_eq!(err.to_string(), "Product with ID prod-404 not found");
        }
    }

    mod update_product_tests {
        use super::*;

        #[tokio::test]
        async fn test_update_product_success() {
            let product = test_product("cat-1");
            let id = product.id().clone();
            let stored = product.clone();

            let mut product_repo = MockProductRepository::new();
            product_repo
                .expect_find_by_id()
                .times(1)
                .returning(move |_| Ok(Some(product.clone())));
            product_repo
                .expect_update()
                .withf(|_, patch, _| patch.name.as_deref() == Some("Cheeseburger"))
                .times(1)
                .returning(move |_, patch, updated_at| {
                    let mut updated = stored.clone();
                    updated.apply_patch(patch).unwrap();
                    assert!(&updated_at >= stored.updated_at());
                    Ok(updated)
                });

            let use_case = UpdateProductUseCase::new(Arc::new(product_repo));

            let request = UpdateProductRequest {
                name: Some("Cheeseburger".to_string()),
                ..Default::default()
            };
            let result = use_case.execute(id.as_str(), request).await.unwrap();

            assert_eq!(result.name, "Cheeseburger");
            assert_eq!(result.price, 10.5);
        }

        #[tokio::test]
        async fn test_update_product_not_found() {
            let mut product_repo = MockProductRepository::new();
            product_repo
                .expect_find_by_id()
                .times(1)
                .returning(|_| Ok(None));
            product_repo.expect_update().times(0);

            let use_case = UpdateProductUseCase::new(Arc::new(product_repo));

            let err = use_case
                .execute("prod-404", UpdateProductRequest::default())
                .await
                .unwrap_err();

            assert_eq!(err.code(), ErrorCode::NotFound);
        }

        #[tokio::test]
        async fn test_update_product_rejects_invalid_patch() {
            let product = test_product("cat-1");

            let mut product_repo = MockProductRepository::new();
            product_repo
                .expect_find_by_id()
                .times(1)
                .returning(move |_| Ok(Some(product.clone())));
            product_repo.expect_update().times(0);

            let use_case = UpdateProductUseCase::new(Arc::new(product_repo));

            let request = UpdateProductRequest {
                name: Some(String::new()),
                ..Default::default()
            };
            let err = use_case.execute("any", request).await.unwrap_err();

            assert_eq!(err.code(), ErrorCode::InvalidData);
        }

        #[tokio::test]
        async fn test_update_product_rejects_zero_price() {
            let product = test_product("cat-1");

            let mut product_repo = MockProductRepository::new();
            product_repo
                .expect_find_by_id()
                .returning(move |_| Ok(Some(product.clone())));
            product_repo.expect_update().times(0);

            let use_case = UpdateProductUseCase::new(Arc::new(product_repo));

            let request = UpdateProductRequest {
                price: Some(0.0),
                ..Default::default()
            };
            let err = use_case.execute("any", request).await.unwrap_err();

            assert_eq!(err.code(), ErrorCode::InvalidData);
            assert_eq!(err.to_string(), "Price must be greater than zero");
        }
    }

    mod delete_product_tests {
        use super::*;

        #[tokio::test]
        async fn test_delete_product_success() {
            let product = test_product("cat-1");
            let id = product.id().clone();

            let mut product_repo = MockProductRepository::new();
            product_repo
                .expect_find_by_id()
                .times(1)
                .returning(move |_| Ok(Some(product.clone())));
            product_repo
                .expect_delete()
                .with(eq(id.clone()))
                .times(1)
                .returning(|_| Ok(()));

            let use_case = DeleteProductUseCase::new(Arc::new(product_repo));

            assert!(use_case.execute(id.as_str()).await.is_ok());
        }

        #[tokio::test]
        async fn test_delete_product_not_found() {
            let mut product_repo = MockProductRepository::new();
            product_repo
                .expect_find_by_id()
                .times(1)
                .returning(|_| Ok(None));
            product_repo.expect_delete().times(0);

            let use_case = DeleteProductUseCase::new(Arc::new(product_repo));

            let err = use_case.execute("prod-404").await.unwrap_err();

            assert_eq!(err.code(), ErrorCode::NotFound);
        }
    }
}
