//! PostgreSQL repository tests using TestContainers
//!
//! Each test starts its own database container and applies the migrations.
//! They need a Docker daemon, so they are ignored by default:
//! `cargo test -- --ignored`.

use chrono::Utc;
use sqlx::PgPool;
use testcontainers_modules::{postgres::Postgres, testcontainers::runners::AsyncRunner};

use product_catalog::domain::entities::{Category, CategoryPatch, NewProduct, Product, ProductPatch};
use product_catalog::domain::value_objects::{CategoryId, ProductId};
use product_catalog::infrastructure::persistence::{
    PostgresCategoryRepository, PostgresProductRepository,
};
use product_catalog::ports::{CategoryRepository, ProductRepository, RepositoryError};

/// Test environment using TestContainers
struct TestEnvironment {
    products: PostgresProductRepository,
    categories: PostgresCategoryRepository,
    _container: testcontainers::ContainerAsync<Postgres>,
}

impl TestEnvironment {
    async fn new() -> Self {
        let container = Postgres::default()
            .start()
            .await
            .expect("Failed to start PostgreSQL container");

        let host = container.get_host().await.expect("Failed to get container host");
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get container port");
        let database_url = format!("postgres://postgres:postgres@{host}:{port}/postgres");

        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to test database");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            products: PostgresProductRepository::new(pool.clone()),
            categories: PostgresCategoryRepository::new(pool),
            _container: container,
        }
    }

    async fn category(&self, name: &str) -> Category {
        self.categories
            .create(&Category::new(name.to_string(), None))
            .await
            .expect("Failed to create category")
    }
}

fn product_in(category_id: &CategoryId, name: &str) -> Product {
    Product::new(NewProduct {
        name: name.to_string(),
        description: "Test product".to_string(),
        price: 9.99,
        prep_time: 12,
        category_id: category_id.clone(),
        image_url: Some("https://example.com/p.jpg".to_string()),
        available: true,
    })
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_product_round_trip() {
    let env = TestEnvironment::new().await;
    let burgers = env.category("Burgers").await;

    let created = env
        .products
        .create(&product_in(burgers.id(), "Burger"))
        .await
        .unwrap();
    let found = env.products.find_by_id(created.id()).await.unwrap().unwrap();

    assert_eq!(found.name(), "Burger");
    assert_eq!(found.price(), 9.99);
    assert_eq!(found.prep_time(), 12);
    assert_eq!(found.image_url(), Some("https://example.com/p.jpg"));
    assert_eq!(found.category_id(), burgers.id());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_find_by_category_and_find_all() {
    let env = TestEnvironment::new().await;
    let burgers = env.category("Burgers").await;
    let drinks = env.category("Drinks").await;

    env.products.create(&product_in(burgers.id(), "Burger")).await.unwrap();
    env.products.create(&product_in(drinks.id(), "Soda")).await.unwrap();
    env.products.create(&product_in(drinks.id(), "Juice")).await.unwrap();

    let all = env.products.find_all().await.unwrap();
    let only_drinks = env.products.find_by_category(drinks.id()).await.unwrap();

    assert_eq!(all.len(), 3);
    assert_eq!(only_drinks.len(), 2);
    assert!(only_drinks.iter().all(|p| p.category_id() == drinks.id()));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_partial_update_keeps_other_columns() {
    let env = TestEnvironment::new().await;
    let burgers = env.category("Burgers").await;
    let created = env
        .products
        .create(&product_in(burgers.id(), "Burger"))
        .await
        .unwrap();

    let patch = ProductPatch {
        price: Some(11.5),
        available: Some(false),
        ..Default::default()
    };
    let updated = env
        .products
        .update(created.id(), &patch, Utc::now())
        .await
        .unwrap();

    assert_eq!(updated.price(), 11.5);
    assert!(!updated.available());
    assert_eq!(updated.name(), "Burger");
    assert_eq!(updated.prep_time(), 12);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_patch_can_clear_image_url() {
    let env = TestEnvironment::new().await;
    let burgers = env.category("Burgers").await;
    let created = env
        .products
        .create(&product_in(burgers.id(), "Burger"))
        .await
        .unwrap();

    let kept = env
        .products
        .update(created.id(), &ProductPatch::default(), Utc::now())
        .await
        .unwrap();
    assert_eq!(kept.image_url(), Some("https://example.com/p.jpg"));

    let cleared = env
        .products
        .update(
            created.id(),
            &ProductPatch {
                image_url: Some(None),
                ..Default::default()
            },
            Utc::now(),
        )
        .await
        .unwrap();
    assert_eq!(cleared.image_url(), None);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_update_missing_product_is_not_found() {
    let env = TestEnvironment::new().await;

    let result = env
        .products
        .update(&ProductId::from("missing"), &ProductPatch::default(), Utc::now())
        .await;

    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_unique_category_name_is_conflict() {
    let env = TestEnvironment::new().await;
    env.category("Burgers").await;

    let result = env
        .categories
        .create(&Category::new("Burgers".to_string(), None))
        .await;

    assert!(matches!(
        result,
        Err(RepositoryError::Conflict(message)) if !message.contains("categories_name_key")
    ));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_product_with_missing_category_is_conflict() {
    let env = TestEnvironment::new().await;

    let result = env
        .products
        .create(&product_in(&CategoryId::from("ghost"), "Burger"))
        .await;

    assert!(matches!(result, Err(RepositoryError::Conflict(_))));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_category_rename_and_delete_cascade() {
    let env = TestEnvironment::new().await;
    let burgers = env.category("Burgers").await;
    env.products.create(&product_in(burgers.id(), "Burger")).await.unwrap();

    let renamed = env
        .categories
        .update(
            burgers.id(),
            &CategoryPatch {
                name: Some("Smash Burgers".to_string()),
                description: None,
            },
            Utc::now(),
        )
        .await
        .unwrap();
    assert_eq!(renamed.name(), "Smash Burgers");

    env.categories.delete(burgers.id()).await.unwrap();

    assert!(env.categories.find_by_id(burgers.id()).await.unwrap().is_none());
    assert!(env.products.find_all().await.unwrap().is_empty());
}
