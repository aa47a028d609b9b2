mod in_memory;
mod postgres_category_repository;
mod postgres_product_repository;
mod sql_errors;

pub use in_memory::InMemoryCatalog;
pub use postgres_category_repository::PostgresCategoryRepository;
pub use postgres_product_repository::PostgresProductRepository;
