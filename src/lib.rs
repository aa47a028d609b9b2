//! # Product Catalog
//!
//! A small catalog service for products and the categories they belong to,
//! built on Clean Architecture principles.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Entities, typed ids and entity rules
//! - **Application**: Use cases, DTOs and repository ports
//! - **Infrastructure**: PostgreSQL and in-memory repositories
//! - **API**: HTTP handlers, middleware and OpenAPI docs
//!
//! ## Example Usage
//!
//! ```no_run
//! use product_catalog::{api::create_router, application::builder::ApplicationBuilder, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let state = ApplicationBuilder::new(Config::in_memory())
//!     .with_database()
//!     .await?
//!     .with_infrastructure()?
//!     .build()?;
//! let app = create_router(state);
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use api::errors as api_errors;
pub use application::{dto, errors, ports, use_cases};
pub use config::{Config, StorageBackend};
pub use domain::{entities, value_objects};
