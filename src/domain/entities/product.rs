use chrono::{DateTime, Duration, Utc};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{CategoryId, ProductId};

/// Fields supplied by a caller when a product is first created
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub prep_time: i32,
    pub category_id: CategoryId,
    pub image_url: Option<String>,
    pub available: bool,
}

/// Data structure for reconstructing products from storage
#[derive(Debug, Clone)]
pub struct ProductDbData {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: CategoryId,
    pub image_url: Option<String>,
    pub available: bool,
    pub prep_time: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable product fields; `None` leaves the current value in place
///
/// `image_url` is `Some(None)` when the image should be cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub prep_time: Option<i32>,
    pub image_url: Option<Option<String>>,
    pub available: Option<bool>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Product entity
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: f64,
    category_id: CategoryId,
    image_url: Option<String>,
    available: bool,
    prep_time: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a product with a fresh id and current timestamps.
    ///
    /// No validation happens here; callers check [`Product::is_valid`].
    pub fn new(data: NewProduct) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(),
            name: data.name,
            description: data.description,
            price: data.price,
            category_id: data.category_id,
            image_url: data.image_url,
            available: data.available,
            prep_time: data.prep_time,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstruct from database data (used by repositories)
    pub fn from_db(db_data: ProductDbData) -> Self {
        Self {
            id: db_data.id,
            name: db_data.name,
            description: db_data.description,
            price: db_data.price,
            category_id: db_data.category_id,
            image_url: db_data.image_url,
            available: db_data.available,
            prep_time: db_data.prep_time,
            created_at: db_data.created_at,
            updated_at: db_data.updated_at,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
            && self.price > 0.0
            && !self.category_id.is_empty()
            && self.prep_time > 0
    }

    pub fn update_price(&mut self, new_price: f64) -> Result<(), DomainError> {
        if new_price.is_nan() || new_price <= 0.0 {
            return Err(DomainError::NonPositivePrice);
        }
        self.price = new_price;
        self.touch();
        Ok(())
    }

    pub fn toggle_availability(&mut self) {
        self.available = !self.available;
        self.touch();
    }

    /// Apply a partial update field by field.
    ///
    /// The price goes through [`Product::update_price`] first, so a rejected
    /// price leaves every field untouched. The result may still fail
    /// [`Product::is_valid`] (an empty name, for instance).
    pub fn apply_patch(&mut self, patch: &ProductPatch) -> Result<(), DomainError> {
        if let Some(price) = patch.price {
            self.update_price(price)?;
        }
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(prep_time) = patch.prep_time {
            self.prep_time = prep_time;
        }
        if let Some(image_url) = &patch.image_url {
            self.image_url = image_url.clone();
        }
        if let Some(available) = patch.available {
            self.available = available;
        }
        self.touch();
        Ok(())
    }

    // updated_at must move forward even when the clock has not ticked
    fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }

    // Getters
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn available(&self) -> bool {
        self.available
    }

    pub fn prep_time(&self) -> i32 {
        self.prep_time
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn updated_at(&self) -> &DateTime<Utc> {
        &self.updated_at
    }
}
