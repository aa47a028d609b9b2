use chrono::{DateTime, Duration, Utc};

use crate::domain::value_objects::CategoryId;

/// Data structure for reconstructing categories from storage
#[derive(Debug, Clone)]
pub struct CategoryDbData {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable category fields; `None` leaves the current value in place
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Category entity
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    id: CategoryId,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstruct from database data (used by repositories)
    pub fn from_db(db_data: CategoryDbData) -> Self {
        Self {
            id: db_data.id,
            name: db_data.name,
            description: db_data.description,
            created_at: db_data.created_at,
            updated_at: db_data.updated_at,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn apply_patch(&mut self, patch: &CategoryPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }

        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }

    pub fn id(&self) -> &CategoryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn updated_at(&self) -> &DateTime<Utc> {
        &self.updated_at
    }
}
