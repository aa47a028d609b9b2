use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Unique identifier for a product
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct ProductId(String);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_new_creates_unique_ids() {
        assert_ne!(ProductId::new(), ProductId::new());
    }

    #[test]
    fn test_product_id_new_is_uuid_text() {
        let id = ProductId::new();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert!(!id.is_empty());
    }

    #[test]
    fn test_product_id_is_opaque() {
        let id = ProductId::from("prod-1");
        assert_eq!(id.to_string(), "prod-1");
    }

    #[test]
    fn test_product_id_serializes_as_plain_string() {
        let id = ProductId::from("prod-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"prod-1\"");

        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
