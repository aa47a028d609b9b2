use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Price must be greater than zero")]
    NonPositivePrice,

    #[error("Invalid {entity} data")]
    InvalidEntity { entity: &'static str },
}
