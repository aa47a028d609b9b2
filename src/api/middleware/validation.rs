use validator::Validate;

use crate::api::errors::ApiError;

/// Validate a payload, turning failures into a 400 invalid-data error
pub fn validate_and_respond<T>(payload: &T) -> Result<(), ApiError>
where
    T: Validate,
{
    payload
        .validate()
        .map_err(|validation_errors| ApiError::validation(&validation_errors))
}
