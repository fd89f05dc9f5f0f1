use serde::Serialize;
use validator::Validate;

use crate::api::errors::ApiError;

/// Field error details
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Validate a payload, turning failures into a 422 [`ApiError`]
pub fn validate_and_respond<T>(payload: &T) -> Result<(), ApiError>
where
    T: Validate,
{
    payload.validate().map_err(|validation_errors| {
        let mut field_errors: Vec<FieldError> = validation_errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|cow| cow.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();
        // HashMap order is not stable
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        ApiError::validation(field_errors)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::ProductRequest;
    use axum::http::StatusCode;

    #[test]
    fn test_valid_payload_passes() {
        let request = ProductRequest {
            title: "Desk Lamp".to_string(),
            price: 20.0,
            description: None,
            category_id: 10,
            image: None,
        };
        assert!(validate_and_respond(&request).is_ok());
    }

    #[test]
    fn test_invalid_payload_is_unprocessable() {
        let request = ProductRequest {
            title: String::new(),
            price: -2.0,
            description: None,
            category_id: 0,
            image: None,
        };

        let err = validate_and_respond(&request).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message(), "Validation failed");
    }
}
