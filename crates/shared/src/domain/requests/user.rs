use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(max = 50, message = "Name must be at most 50 characters"))]
    #[schema(example = "Jane Doe")]
    pub name: String,

    #[validate(length(max = 200, message = "Address must be at most 200 characters"))]
    #[schema(example = "221B Baker Street")]
    pub address: String,

    #[validate(length(max = 200, message = "Email must be at most 200 characters"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
}

/// Full replacement of a user's fields; the id comes from the path.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(max = 50, message = "Name must be at most 50 characters"))]
    #[schema(example = "Jane Doe")]
    pub name: String,

    #[validate(length(max = 200, message = "Address must be at most 200 characters"))]
    #[schema(example = "10 Downing Street")]
    pub address: String,

    #[validate(length(max = 200, message = "Email must be at most 200 characters"))]
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_values_longer_than_their_columns() {
        let req = CreateUserRequest {
            name: "x".repeat(51),
            address: "somewhere".into(),
            email: format!("{}@example.com", "a".repeat(190)),
        };

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(!fields.contains_key("address"));
    }

    #[test]
    fn only_column_lengths_are_enforced() {
        let req = UpdateUserRequest {
            name: String::new(),
            address: String::new(),
            email: "not-an-email".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn missing_field_fails_deserialization() {
        let parsed = serde_json::from_str::<UpdateUserRequest>(
            r#"{"name":"Jane","email":"jane@example.com"}"#,
        );
        assert!(parsed.is_err());
    }
}
