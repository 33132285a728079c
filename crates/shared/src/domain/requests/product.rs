use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Upper bound for a `NUMERIC(10,2)` column: eight integer digits.
const MAX_PRICE_EXCLUSIVE: i64 = 100_000_000;

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("range").with_message("Price cannot be negative".into()));
    }

    if price.normalize().scale() > 2 {
        return Err(ValidationError::new("scale")
            .with_message("Price must have at most two decimal places".into()));
    }

    if *price >= Decimal::from(MAX_PRICE_EXCLUSIVE) {
        return Err(
            ValidationError::new("range").with_message("Price must be below 100000000".into())
        );
    }

    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(max = 100, message = "Product name must be at most 100 characters"))]
    #[schema(example = "Mechanical Keyboard")]
    pub product_name: String,

    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String, example = "129.99")]
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(max = 100, message = "Product name must be at most 100 characters"))]
    #[schema(example = "Mechanical Keyboard")]
    pub product_name: String,

    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String, example = "119.99")]
    pub price: Decimal,
}
