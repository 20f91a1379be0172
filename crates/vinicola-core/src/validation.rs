//! # Validation Module
//!
//! Input parsing for the catalog form.
//!
//! The only checked field is price: it arrives as free text from the view
//! layer and must become an `f64` before a product can be created. Name and
//! strength are stored exactly as typed.
//!
//! ## Usage
//! ```rust
//! use vinicola_core::validation::{parse_new_product, parse_price};
//!
//! assert_eq!(parse_price("12.5").unwrap(), 12.5);
//! assert!(parse_price("abc").is_err());
//!
//! let wine = parse_new_product("Malbec", "13%", "45.0").unwrap();
//! assert_eq!(wine.price, 45.0);
//! ```

use crate::error::ValidationError;
use crate::types::NewProduct;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Parses price text typed by the user.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Decimal point only (`"12,5"` is rejected)
/// - NaN and infinities are rejected (the store column is `NOT NULL REAL`)
///
/// ## Example
/// ```rust
/// use vinicola_core::validation::parse_price;
///
/// assert_eq!(parse_price(" 45 ").unwrap(), 45.0);
/// assert!(parse_price("").is_err());
/// assert!(parse_price("NaN").is_err());
/// ```
pub fn parse_price(text: &str) -> ValidationResult<f64> {
    let trimmed = text.trim();

    let price: f64 = trimmed.parse().map_err(|_| ValidationError::InvalidNumber {
        field: "price".to_string(),
        value: text.to_string(),
    })?;

    if !price.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "price".to_string(),
            value: text.to_string(),
        });
    }

    Ok(price)
}

/// Builds a [`NewProduct`] from the three catalog form fields.
pub fn parse_new_product(
    name: &str,
    alcohol_content: &str,
    price_text: &str,
) -> ValidationResult<NewProduct> {
    let price = parse_price(price_text)?;
    Ok(NewProduct::new(name, alcohol_content, price))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("12.5").unwrap(), 12.5);
        assert_eq!(parse_price("45").unwrap(), 45.0);
        assert_eq!(parse_price("  7.25\n").unwrap(), 7.25);
        assert_eq!(parse_price("-3").unwrap(), -3.0);

        assert!(parse_price("abc").is_err());
        assert!(parse_price("").is_err());
        assert!(parse_price("12,5").is_err());
        assert!(parse_price("R$ 10").is_err());
    }

    #[test]
    fn test_parse_price_rejects_non_finite() {
        assert!(matches!(
            parse_price("inf"),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(matches!(
            parse_price("NaN"),
            Err(ValidationError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_parse_price_error_keeps_raw_input() {
        let err = parse_price("abc").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidNumber {
                field: "price".to_string(),
                value: "abc".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_new_product_keeps_text_fields_verbatim() {
        let wine = parse_new_product(" Malbec ", "13% vol", "45.0").unwrap();
        assert_eq!(wine.name, " Malbec ");
        assert_eq!(wine.alcohol_content, "13% vol");
        assert_eq!(wine.price, 45.0);
    }
}
