//! # Domain Types
//!
//! The two record kinds kept by the store.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │   NewProduct    │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  email (PK)     │   │  name           │──►│  id (assigned)  │       │
//! │  │  password       │   │  alcohol_content│   │  name           │       │
//! │  └─────────────────┘   │  price          │   │  alcohol_content│       │
//! │                        └─────────────────┘   │  price          │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Column names in the store are Portuguese (`usuarios`, `produtos`, `nome`,
//! `teor`, `preco`); the `sqlx` feature maps them onto these fields.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// User
// =============================================================================

/// A registered account.
///
/// ## Security
/// `password` is held and stored verbatim. This is a known defect carried
/// over from the existing data layout; no hashing happens anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Unique identifier (primary key).
    pub email: String,

    /// Plaintext password.
    pub password: String,
}

impl User {
    /// Creates a user from borrowed credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        User {
            email: email.into(),
            password: password.into(),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A wine in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Assigned by the store; never reused.
    pub id: i64,

    /// Display name (e.g. "Malbec Reserva").
    #[cfg_attr(feature = "sqlx", sqlx(rename = "nome"))]
    pub name: String,

    /// Strength label as typed, e.g. "13%". Not numeric.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "teor"))]
    pub alcohol_content: String,

    /// Unit price.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "preco"))]
    pub price: f64,
}

impl Product {
    /// Attaches a store-assigned id to a new product.
    pub fn with_id(id: i64, product: NewProduct) -> Self {
        Product {
            id,
            name: product.name,
            alcohol_content: product.alcohol_content,
            price: product.price,
        }
    }
}

/// A product that has not been stored yet (no id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub alcohol_content: String,
    pub price: f64,
}

impl NewProduct {
    /// Creates a new product from already-parsed fields.
    pub fn new(name: impl Into<String>, alcohol_content: impl Into<String>, price: f64) -> Self {
        NewProduct {
            name: name.into(),
            alcohol_content: alcohol_content.into(),
            price,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_with_id_keeps_fields() {
        let product = Product::with_id(3, NewProduct::new("Malbec", "13%", 45.0));

        assert_eq!(product.id, 3);
        assert_eq!(product.name, "Malbec");
        assert_eq!(product.alcohol_content, "13%");
        assert_eq!(product.price, 45.0);
    }

    #[test]
    fn test_user_new() {
        let user = User::new("a@x.com", "pw1");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.password, "pw1");
    }
}
