//! # Product Repository
//!
//! Database operations for the wine catalog (`produtos` table).
//!
//! ## Id Assignment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    AUTOINCREMENT ids                                    │
//! │                                                                         │
//! │  insert Malbec   → id 1                                                │
//! │  insert Merlot   → id 2                                                │
//! │  insert Tannat   → id 3                                                │
//! │  delete Merlot   → row 2 gone                                          │
//! │  insert Syrah    → id 4   (never 2: sqlite_sequence remembers the max) │
//! │                                                                         │
//! │  list_all → [Malbec(1), Tannat(3), Syrah(4)]   ordered by id           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vinicola_core::{NewProduct, Product};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let malbec = repo.insert(&NewProduct::new("Malbec", "13%", 45.0)).await?;
/// let catalog = repo.list_all().await?;
/// repo.delete(&malbec).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product and returns it with its assigned id.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, "Inserting product");

        let result = sqlx::query("INSERT INTO produtos (nome, teor, preco) VALUES (?1, ?2, ?3)")
            .bind(&product.name)
            .bind(&product.alcohol_content)
            .bind(product.price)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!(id, "Product inserted");

        Ok(Product::with_id(id, product.clone()))
    }

    /// Updates every mutable field of an existing product.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - No product with this id
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, "Updating product");

        let result =
            sqlx::query("UPDATE produtos SET nome = ?2, teor = ?3, preco = ?4 WHERE id = ?1")
                .bind(product.id)
                .bind(&product.name)
                .bind(&product.alcohol_content)
                .bind(product.price)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.id));
        }

        Ok(())
    }

    /// Deletes a product by id.
    ///
    /// Deleting a row that is already gone succeeds.
    pub async fn delete(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, "Deleting product");

        let result = sqlx::query("DELETE FROM produtos WHERE id = ?1")
            .bind(product.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            debug!(id = product.id, "Product already absent");
        }

        Ok(())
    }

    /// Lists every product in insertion order.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, nome, teor, preco FROM produtos ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, nome, teor, preco FROM produtos WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM produtos")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
