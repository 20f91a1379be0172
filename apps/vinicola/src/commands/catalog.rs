//! # Catalog Commands
//!
//! Wine catalog management on the `ProductCatalog` screen.
//!
//! Every successful change re-reads the whole catalog from the store, so
//! the cached list in the session always matches `list_all`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_product("Malbec", "13%", "45.0")                                  │
//! │       │                                                                 │
//! │       ├── parse_price fails ──► warn!, notice set, catalog untouched   │
//! │       ▼                                                                 │
//! │  products.insert ──► products.list_all ──► session.replace_catalog     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use tracing::{debug, info, warn};
use vinicola_core::validation::parse_new_product;
use vinicola_core::{CoreError, Product};

use crate::error::{ApiError, ApiResult};
use crate::state::{DbState, Session, SessionState, SessionView};

/// Adds a wine from the three form fields.
///
/// ## Arguments
/// * `name` - Stored as typed
/// * `alcohol_content` - Strength label, stored as typed (e.g. "13%")
/// * `price_text` - Must parse as a decimal number
///
/// ## Returns
/// * `Ok(SessionView)` - Catalog now includes the new wine
/// * `Err(PARSE_ERROR)` - Nothing stored, catalog unchanged, notice set
pub async fn add_product(
    db: &DbState,
    session: &SessionState,
    name: String,
    alcohol_content: String,
    price_text: String,
) -> ApiResult<SessionView> {
    let start = Instant::now();
    debug!(name = %name, price = %price_text, "add_product command");

    let mut session = session.lock().await;
    session.require_authenticated()?;

    let product = match parse_new_product(&name, &alcohol_content, &price_text) {
        Ok(product) => product,
        Err(e) => {
            warn!(name = %name, price = %price_text, error = %e, "Product rejected");
            return Err(session.fail(e.into()));
        }
    };

    let stored = db
        .inner()
        .products()
        .insert(&product)
        .await
        .map_err(|e| session.fail(e.into()))?;

    reload_catalog(db, &mut session).await?;

    info!(
        id = stored.id,
        name = %stored.name,
        elapsed_ms = start.elapsed().as_millis(),
        "Product added"
    );

    Ok(session.view())
}

/// Deletes a wine and reloads the catalog.
///
/// A product that is already gone is not an error.
pub async fn delete_product(
    db: &DbState,
    session: &SessionState,
    product: Product,
) -> ApiResult<SessionView> {
    let start = Instant::now();
    debug!(id = product.id, "delete_product command");

    let mut session = session.lock().await;
    session.require_authenticated()?;

    db.inner()
        .products()
        .delete(&product)
        .await
        .map_err(|e| session.fail(e.into()))?;

    reload_catalog(db, &mut session).await?;

    info!(
        id = product.id,
        elapsed_ms = start.elapsed().as_millis(),
        "Product deleted"
    );

    Ok(session.view())
}

/// Re-reads the catalog from the store.
pub async fn refresh_catalog(db: &DbState, session: &SessionState) -> ApiResult<SessionView> {
    debug!("refresh_catalog command");

    let mut session = session.lock().await;
    session.require_authenticated()?;

    reload_catalog(db, &mut session).await?;
    Ok(session.view())
}

/// Gets one wine by id straight from the store.
///
/// ## Returns
/// * `Ok(Product)` - Product found
/// * `Err(NOT_FOUND)` - No product with this id
pub async fn get_product(db: &DbState, session: &SessionState, id: i64) -> ApiResult<Product> {
    debug!(id, "get_product command");

    session.lock().await.require_authenticated()?;

    db.inner()
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::ProductNotFound(id).into())
}

async fn reload_catalog(db: &DbState, session: &mut Session) -> ApiResult<()> {
    let catalog = db
        .inner()
        .products()
        .list_all()
        .await
        .map_err(|e| session.fail(ApiError::from(e)))?;

    session.replace_catalog(catalog);
    Ok(())
}
