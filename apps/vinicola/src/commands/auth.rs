//! # Auth Commands
//!
//! Login, registration and the navigation between the two screens.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Login screen: email + password                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  submit_login(email, password)                                         │
//! │       │                                                                 │
//! │       ├── users.find_by_credentials ── None ──► stay on Login          │
//! │       │                                         notice = "Invalid..."   │
//! │       ▼                                                                 │
//! │  products.list_all                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductCatalog with the loaded catalog                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Passwords are stored and compared as plain text. Unknown email and wrong
//! password produce the same error.

use std::time::Instant;

use tracing::{debug, info, warn};
use vinicola_core::User;
use vinicola_db::DbError;

use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::state::{DbState, Screen, SessionState, SessionView};

/// Returns the current session without changing it.
pub async fn get_session(session: &SessionState) -> SessionView {
    debug!("get_session command");
    session.snapshot().await
}

/// Checks credentials and opens the catalog.
///
/// ## Returns
/// * `Ok(SessionView)` - On `ProductCatalog` with the full catalog
/// * `Err(INVALID_CREDENTIALS)` - Still on `Login`, notice set
/// * `Err(INVALID_TRANSITION)` - Not on the login screen
pub async fn submit_login(
    db: &DbState,
    session: &SessionState,
    email: String,
    password: String,
) -> ApiResult<SessionView> {
    let start = Instant::now();
    debug!(email = %email, "submit_login command");

    let mut session = session.lock().await;
    session.expect_screen(Screen::Login, "submit_login")?;

    let user = db
        .inner()
        .users()
        .find_by_credentials(&email, &password)
        .await
        .map_err(|e| session.fail(e.into()))?;

    let Some(user) = user else {
        warn!(email = %email, "Login rejected");
        return Err(session.fail(ApiError::invalid_credentials()));
    };

    let catalog = db
        .inner()
        .products()
        .list_all()
        .await
        .map_err(|e| session.fail(e.into()))?;

    session.log_in(user.email, catalog)?;

    info!(
        email = %email,
        products = session.catalog().len(),
        elapsed_ms = start.elapsed().as_millis(),
        "User logged in"
    );

    Ok(session.view())
}

/// Opens the registration screen.
pub async fn request_register(session: &SessionState) -> ApiResult<SessionView> {
    debug!("request_register command");

    let mut session = session.lock().await;
    session.show_register()?;
    Ok(session.view())
}

/// Creates an account and returns to the login screen.
///
/// ## Returns
/// * `Ok(SessionView)` - Back on `Login`
/// * `Err(DUPLICATE_KEY)` - Email taken; still on `Register`, notice set
pub async fn submit_register(
    db: &DbState,
    session: &SessionState,
    email: String,
    password: String,
) -> ApiResult<SessionView> {
    let start = Instant::now();
    debug!(email = %email, "submit_register command");

    let mut session = session.lock().await;
    session.expect_screen(Screen::Register, "submit_register")?;

    let user = User::new(email, password);
    if let Err(e) = db.inner().users().insert(&user).await {
        let err = match e {
            DbError::DuplicateKey { .. } => {
                warn!(email = %user.email, "Registration rejected: email taken");
                ApiError::new(ErrorCode::DuplicateKey, "This email is already registered")
            }
            other => ApiError::from(other),
        };
        return Err(session.fail(err));
    }

    session.show_login("submit_register")?;

    info!(
        email = %user.email,
        elapsed_ms = start.elapsed().as_millis(),
        "User registered"
    );

    Ok(session.view())
}

/// Leaves the registration screen without registering.
pub async fn request_back(session: &SessionState) -> ApiResult<SessionView> {
    debug!("request_back command");

    let mut session = session.lock().await;
    session.show_login("request_back")?;
    Ok(session.view())
}
