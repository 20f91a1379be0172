//! # Session State
//!
//! The screen state machine and the catalog cache shown on the catalog
//! screen.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Screens                                      │
//! │                                                                         │
//! │              request_register                                           │
//! │   ┌─────────┐ ──────────────────────► ┌───────────┐                    │
//! │   │  Login  │                         │ Register  │                    │
//! │   │ (start) │ ◄────────────────────── │           │                    │
//! │   └─────────┘   request_back /        └───────────┘                    │
//! │        │        submit_register ok                                      │
//! │        │                                                                │
//! │        │ submit_login ok                                                │
//! │        ▼                                                                │
//! │   ┌────────────────┐                                                    │
//! │   │ ProductCatalog │ ◄── add_product / delete_product / refresh        │
//! │   │ (terminal)     │     stay here and replace the catalog             │
//! │   └────────────────┘                                                    │
//! │                                                                         │
//! │  Failed actions keep the screen and set `notice` to the error text.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Every action reads the screen, talks to the store, then writes the
//! screen back. The session is behind a `tokio::sync::Mutex` so the guard
//! can be held across those awaits and two actions never interleave.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};
use ts_rs::TS;
use vinicola_core::Product;

use crate::error::{ApiError, ApiResult, ErrorCode};

/// The screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    Login,
    Register,
    ProductCatalog,
}

/// Snapshot of the session handed to the view layer after every action.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub screen: Screen,
    pub is_authenticated: bool,
    pub user_email: Option<String>,
    #[ts(type = "string | null")]
    pub logged_in_at: Option<DateTime<Utc>>,
    pub catalog: Vec<Product>,
    /// Message for the user about the last failed action.
    pub notice: Option<String>,
}

/// In-memory session.
///
/// ## Invariants
/// - `screen == ProductCatalog` exactly when a user is logged in
/// - `catalog` is empty until login and afterwards mirrors the last
///   successful `list_all`
/// - There is no way back from `ProductCatalog`
#[derive(Debug, Clone)]
pub struct Session {
    screen: Screen,
    user_email: Option<String>,
    logged_in_at: Option<DateTime<Utc>>,
    catalog: Vec<Product>,
    notice: Option<String>,
}

impl Session {
    /// Creates a session on the login screen.
    pub fn new() -> Self {
        Session {
            screen: Screen::Login,
            user_email: None,
            logged_in_at: None,
            catalog: Vec::new(),
            notice: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_email.is_some()
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Fails with `InvalidTransition` unless the session is on `screen`.
    pub fn expect_screen(&self, screen: Screen, action: &str) -> ApiResult<()> {
        if self.screen != screen {
            return Err(ApiError::invalid_transition(action, self.screen));
        }
        Ok(())
    }

    /// Fails with `NotAuthenticated` before login.
    pub fn require_authenticated(&self) -> ApiResult<()> {
        if !self.is_authenticated() {
            return Err(ApiError::not_authenticated());
        }
        Ok(())
    }

    /// Login → Register.
    pub fn show_register(&mut self) -> ApiResult<()> {
        self.expect_screen(Screen::Login, "request_register")?;
        self.screen = Screen::Register;
        self.notice = None;
        Ok(())
    }

    /// Register → Login, used by both "back" and a successful registration.
    pub fn show_login(&mut self, action: &str) -> ApiResult<()> {
        self.expect_screen(Screen::Register, action)?;
        self.screen = Screen::Login;
        self.notice = None;
        Ok(())
    }

    /// Login → ProductCatalog with the freshly loaded catalog.
    pub fn log_in(&mut self, email: impl Into<String>, catalog: Vec<Product>) -> ApiResult<()> {
        self.expect_screen(Screen::Login, "submit_login")?;
        self.screen = Screen::ProductCatalog;
        self.user_email = Some(email.into());
        self.logged_in_at = Some(Utc::now());
        self.catalog = catalog;
        self.notice = None;
        Ok(())
    }

    /// Replaces the cached catalog after a successful store change.
    pub fn replace_catalog(&mut self, catalog: Vec<Product>) {
        self.catalog = catalog;
        self.notice = None;
    }

    /// Records a failed action and hands the error back.
    ///
    /// Domain failures become the user-visible notice. Transition and
    /// auth errors come from a view calling the wrong action and leave the
    /// session untouched.
    pub fn fail(&mut self, err: ApiError) -> ApiError {
        match err.code {
            ErrorCode::InvalidTransition | ErrorCode::NotAuthenticated => {}
            _ => self.notice = Some(err.message.clone()),
        }
        err
    }

    /// Builds the snapshot for the view layer.
    pub fn view(&self) -> SessionView {
        SessionView {
            screen: self.screen,
            is_authenticated: self.is_authenticated(),
            user_email: self.user_email.clone(),
            logged_in_at: self.logged_in_at,
            catalog: self.catalog.clone(),
            notice: self.notice.clone(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to the single session of the process.
///
/// ## Usage
/// ```rust,ignore
/// let mut session = session_state.lock().await;
/// session.expect_screen(Screen::Login, "submit_login")?;
/// // ... store calls while the guard is held ...
/// Ok(session.view())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<Mutex<Session>>,
}

impl SessionState {
    /// Creates a state holding a fresh session on the login screen.
    pub fn new() -> Self {
        SessionState {
            session: Arc::new(Mutex::new(Session::new())),
        }
    }

    /// Locks the session for the duration of one action.
    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().await
    }

    /// Current snapshot without changing anything.
    pub async fn snapshot(&self) -> SessionView {
        self.session.lock().await.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vinicola_core::NewProduct;

    fn malbec() -> Product {
        Product::with_id(1, NewProduct::new("Malbec", "13%", 45.0))
    }

    #[test]
    fn test_new_session_starts_on_login() {
        let session = Session::new();

        assert_eq!(session.screen(), Screen::Login);
        assert!(!session.is_authenticated());
        assert!(session.catalog().is_empty());
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_register_and_back() {
        let mut session = Session::new();

        session.show_register().unwrap();
        assert_eq!(session.screen(), Screen::Register);

        session.show_login("request_back").unwrap();
        assert_eq!(session.screen(), Screen::Login);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_log_in_moves_to_catalog() {
        let mut session = Session::new();

        session.log_in("a@x.com", vec![malbec()]).unwrap();

        assert_eq!(session.screen(), Screen::ProductCatalog);
        assert!(session.is_authenticated());
        assert_eq!(session.user_email(), Some("a@x.com"));
        assert_eq!(session.catalog(), &[malbec()]);
        assert!(session.view().logged_in_at.is_some());
    }

    #[test]
    fn test_invalid_transitions_leave_session_untouched() {
        let mut session = Session::new();

        let err = session.show_login("request_back").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);
        assert_eq!(session.screen(), Screen::Login);

        session.show_register().unwrap();
        let err = session.log_in("a@x.com", Vec::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);
        assert_eq!(session.screen(), Screen::Register);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_catalog_screen_is_terminal() {
        let mut session = Session::new();
        session.log_in("a@x.com", Vec::new()).unwrap();

        assert!(session.show_register().is_err());
        assert!(session.show_login("request_back").is_err());
        assert!(session.log_in("b@x.com", Vec::new()).is_err());
        assert_eq!(session.screen(), Screen::ProductCatalog);
        assert_eq!(session.user_email(), Some("a@x.com"));
    }

    #[test]
    fn test_fail_sets_notice_for_domain_errors_only() {
        let mut session = Session::new();

        session.fail(ApiError::invalid_credentials());
        assert_eq!(session.notice(), Some("Invalid email or password"));

        let mut fresh = Session::new();
        fresh.fail(ApiError::not_authenticated());
        assert!(fresh.notice().is_none());
    }

    #[test]
    fn test_successful_transition_clears_notice() {
        let mut session = Session::new();
        session.fail(ApiError::invalid_credentials());

        session.show_register().unwrap();

        assert!(session.notice().is_none());
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let mut session = Session::new();
        session.log_in("a@x.com", vec![malbec()]).unwrap();

        let json = serde_json::to_value(session.view()).unwrap();

        assert_eq!(json["screen"], "productCatalog");
        assert_eq!(json["isAuthenticated"], true);
        assert_eq!(json["userEmail"], "a@x.com");
        assert_eq!(json["catalog"][0]["alcoholContent"], "13%");
        assert!(json["notice"].is_null());
    }

    #[tokio::test]
    async fn test_session_state_shares_one_session() {
        let state = SessionState::new();
        let other = state.clone();

        state.lock().await.show_register().unwrap();

        assert_eq!(other.snapshot().await.screen, Screen::Register);
    }
}
