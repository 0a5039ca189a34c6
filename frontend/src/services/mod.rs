//! # Services Module
//!
//! Everything that talks to the outside world or formats for it.
//!
//! - **api**: HTTP client for the back-office API
//! - **session**: Login state shared by the client and the UI
//! - **retry**: User-initiated retry and notifications
//! - **error**: Error taxonomy of API actions
//! - **date_utils**: Date parsing and display formatting
//! - **logging**: Component-tagged log helper

pub mod api;
pub mod date_utils;
pub mod error;
pub mod logging;
pub mod retry;
pub mod session;

pub use api::ApiClient;
pub use error::ApiError;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionContext, SessionStore, SessionUser};
