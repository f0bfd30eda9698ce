//! # API Module
//!
//! HTTP endpoints of the short-lived local listener that catches the OAuth
//! redirect during `spotplay login`.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`callback`] - The page Spotify redirects the browser to. The access
//!   token sits in the URL fragment, which never reaches the server, so this
//!   page forwards the full location to [`redirect`].
//! - [`redirect`] - Stores the forwarded redirect URL in the shared state the
//!   login flow is polling. The URL is stored untouched; extracting the token
//!   from its fragment is left to the session.
//!
//! ### Monitoring
//!
//! - [`health`] - Returns application status and version information.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotplay::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use callback::redirect;
pub use health::health;
