//! # Spotify Integration Module
//!
//! This module is the integration layer between spotplay and Spotify's
//! services. It covers the two things the application needs from Spotify:
//! getting a token, and reading the catalog with it.
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Implements the OAuth 2.0 implicit grant:
//! - **Authorization URL**: Built from client ID, redirect URI and scopes
//! - **Browser Integration**: Automatic browser launch for user authorization
//! - **Local Redirect Listener**: Captures the redirect, fragment included
//! - **Fragment Parsing**: Pulls `access_token` out of the redirect fragment
//!
//! The implicit grant returns the token directly in the redirect fragment.
//! There is no refresh token and no code exchange, so the token lives exactly
//! as long as the process does.
//!
//! ### Web API Client
//!
//! [`client`] - The [`SpotifyApi`] seam and its `reqwest` implementation:
//! - `GET /search?q=..&type=track|album&limit=10`
//! - `GET /albums/{id}/tracks`
//!
//! Every call takes the bearer token explicitly. Failures are returned as
//! [`crate::session::SessionError::RequestFailure`] and never retried.
//!
//! ## Usage Patterns
//!
//! ```rust
//! let redirect = spotify::auth::login(shared_state, true).await;
//! let token = redirect.as_deref().and_then(spotify::auth::extract_token);
//!
//! let api = spotify::WebApiClient::new();
//! let results = api.search(&token.unwrap(), "daft punk", SearchKind::Track).await?;
//! ```

pub mod auth;
pub mod client;

pub use client::{SEARCH_PAGE_SIZE, SpotifyApi, WebApiClient};
