//! # CLI Module
//!
//! The command-line layer of spotplay. Each command delegates to the
//! [`crate::spotify`] and [`crate::session`] modules and only takes care of
//! user interaction and output.
//!
//! ## Commands
//!
//! - [`login`] - Opens the Spotify login, catches the redirect and continues
//!   into an interactive session in the same process
//! - [`url`] - Prints the authorization URL
//! - [`session`] - Starts an interactive session from a pasted redirect URL
//!
//! ## Interactive Session
//!
//! Input is read line by line. Plain text is searched for, lines starting
//! with `:` are commands (`:track`, `:album`, `:play N`, `:open`, `:help`,
//! `:quit`). Results are printed as tables, the selected item is opened in
//! Spotify's embed player.
//!
//! ## Error Handling
//!
//! Missing tokens and failed requests are logged and otherwise ignored; the
//! prompt simply comes back. An empty query prints an alert. Only failures
//! of the redirect listener end the process.
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotplay login                                  # log in and search
//! spotplay login --no-browser                     # print the URL instead
//! spotplay session --redirect-url 'http://127.0.0.1:8888/callback#access_token=...'
//! ```

mod auth;
mod session;

pub use auth::login;
pub use auth::url;
pub use session::session;
