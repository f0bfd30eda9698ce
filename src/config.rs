//! Configuration management for the Spotify search client.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Only two values are needed to log in: the OAuth
//! client ID and the registered redirect URI. Everything else falls back to the
//! public Spotify endpoints.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use reqwest::Url;

use crate::Res;

/// Permissions requested during authorization.
pub const SPOTIFY_SCOPES: [&str; 3] = ["user-read-private", "user-read-email", "user-top-read"];

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_EMBED_URL: &str = "https://open.spotify.com/embed";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `spotplay/.env`. A missing file is not an error:
/// the values may just as well come from the process environment.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spotplay/.env`
/// - macOS: `~/Library/Application Support/spotplay/.env`
/// - Windows: `%LOCALAPPDATA%/spotplay/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file exists but cannot be parsed
pub async fn load_env() -> Res<()> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotplay/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }
    Ok(())
}

/// Returns the address the local redirect listener binds to.
///
/// Uses `SERVER_ADDRESS` when set. Otherwise the host and port of the
/// configured redirect URI are used, so that the listener answers where
/// Spotify sends the browser. Falls back to `127.0.0.1:8888`.
pub fn server_addr() -> String {
    if let Ok(addr) = env::var("SERVER_ADDRESS") {
        return addr;
    }

    Url::parse(&spotify_redirect_uri())
        .ok()
        .and_then(|url| {
            let host = url.host_str()?.to_string();
            let port = url.port_or_known_default()?;
            Some(format!("{host}:{port}"))
        })
        .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Returns the Spotify API client ID.
///
/// Retrieves `SPOTIFY_CLIENT_ID`. A missing value is not detected here; it
/// ends up empty in the authorization URL and Spotify rejects the request.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").unwrap_or_default()
}

/// Returns the OAuth redirect URI registered with the Spotify application.
///
/// Retrieves `SPOTIFY_REDIRECT_URI`, e.g. `http://127.0.0.1:8888/callback`.
/// Like the client ID, a missing value only surfaces as a failed redirect.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_REDIRECT_URI").unwrap_or_default()
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string())
}

/// Returns the Spotify Web API base URL, e.g. `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the base URL of the embeddable Spotify player.
pub fn spotify_embed_url() -> String {
    env::var("SPOTIFY_EMBED_URL").unwrap_or_else(|_| DEFAULT_EMBED_URL.to_string())
}
