use std::{sync::Arc, time::Duration};

use tokio::net::TcpListener;

use crate::{
    config, info, server,
    types::{AccessToken, SharedRedirect},
    warning,
};

const LOGIN_WAIT: Duration = Duration::from_secs(120);

/// Builds the authorization URL for the implicit grant flow.
///
/// The client ID and redirect URI are percent-encoded, scopes are joined with
/// `%20`. Nothing is validated: an empty client ID yields a URL that Spotify
/// rejects, which is the only place a misconfiguration shows up.
///
/// # Example
///
/// ```
/// let url = authorize_url(
///     "https://accounts.spotify.com/authorize",
///     "abc123",
///     "http://127.0.0.1:8888/callback",
///     &["user-read-private", "user-read-email"],
/// );
/// assert!(url.ends_with("scope=user-read-private%20user-read-email"));
/// ```
pub fn authorize_url(auth_url: &str, client_id: &str, redirect_uri: &str, scopes: &[&str]) -> String {
    let scope = scopes
        .iter()
        .map(|s| urlencoding::encode(s).into_owned())
        .collect::<Vec<_>>()
        .join("%20");

    format!(
        "{auth_url}?client_id={client_id}&redirect_uri={redirect_uri}&response_type=token&scope={scope}",
        auth_url = auth_url,
        client_id = urlencoding::encode(client_id),
        redirect_uri = urlencoding::encode(redirect_uri),
        scope = scope
    )
}

/// [`authorize_url`] filled in from the configuration.
pub fn configured_authorize_url() -> String {
    authorize_url(
        &config::spotify_apiauth_url(),
        &config::spotify_client_id(),
        &config::spotify_redirect_uri(),
        &config::SPOTIFY_SCOPES,
    )
}

/// Extracts the access token from the fragment of a redirect URL.
///
/// Only the part after `#` is looked at; an `access_token` in the query
/// string is ignored. Returns `None` when there is no fragment, no
/// `access_token` parameter, or the value is empty.
///
/// # Example
///
/// ```
/// let token = extract_token("http://127.0.0.1:8888/callback#access_token=ABC&token_type=Bearer");
/// assert_eq!(token.unwrap().secret(), "ABC");
/// ```
pub fn extract_token(redirect_url: &str) -> Option<AccessToken> {
    let (_, fragment) = redirect_url.split_once('#')?;

    fragment
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "access_token")
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .filter(|value| !value.is_empty())
        .map(|value| AccessToken::new(value.into_owned()))
}

/// Hands control to Spotify and waits for the redirect.
///
/// Binds the local redirect listener, opens the authorization URL in the
/// default browser and waits until the listener captured the redirect URL or
/// two minutes have passed. The listener is shut down before returning.
///
/// # Arguments
///
/// * `shared_state` - Slot the listener writes the captured redirect URL into
/// * `open_browser` - Launch the browser; otherwise just print the URL
///
/// # Returns
///
/// The full redirect URL including its fragment, or `None` on timeout. The
/// token is not extracted here; that is the session's job.
pub async fn login(shared_state: SharedRedirect, open_browser: bool) -> Option<String> {
    let listener = server::bind_listener().await;
    let auth_url = configured_authorize_url();

    if !open_browser {
        info!("Open the following URL to log in:\n{}", auth_url);
    } else if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    info!("Waiting for the Spotify redirect...");
    capture_redirect(listener, shared_state, LOGIN_WAIT).await
}

/// Serves the redirect listener on `listener` until a redirect URL was
/// captured or `max_wait` passed.
///
/// The listener only lives for the duration of this call: once it returns
/// the port is closed again, on success and on timeout alike.
pub async fn capture_redirect(
    listener: TcpListener,
    shared_state: SharedRedirect,
    max_wait: Duration,
) -> Option<String> {
    let server = tokio::spawn(server::serve_redirect_listener(
        listener,
        Arc::clone(&shared_state),
    ));

    let redirect_url = wait_for_redirect(shared_state, max_wait).await;

    server.abort();
    // cancelled; waiting drops the listener socket
    let _ = server.await;

    redirect_url
}

/// Polls `shared_state` once per second until a redirect URL shows up.
pub async fn wait_for_redirect(shared_state: SharedRedirect, max_wait: Duration) -> Option<String> {
    use std::time::Instant;

    let start = Instant::now();

    loop {
        let lock = shared_state.lock().await;
        if let Some(url) = lock.as_ref() {
            return Some(url.clone());
        }
        drop(lock);

        if start.elapsed() >= max_wait {
            return None;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}
