use std::{sync::Arc, time::Duration};

use spotplay::{
    config::SPOTIFY_SCOPES,
    server,
    spotify::auth::{authorize_url, capture_redirect, extract_token, wait_for_redirect},
    types::SharedRedirect,
};
use tokio::sync::Mutex;

const AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";

async fn spawn_listener(state: SharedRedirect) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, server::router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

#[test]
fn test_authorize_url() {
    let url = authorize_url(AUTH_URL, "abc123", REDIRECT_URI, &SPOTIFY_SCOPES);

    assert_eq!(
        url,
        "https://accounts.spotify.com/authorize?client_id=abc123\
         &redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback\
         &response_type=token\
         &scope=user-read-private%20user-read-email%20user-top-read"
    );
}

#[test]
fn test_authorize_url_with_missing_config() {
    let url = authorize_url(AUTH_URL, "", "", &SPOTIFY_SCOPES);

    // not validated locally, Spotify rejects it
    assert!(url.contains("client_id=&redirect_uri=&response_type=token"));
}

#[test]
fn test_authorize_url_without_scopes() {
    let url = authorize_url(AUTH_URL, "abc123", REDIRECT_URI, &[]);
    assert!(url.ends_with("&scope="));
}

#[test]
fn test_extract_token_from_fragment() {
    let token = extract_token(&format!("{}#access_token=ABC&token_type=Bearer", REDIRECT_URI));
    assert_eq!(token.unwrap().secret(), "ABC");

    let token = extract_token(&format!(
        "{}#token_type=Bearer&expires_in=3600&access_token=BQD-x_9",
        REDIRECT_URI
    ));
    assert_eq!(token.unwrap().secret(), "BQD-x_9");
}

#[test]
fn test_extract_token_decodes_value() {
    let token = extract_token(&format!("{}#access_token=a%2Fb%3D", REDIRECT_URI));
    assert_eq!(token.unwrap().secret(), "a/b=");
}

#[test]
fn test_extract_token_without_token() {
    assert!(extract_token(REDIRECT_URI).is_none());
    assert!(extract_token(&format!("{}#", REDIRECT_URI)).is_none());
    assert!(extract_token(&format!("{}#token_type=Bearer", REDIRECT_URI)).is_none());
    assert!(extract_token(&format!("{}#access_token=", REDIRECT_URI)).is_none());
    assert!(extract_token(&format!("{}#access_token_x=ABC", REDIRECT_URI)).is_none());
    assert!(extract_token(&format!("{}?error=access_denied", REDIRECT_URI)).is_none());
}

#[test]
fn test_extract_token_ignores_query() {
    assert!(extract_token(&format!("{}?access_token=ABC", REDIRECT_URI)).is_none());

    let token = extract_token(&format!("{}?access_token=QUERY#access_token=FRAGMENT", REDIRECT_URI));
    assert_eq!(token.unwrap().secret(), "FRAGMENT");
}

#[test]
fn test_token_debug_hides_secret() {
    let token = extract_token(&format!("{}#access_token=ABC", REDIRECT_URI)).unwrap();
    assert!(!format!("{:?}", token).contains("ABC"));
}

#[tokio::test]
async fn test_wait_for_redirect_returns_captured_url() {
    let state: SharedRedirect = Arc::new(Mutex::new(Some("http://x/callback#a=b".to_string())));

    let url = wait_for_redirect(state, Duration::from_secs(5)).await;
    assert_eq!(url.as_deref(), Some("http://x/callback#a=b"));
}

#[tokio::test]
async fn test_wait_for_redirect_times_out() {
    let state: SharedRedirect = Arc::new(Mutex::new(None));

    let url = wait_for_redirect(state, Duration::ZERO).await;
    assert!(url.is_none());
}

#[tokio::test]
async fn test_listener_captures_redirect() {
    let state: SharedRedirect = Arc::new(Mutex::new(None));
    let base = spawn_listener(Arc::clone(&state)).await;

    let redirect = format!("{}#access_token=ABC&token_type=Bearer", REDIRECT_URI);
    let response = reqwest::get(format!(
        "{}/redirect?url={}",
        base,
        urlencoding::encode(&redirect)
    ))
    .await
    .unwrap();
    assert!(response.status().is_success());

    let captured = wait_for_redirect(Arc::clone(&state), Duration::from_secs(5)).await;
    assert_eq!(captured.as_deref(), Some(redirect.as_str()));
    assert_eq!(extract_token(&captured.unwrap()).unwrap().secret(), "ABC");
}

#[tokio::test]
async fn test_listener_without_url_keeps_waiting() {
    let state: SharedRedirect = Arc::new(Mutex::new(None));
    let base = spawn_listener(Arc::clone(&state)).await;

    let body = reqwest::get(format!("{}/redirect", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Missing redirect url"));
    assert!(state.lock().await.is_none());
}

#[tokio::test]
async fn test_listener_keeps_first_redirect() {
    let state: SharedRedirect = Arc::new(Mutex::new(None));
    let base = spawn_listener(Arc::clone(&state)).await;

    let first = format!("{}#access_token=FIRST", REDIRECT_URI);
    let second = format!("{}#access_token=SECOND", REDIRECT_URI);
    for redirect in [&first, &second] {
        reqwest::get(format!("{}/redirect?url={}", base, urlencoding::encode(redirect)))
            .await
            .unwrap();
    }

    assert_eq!(state.lock().await.as_deref(), Some(first.as_str()));
}

#[tokio::test]
async fn test_capture_redirect_closes_listener() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let state: SharedRedirect = Arc::new(Mutex::new(None));

    let redirect = format!("{}#access_token=ABC", REDIRECT_URI);
    let browser = tokio::spawn({
        let url = format!("{}/redirect?url={}", base, urlencoding::encode(&redirect));
        async move { reqwest::get(url).await.map(|r| r.status()) }
    });

    let captured = capture_redirect(listener, state, Duration::from_secs(5)).await;
    assert_eq!(captured.as_deref(), Some(redirect.as_str()));
    assert!(browser.await.unwrap().unwrap().is_success());

    assert!(reqwest::get(format!("{}/health", base)).await.is_err());
}

#[tokio::test]
async fn test_capture_redirect_closes_listener_on_timeout() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let state: SharedRedirect = Arc::new(Mutex::new(None));

    let captured = capture_redirect(listener, state, Duration::ZERO).await;
    assert!(captured.is_none());

    assert!(reqwest::get(format!("{}/health", base)).await.is_err());
}

#[tokio::test]
async fn test_callback_page_forwards_location() {
    let state: SharedRedirect = Arc::new(Mutex::new(None));
    let base = spawn_listener(state).await;

    let body = reqwest::get(format!("{}/callback", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("encodeURIComponent(window.location.href)"));
}

#[tokio::test]
async fn test_health() {
    let state: SharedRedirect = Arc::new(Mutex::new(None));
    let base = spawn_listener(state).await;

    let health: serde_json::Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(health["status"], "ok");
    assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));
}
