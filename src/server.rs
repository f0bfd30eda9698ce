use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::{api, config, error, types::SharedRedirect};

pub fn router(state: SharedRedirect) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .route(
            "/redirect",
            get(api::redirect).layer(Extension(Arc::clone(&state))),
        )
}

/// Binds the redirect listener to the configured server address.
pub async fn bind_listener() -> TcpListener {
    // host names such as `localhost` are resolved by bind
    let addr = config::server_addr();
    match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind redirect listener on {}: {}", addr, e),
    }
}

pub async fn serve_redirect_listener(listener: TcpListener, state: SharedRedirect) {
    if let Err(e) = axum::serve(listener, router(state)).await {
        error!("Redirect listener stopped: {}", e);
    }
}
