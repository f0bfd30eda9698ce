use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{config, types::SharedRedirect, warning};

/// Page served at the redirect URI.
///
/// Browsers never send the URL fragment to a server, so the page forwards its
/// own location, fragment included, to `/redirect`.
const CALLBACK_PAGE: &str = r#"<!doctype html>
<html>
  <head><title>spotplay</title></head>
  <body>
    <h4>Completing login...</h4>
    <script>
      fetch('/redirect?url=' + encodeURIComponent(window.location.href))
        .then(function (res) { return res.text(); })
        .then(function (body) { document.body.innerHTML = body; })
        .catch(function () { document.body.innerHTML = '<h4>Login failed.</h4>'; });
    </script>
  </body>
</html>"#;

pub async fn callback() -> Html<&'static str> {
    Html(CALLBACK_PAGE)
}

/// Stores the redirect URL forwarded by the callback page.
///
/// Only the first URL is kept, and only when it points at the configured
/// redirect URI. Later calls during the same login cannot replace the token.
pub async fn redirect(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<SharedRedirect>,
) -> Html<&'static str> {
    let Some(url) = params.get("url") else {
        warning!("Redirect listener was called without a url");
        return Html("<h4>Missing redirect url.</h4>");
    };

    if !url.starts_with(&config::spotify_redirect_uri()) {
        warning!("Ignoring redirect to an unexpected url");
        return Html("<h4>Unexpected redirect url.</h4>");
    }

    let mut state = shared_state.lock().await;
    if state.is_some() {
        warning!("Ignoring repeated redirect");
        return Html("<h4>Login was already received.</h4>");
    }
    *state = Some(url.clone());

    Html("<h2>Login received.</h2><p>Close browser window and return to the terminal.</p>")
}
