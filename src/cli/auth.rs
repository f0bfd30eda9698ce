use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{cli, spotify, types::SharedRedirect, warning};

/// Logs in and continues straight into a session.
///
/// The token is never written anywhere, so the session has to run in the
/// same process that received the redirect.
pub async fn login(open_browser: bool) {
    let shared_state: SharedRedirect = Arc::new(Mutex::new(None));
    let redirect_url = spotify::auth::login(Arc::clone(&shared_state), open_browser).await;

    if redirect_url.is_none() {
        warning!("No redirect received from Spotify.");
    }

    cli::session(redirect_url, open_browser).await;
}

pub fn url() {
    println!("{}", spotify::auth::configured_authorize_url());
}
