use std::future::Future;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    config,
    session::SessionError,
    types::{AccessToken, AlbumTrack, AlbumTracksResponse, SearchKind, SearchResponse, SearchResults},
    utils,
};

/// Fixed page size of a search. There is no pagination.
pub const SEARCH_PAGE_SIZE: u32 = 10;

/// The two Web API calls a session makes.
///
/// The session owns the token and hands it to every call, so implementations
/// hold no credentials of their own. Tests substitute a recording fake.
pub trait SpotifyApi {
    fn search(
        &self,
        token: &AccessToken,
        query: &str,
        kind: SearchKind,
    ) -> impl Future<Output = Result<SearchResults, SessionError>> + Send;

    fn album_tracks(
        &self,
        token: &AccessToken,
        album_id: &str,
    ) -> impl Future<Output = Result<Vec<AlbumTrack>, SessionError>> + Send;
}

/// [`SpotifyApi`] backed by the real Web API over `reqwest`.
#[derive(Debug, Clone)]
pub struct WebApiClient {
    client: Client,
    base_url: String,
}

impl Default for WebApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WebApiClient {
    /// Client for the API base URL from the configuration.
    pub fn new() -> Self {
        Self::with_base_url(config::spotify_apiurl())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds the search URL. The query term is percent-encoded.
    pub fn search_url(&self, query: &str, kind: SearchKind) -> String {
        format!(
            "{uri}/search?q={q}&type={kind}&limit={limit}",
            uri = self.base_url,
            q = urlencoding::encode(query),
            kind = kind,
            limit = SEARCH_PAGE_SIZE
        )
    }

    pub fn album_tracks_url(&self, album_id: &str) -> String {
        format!(
            "{uri}/albums/{id}/tracks",
            uri = self.base_url,
            id = urlencoding::encode(album_id)
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        token: &AccessToken,
    ) -> Result<T, SessionError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(token.secret())
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}

impl SpotifyApi for WebApiClient {
    async fn search(
        &self,
        token: &AccessToken,
        query: &str,
        kind: SearchKind,
    ) -> Result<SearchResults, SessionError> {
        let url = self.search_url(query, kind);
        let res: SearchResponse = self.get_json(&url, token).await?;

        Ok(match kind {
            SearchKind::Track => SearchResults::Tracks(
                res.tracks
                    .map(|page| page.items)
                    .unwrap_or_default()
                    .into_iter()
                    .map(utils::track_item)
                    .collect(),
            ),
            SearchKind::Album => SearchResults::Albums(
                res.albums
                    .map(|page| page.items)
                    .unwrap_or_default()
                    .into_iter()
                    .map(utils::album_item)
                    .collect(),
            ),
        })
    }

    async fn album_tracks(
        &self,
        token: &AccessToken,
        album_id: &str,
    ) -> Result<Vec<AlbumTrack>, SessionError> {
        let url = self.album_tracks_url(album_id);
        let res: AlbumTracksResponse = self.get_json(&url, token).await?;

        Ok(res.items.into_iter().map(utils::album_track).collect())
    }
}
