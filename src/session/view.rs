use tokio::sync::watch;

use crate::{
    session::SessionError,
    spotify::{SpotifyApi, auth},
    types::{
        AccessToken, AlbumItem, AlbumTrack, SearchKind, SearchResults, Selection, TrackItem,
    },
    utils, warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    AwaitingToken,
    Ready,
    Searching,
    ResultsShown,
    DetailLoading,
    DetailShown,
}

/// Search and playback session.
///
/// Holds the only copy of the access token and passes it to every request.
/// Failures other than an empty query are logged and leave the view as it
/// was, so a session without token simply does nothing.
pub struct SessionView<A> {
    api: A,
    token: Option<AccessToken>,
    state: ViewState,
    kind: SearchKind,
    loading: watch::Sender<bool>,
    results: SearchResults,
    selection: Option<Selection>,
    album_tracks: Vec<AlbumTrack>,
    show_progress: bool,
}

impl<A: SpotifyApi> SessionView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            token: None,
            state: ViewState::AwaitingToken,
            kind: SearchKind::default(),
            loading: watch::Sender::new(false),
            results: SearchResults::default(),
            selection: None,
            album_tracks: Vec::new(),
            show_progress: false,
        }
    }

    /// Show a spinner while searching.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Reads the access token from the redirect URL fragment.
    ///
    /// On success the view is ready. Otherwise it stays in
    /// [`ViewState::AwaitingToken`] and the problem is logged once.
    ///
    /// # Errors
    ///
    /// - [`SessionError::EmptyFragment`] when there is no URL or no `#` part
    /// - [`SessionError::MissingToken`] when the fragment has no token
    pub fn mount(&mut self, redirect_url: Option<&str>) -> Result<(), SessionError> {
        let token = match redirect_url.filter(|url| url.contains('#')) {
            None => Err(SessionError::EmptyFragment),
            Some(url) => auth::extract_token(url).ok_or(SessionError::MissingToken),
        };

        match token {
            Ok(token) => {
                self.token = Some(token);
                self.state = ViewState::Ready;
                Ok(())
            }
            Err(e) => {
                warning!("{}", e);
                Err(e)
            }
        }
    }

    pub fn set_kind(&mut self, kind: SearchKind) {
        self.kind = kind;
    }

    /// Runs one search for `query` with the active [`SearchKind`].
    ///
    /// An empty or whitespace-only query is rejected with
    /// [`SessionError::EmptyQuery`] before anything changes. On success the
    /// results are replaced; on failure the previous results stay and the
    /// view falls back to [`ViewState::Ready`].
    ///
    /// # Errors
    ///
    /// - [`SessionError::EmptyQuery`] for a blank query
    /// - [`SessionError::MissingToken`] when the view was mounted without token
    /// - [`SessionError::RequestFailure`] when the request failed
    pub async fn submit(&mut self, query: &str) -> Result<&SearchResults, SessionError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SessionError::EmptyQuery);
        }

        let Some(token) = self.token.clone() else {
            warning!("{}", SessionError::MissingToken);
            return Err(SessionError::MissingToken);
        };

        let kind = self.kind;
        self.state = ViewState::Searching;
        self.loading.send_replace(true);

        let pb = utils::spinner(&format!("Searching {}s...", kind), self.show_progress);
        let result = self.api.search(&token, query, kind).await;
        pb.finish_and_clear();

        self.loading.send_replace(false);

        match result {
            Ok(results) => {
                self.results = results.restrict_to(kind);
                self.state = ViewState::ResultsShown;
                Ok(&self.results)
            }
            Err(e) => {
                warning!("Error fetching {}s: {}", kind, e);
                self.state = ViewState::Ready;
                Err(e)
            }
        }
    }

    /// Selects the result at 1-based `position` of the shown list.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoSuchItem`] when nothing is shown at `position`, and
    /// whatever [`Self::select_album`] returns for albums.
    pub async fn select(&mut self, position: usize) -> Result<&Selection, SessionError> {
        let index = position
            .checked_sub(1)
            .ok_or(SessionError::NoSuchItem(position))?;

        let track = self.results.tracks().get(index).cloned();
        let album = self.results.albums().get(index).cloned();

        match (track, album) {
            (Some(track), _) => Ok(self.select_track(track)),
            (None, Some(album)) => self.select_album(album).await,
            (None, None) => Err(SessionError::NoSuchItem(position)),
        }
    }

    /// Makes `track` the active playback item. No request is made.
    pub fn select_track(&mut self, track: TrackItem) -> &Selection {
        self.album_tracks.clear();
        self.state = ViewState::ResultsShown;
        self.selection.insert(Selection {
            id: track.id,
            kind: SearchKind::Track,
        })
    }

    /// Fetches the track listing of `album`, then makes it the active item.
    ///
    /// A failed listing request is logged, leaves the detail list empty and
    /// still selects the album.
    ///
    /// # Errors
    ///
    /// [`SessionError::MissingToken`] when the view has no token; nothing
    /// changes in that case.
    pub async fn select_album(&mut self, album: AlbumItem) -> Result<&Selection, SessionError> {
        let Some(token) = self.token.clone() else {
            warning!("{}", SessionError::MissingToken);
            return Err(SessionError::MissingToken);
        };

        self.state = ViewState::DetailLoading;

        match self.api.album_tracks(&token, &album.id).await {
            Ok(tracks) => self.album_tracks = tracks,
            Err(e) => {
                warning!("Error fetching album tracks: {}", e);
                self.album_tracks.clear();
            }
        }

        self.state = ViewState::DetailShown;
        Ok(&*self.selection.insert(Selection {
            id: album.id,
            kind: SearchKind::Album,
        }))
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Follows the loading flag while a search is in flight.
    pub fn watch_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn results(&self) -> &SearchResults {
        &self.results
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn album_tracks(&self) -> &[AlbumTrack] {
        &self.album_tracks
    }

    /// Embed player URL of the active selection.
    pub fn embed_url(&self) -> Option<String> {
        self.selection.as_ref().map(utils::embed_url)
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}
