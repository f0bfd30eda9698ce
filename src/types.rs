use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use tabled::Tabled;
use tokio::sync::Mutex;

/// Redirect URL captured by the local listener, shared with the login poller.
pub type SharedRedirect = Arc<Mutex<Option<String>>>;

/// Bearer credential taken from the redirect fragment. Memory only.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    #[default]
    Track,
    Album,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Track => "track",
            SearchKind::Album => "album",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackItem {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumItem {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub thumbnail: Option<String>,
    pub release_date: Option<String>,
    pub total_tracks: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumTrack {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub track_number: u32,
    pub duration_ms: u64,
}

/// Outcome of the latest successful search. Only one kind is ever shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchResults {
    #[default]
    Empty,
    Tracks(Vec<TrackItem>),
    Albums(Vec<AlbumItem>),
}

impl SearchResults {
    pub fn tracks(&self) -> &[TrackItem] {
        match self {
            SearchResults::Tracks(tracks) => tracks,
            _ => &[],
        }
    }

    pub fn albums(&self) -> &[AlbumItem] {
        match self {
            SearchResults::Albums(albums) => albums,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.tracks().len() + self.albums().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keeps only the list matching `kind`; the other one is always cleared.
    pub fn restrict_to(self, kind: SearchKind) -> Self {
        match (kind, self) {
            (SearchKind::Track, SearchResults::Tracks(tracks)) => SearchResults::Tracks(tracks),
            (SearchKind::Track, _) => SearchResults::Tracks(Vec::new()),
            (SearchKind::Album, SearchResults::Albums(albums)) => SearchResults::Albums(albums),
            (SearchKind::Album, _) => SearchResults::Albums(Vec::new()),
        }
    }
}

/// The single item handed to the embed player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub id: String,
    pub kind: SearchKind,
}

/// A line typed into the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Query(String),
    Kind(SearchKind),
    /// 1-based position in the shown results.
    Play(usize),
    Open,
    Help,
    Quit,
}

// Web API wire types, only the fields we read.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub total_tracks: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedTrack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub track_number: u32,
    #[serde(default)]
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<Paging<TrackObject>>,
    #[serde(default)]
    pub albums: Option<Paging<AlbumObject>>,
}

pub type AlbumTracksResponse = Paging<SimplifiedTrack>;

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub artist: String,
    pub thumbnail: String,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub artist: String,
    pub released: String,
    pub tracks: String,
    pub thumbnail: String,
}

#[derive(Tabled)]
pub struct AlbumTrackTableRow {
    #[tabled(rename = "no.")]
    pub track_number: u32,
    pub name: String,
    pub artist: String,
    pub duration: String,
}
