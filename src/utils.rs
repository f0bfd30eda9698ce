use std::time::Duration;

use chrono::TimeDelta;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config,
    types::{
        AlbumItem, AlbumObject, AlbumTableRow, AlbumTrack, AlbumTrackTableRow, ArtistRef, Image,
        ReplCommand, SearchKind, Selection, SimplifiedTrack, TrackItem, TrackObject, TrackTableRow,
    },
};

/// Largest edge, in pixels, of a track thumbnail in result lists.
pub const TRACK_THUMBNAIL_MAX_PX: u32 = 64;
/// Largest edge, in pixels, of an album cover in result lists.
pub const ALBUM_THUMBNAIL_MAX_PX: u32 = 300;

const UNKNOWN_ARTIST: &str = "Unknown artist";
const NO_VALUE: &str = "-";

/// Picks the largest image whose longer edge is at most `max_px`.
///
/// Spotify usually returns covers in 640, 300 and 64 px, but neither the
/// count nor the order is guaranteed. When nothing fits under the threshold
/// the smallest sized image is used, and images without dimensions are only
/// used when no sized image exists at all.
pub fn pick_thumbnail(images: &[Image], max_px: u32) -> Option<String> {
    let sized: Vec<(u32, &Image)> = images
        .iter()
        .filter_map(|img| img.width.max(img.height).map(|edge| (edge, img)))
        .collect();

    let best_fit = sized
        .iter()
        .filter(|(edge, _)| *edge <= max_px)
        .max_by_key(|(edge, _)| *edge);
    let smallest = sized.iter().min_by_key(|(edge, _)| *edge);

    best_fit
        .or(smallest)
        .map(|(_, img)| *img)
        .or_else(|| images.first())
        .map(|img| img.url.clone())
}

pub fn primary_artist(artists: &[ArtistRef]) -> String {
    artists
        .first()
        .map(|a| a.name.clone())
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string())
}

pub fn track_item(track: TrackObject) -> TrackItem {
    let thumbnail = track
        .album
        .as_ref()
        .and_then(|album| pick_thumbnail(&album.images, TRACK_THUMBNAIL_MAX_PX));

    TrackItem {
        artist: primary_artist(&track.artists),
        id: track.id,
        name: track.name,
        thumbnail,
    }
}

pub fn album_item(album: AlbumObject) -> AlbumItem {
    AlbumItem {
        artist: primary_artist(&album.artists),
        thumbnail: pick_thumbnail(&album.images, ALBUM_THUMBNAIL_MAX_PX),
        id: album.id,
        name: album.name,
        release_date: album.release_date,
        total_tracks: album.total_tracks,
    }
}

pub fn album_track(track: SimplifiedTrack) -> AlbumTrack {
    AlbumTrack {
        artist: primary_artist(&track.artists),
        id: track.id,
        name: track.name,
        track_number: track.track_number,
        duration_ms: track.duration_ms,
    }
}

/// Formats a track length as `m:ss`.
pub fn format_duration(duration_ms: u64) -> String {
    let millis = i64::try_from(duration_ms).unwrap_or(i64::MAX);
    let duration = TimeDelta::try_milliseconds(millis).unwrap_or_default();
    format!(
        "{}:{:02}",
        duration.num_minutes(),
        duration.num_seconds() % 60
    )
}

/// Builds the URL of the embeddable player for `selection`.
pub fn embed_url(selection: &Selection) -> String {
    format!(
        "{base}/{kind}/{id}",
        base = config::spotify_embed_url(),
        kind = selection.kind,
        id = selection.id
    )
}

pub fn track_rows(tracks: &[TrackItem]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            position: i + 1,
            name: t.name.clone(),
            artist: t.artist.clone(),
            thumbnail: t.thumbnail.clone().unwrap_or_else(|| NO_VALUE.to_string()),
        })
        .collect()
}

pub fn album_rows(albums: &[AlbumItem]) -> Vec<AlbumTableRow> {
    albums
        .iter()
        .enumerate()
        .map(|(i, a)| AlbumTableRow {
            position: i + 1,
            name: a.name.clone(),
            artist: a.artist.clone(),
            released: a
                .release_date
                .clone()
                .unwrap_or_else(|| NO_VALUE.to_string()),
            tracks: a
                .total_tracks
                .map(|n| n.to_string())
                .unwrap_or_else(|| NO_VALUE.to_string()),
            thumbnail: a.thumbnail.clone().unwrap_or_else(|| NO_VALUE.to_string()),
        })
        .collect()
}

pub fn album_track_rows(tracks: &[AlbumTrack]) -> Vec<AlbumTrackTableRow> {
    tracks
        .iter()
        .map(|t| AlbumTrackTableRow {
            track_number: t.track_number,
            name: t.name.clone(),
            artist: t.artist.clone(),
            duration: format_duration(t.duration_ms),
        })
        .collect()
}

/// Parses a REPL mode name into a [`SearchKind`].
pub fn parse_search_kind(s: &str) -> Result<SearchKind, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "track" | "tracks" => Ok(SearchKind::Track),
        "album" | "albums" => Ok(SearchKind::Album),
        other => Err(format!(
            "Invalid search type '{}'. Valid: track, album",
            other
        )),
    }
}

/// Parses one line of the interactive session.
///
/// Lines starting with `:` are commands, everything else (including an empty
/// line) is submitted as a search query.
pub fn parse_repl_command(line: &str) -> Result<ReplCommand, String> {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return Ok(ReplCommand::Query(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("track" | "tracks" | "album" | "albums"), None) => {
            parse_search_kind(command).map(ReplCommand::Kind)
        }
        (Some("play" | "p"), Some(n)) => n
            .parse::<usize>()
            .map(ReplCommand::Play)
            .map_err(|_| format!("Invalid result number '{}'", n)),
        (Some("play" | "p"), None) => Err("Usage: :play <number>".to_string()),
        (Some("open"), None) => Ok(ReplCommand::Open),
        (Some("help" | "h"), None) => Ok(ReplCommand::Help),
        (Some("quit" | "q" | "exit"), None) => Ok(ReplCommand::Quit),
        _ => Err(format!("Unknown command ':{}'. Type :help", command)),
    }
}

/// Spinner shown while a search is in flight. Hidden when `visible` is false.
pub fn spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
