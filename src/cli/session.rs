use std::io::Write;

use tabled::Table;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::{
    info,
    session::{SessionError, SessionView},
    spotify::{SpotifyApi, WebApiClient},
    success,
    types::{AlbumTrack, ReplCommand, SearchKind, SearchResults},
    utils, warning,
};

const HELP: &str = "\
  <text>      search for <text>
  :track      search tracks
  :album      search albums
  :play N     play result N
  :open       open the current selection again
  :help       show this help
  :quit       leave";

/// Mounts a session from `redirect_url` and runs the interactive loop.
///
/// When no redirect URL is given, one is read from stdin so that a URL
/// copied from the browser's address bar can be pasted.
pub async fn session(redirect_url: Option<String>, open_browser: bool) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let redirect_url = match redirect_url {
        Some(url) => Some(url),
        None => {
            prompt("Paste the redirect URL: ");
            next_line(&mut lines).await
        }
    };

    let mut view = SessionView::new(WebApiClient::new()).with_progress(true);
    if view.mount(redirect_url.as_deref()).is_ok() {
        success!("Authentication successful!");
    }

    run(&mut view, &mut lines, open_browser).await;
}

async fn run<A: SpotifyApi>(
    view: &mut SessionView<A>,
    lines: &mut Lines<BufReader<Stdin>>,
    open_browser: bool,
) {
    println!("{}", HELP);

    loop {
        prompt(&format!("{} > ", view.kind()));
        let Some(line) = next_line(lines).await else {
            break;
        };

        let command = match utils::parse_repl_command(&line) {
            Ok(command) => command,
            Err(e) => {
                warning!("{}", e);
                continue;
            }
        };

        match command {
            ReplCommand::Quit => break,
            ReplCommand::Help => println!("{}", HELP),
            ReplCommand::Kind(kind) => {
                view.set_kind(kind);
                info!("Searching {}s", kind);
            }
            ReplCommand::Query(query) => match view.submit(&query).await {
                Ok(results) => print_results(results),
                Err(SessionError::EmptyQuery) => warning!("{}", SessionError::EmptyQuery),
                // logged by the view
                Err(_) => {}
            },
            ReplCommand::Play(position) => {
                let selection = match view.select(position).await {
                    Ok(selection) => selection.clone(),
                    Err(SessionError::NoSuchItem(n)) => {
                        warning!("{}", SessionError::NoSuchItem(n));
                        continue;
                    }
                    Err(_) => continue,
                };

                if selection.kind == SearchKind::Album {
                    print_album_tracks(view.album_tracks());
                }
                play(&utils::embed_url(&selection), open_browser);
            }
            ReplCommand::Open => match view.embed_url() {
                Some(url) => play(&url, open_browser),
                None => warning!("Nothing selected yet."),
            },
        }
    }
}

fn print_results(results: &SearchResults) {
    match results {
        SearchResults::Tracks(tracks) if !tracks.is_empty() => {
            println!("Tracks");
            println!("{}", Table::new(utils::track_rows(tracks)));
        }
        SearchResults::Albums(albums) if !albums.is_empty() => {
            println!("Albums");
            println!("{}", Table::new(utils::album_rows(albums)));
        }
        _ => info!("No results."),
    }
}

fn print_album_tracks(tracks: &[AlbumTrack]) {
    if tracks.is_empty() {
        return;
    }
    println!("{}", Table::new(utils::album_track_rows(tracks)));
}

fn play(url: &str, open_browser: bool) {
    info!("Now playing: {}", url);
    if open_browser && webbrowser::open(url).is_err() {
        warning!("Failed to open browser. Please open the URL manually.");
    }
}

fn prompt(text: &str) {
    print!("{}", text);
    let _ = std::io::stdout().flush();
}

async fn next_line(lines: &mut Lines<BufReader<Stdin>>) -> Option<String> {
    match lines.next_line().await {
        Ok(line) => line,
        Err(e) => {
            warning!("Failed to read input: {}", e);
            None
        }
    }
}
