//! Plain-text rendering of the view state for the terminal.
//!
//! Every function is a pure `&ViewState -> String` so the CLI can re-render on each
//! state change and tests can look at the output directly.

use crate::catalog::{Album, Track, YearEntry};
use crate::view_model::{ViewState, STATUS_COMPLETE};
use std::fmt::Write;

const BOLD_BLUE: &str = "\x1b[1m\x1b[34m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

pub fn render_status(state: &ViewState) -> String {
    let colour = if state.last_error.is_some() {
        RED
    } else if state.status_message == STATUS_COMPLETE {
        GREEN
    } else {
        YELLOW
    };
    format!("{colour}{}{RESET}", state.status_message)
}

pub fn render_error(state: &ViewState) -> Option<String> {
    state
        .last_error
        .as_ref()
        .map(|error| format!("{RED}Error: {error}{RESET}"))
}

/// Totals plus the list of years that can be opened with `content <YEAR>`.
pub fn render_summary(state: &ViewState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{BOLD_BLUE}Albums: {}  Tracks: {}{RESET}",
        state.album_count, state.track_count
    );

    if state.years.is_empty() {
        let _ = writeln!(out, "{YELLOW}No years in the catalog yet.{RESET}");
    } else {
        let years: Vec<String> = state.years.iter().map(YearEntry::to_string).collect();
        let _ = writeln!(out, "Years: {}", years.join(" "));
    }
    out
}

pub fn render_content(state: &ViewState, year: i32) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{BOLD_BLUE}{year}: {} albums, {} tracks{RESET}",
        state.albums.len(),
        state.tracks.len()
    );

    if !state.albums.is_empty() {
        let _ = writeln!(out, "{GREEN}Albums{RESET}");
        for album in &state.albums {
            let _ = writeln!(out, "  {}", album_line(album));
        }
    }

    if !state.tracks.is_empty() {
        let _ = writeln!(out, "{GREEN}Tracks{RESET}");
        for track in &state.tracks {
            let _ = writeln!(out, "  {}", track_line(track));
        }
    }
    out
}

fn album_line(album: &Album) -> String {
    format!(
        "{} [{}] {} tracks, {}",
        text_or_dash(&album.collection_name),
        text_or_dash(&album.primary_genre_name),
        album
            .track_count
            .map(|count| count.to_string())
            .unwrap_or_else(|| "-".to_string()),
        price(album.collection_price)
    )
}

fn track_line(track: &Track) -> String {
    let number = track
        .track_number
        .map(|n| format!("{n:>2}. "))
        .unwrap_or_default();
    let collection = track
        .collection_name
        .as_deref()
        .map(|name| format!(" ({name})"))
        .unwrap_or_default();

    format!(
        "{number}{} - {}{collection}, {}",
        text_or_dash(&track.artist_name),
        text_or_dash(&track.track_name),
        price(track.track_price)
    )
}

fn text_or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn price(value: Option<f64>) -> String {
    value
        .map(|p| format!("${p:.2}"))
        .unwrap_or_else(|| "no price".to_string())
}
