//! Plain-text rendering of the session state.

use std::fmt::Write;

use snapscout_search::MediaItem;
use snapscout_session::QueryState;

/// Shown while a fetch is pending.
pub const LOADING_TEXT: &str = "Loading...";
/// Shown before the first search, after a clear, or for an empty page.
pub const EMPTY_TEXT: &str = "Search something to see results";

/// Renders one state as the block printed after every change.
///
/// A failed fetch renders the error view instead of the grid, even though
/// the store still holds the previous results.
pub fn render_state(state: &QueryState) -> String {
    let mut out = String::new();
    let query = if state.query.is_empty() {
        "-"
    } else {
        state.query.as_str()
    };
    let _ = writeln!(out, "[{}] query: {}", state.active_tab, query);

    if state.loading {
        let _ = writeln!(out, "{LOADING_TEXT}");
    } else if let Some(error) = &state.error {
        let _ = writeln!(out, "Error: {}", error.user_message());
        if error.is_retryable() {
            let _ = writeln!(out, "Submit the same query again to retry.");
        }
    } else if state.results.is_empty() {
        let _ = writeln!(out, "{EMPTY_TEXT}");
    } else {
        for (index, item) in state.results.iter().enumerate() {
            render_item(&mut out, index + 1, item);
        }
    }

    out
}

fn render_item(out: &mut String, position: usize, item: &MediaItem) {
    let _ = writeln!(out, "{position:>3}. {}", item.caption());
    let _ = writeln!(out, "     preview: {}", item.preview_url);
    if let Some(playback) = &item.playback_url {
        let _ = writeln!(out, "     video:   {playback}");
    }
    if !item.attribution_url.is_empty() {
        let _ = writeln!(out, "     by:      {}", item.attribution_url);
    }
}
