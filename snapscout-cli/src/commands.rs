//! CLI command implementations

use std::time::Duration;

use anyhow::Context;
use clap::Subcommand;
use snapscout_core::{SnapscoutConfig, TabSwitchPolicy};
use snapscout_search::{MediaKind, MediaSearchService};
use snapscout_session::{SessionHandle, spawn_controller_on_tab};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::render_state;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a single search and print the results
    Search {
        /// Search text
        query: String,
        /// Which tab to search (photos or videos)
        #[arg(short, long, default_value = "photos")]
        kind: MediaKind,
        /// Results per page
        #[arg(long)]
        per_page: Option<u32>,
        /// Use built-in demo data instead of the live providers
        #[arg(long)]
        demo: bool,
        /// Delay every demo response by this many milliseconds
        #[arg(long, value_name = "MS", default_value_t = 0, requires = "demo")]
        latency: u64,
    },
    /// Interactive search session reading commands from stdin
    Browse {
        /// Tab active at start (photos or videos)
        #[arg(short, long, default_value = "photos")]
        kind: MediaKind,
        /// Drop the current results as soon as the tab changes
        #[arg(long)]
        clear_on_tab_switch: bool,
        /// Use built-in demo data instead of the live providers
        #[arg(long)]
        demo: bool,
        /// Delay every demo response by this many milliseconds
        #[arg(long, value_name = "MS", default_value_t = 0, requires = "demo")]
        latency: u64,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Search {
            query,
            kind,
            per_page,
            demo,
            latency,
        } => {
            let mut config = SnapscoutConfig::from_env();
            if let Some(per_page) = per_page {
                config.search.per_page = per_page;
            }
            let demo = demo.then(|| Duration::from_millis(latency));
            search_once(&config, query, kind, demo).await
        }
        Commands::Browse {
            kind,
            clear_on_tab_switch,
            demo,
            latency,
        } => {
            let mut config = SnapscoutConfig::from_env();
            if clear_on_tab_switch {
                config.search.tab_switch = TabSwitchPolicy::ClearResults;
            }
            let demo = demo.then(|| Duration::from_millis(latency));
            browse(&config, kind, demo).await
        }
    }
}

/// Builds the search service from configuration, or the offline demo when
/// `demo` carries its response latency.
///
/// # Errors
/// - Invalid configuration values
/// - HTTP client construction failure
pub fn build_service(
    config: &SnapscoutConfig,
    demo: Option<Duration>,
) -> anyhow::Result<MediaSearchService> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    if let Some(latency) = demo {
        tracing::info!("Using demo providers (latency {:?})", latency);
        return Ok(MediaSearchService::new_demo_with_latency(latency));
    }

    if !config.providers.photo.has_credential() {
        tracing::warn!("No photo API key set; photo searches will fail authentication");
    }
    if !config.providers.video.has_credential() {
        tracing::warn!("No video API key set; video searches will fail authentication");
    }

    MediaSearchService::from_config(config).context("failed to build media providers")
}

/// Runs one session to settlement and prints it
///
/// # Errors
/// - Configuration or service construction failure
/// - The search itself failed (after the error view is printed)
pub async fn search_once(
    config: &SnapscoutConfig,
    query: String,
    kind: MediaKind,
    demo: Option<Duration>,
) -> anyhow::Result<()> {
    let service = build_service(config, demo)?;
    let handle = spawn_controller_on_tab(service, config, kind);

    let outcome = handle.submit_query(query).await?;
    if outcome.session().is_none() {
        anyhow::bail!("query is empty");
    }

    let state = handle.wait_until_settled().await?;
    print!("{}", render_state(&state));
    handle.shutdown().await?;

    if let Some(error) = state.error {
        return Err(error).context("search failed");
    }

    Ok(())
}

/// One line of input in the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseInput {
    Submit(String),
    SelectTab(MediaKind),
    Clear,
    Quit,
    Help,
    /// Blank line or unknown `:` command
    Ignored,
}

/// Interprets a line typed in `browse`.
pub fn parse_browse_line(line: &str) -> BrowseInput {
    let line = line.trim();
    if line.is_empty() {
        return BrowseInput::Ignored;
    }

    let Some(command) = line.strip_prefix(':') else {
        return BrowseInput::Submit(line.to_string());
    };

    match command.trim().to_lowercase().as_str() {
        "photos" | "photo" => BrowseInput::SelectTab(MediaKind::Photo),
        "videos" | "video" => BrowseInput::SelectTab(MediaKind::Video),
        "clear" => BrowseInput::Clear,
        "quit" | "q" | "exit" => BrowseInput::Quit,
        "help" | "h" => BrowseInput::Help,
        _ => BrowseInput::Ignored,
    }
}

const BROWSE_HELP: &str = "Type text to search. :photos / :videos switch tab, :clear resets, :quit exits.";

/// Interactive session: stdin drives user actions, every state change is
/// printed as it is published.
///
/// # Errors
/// - Configuration or service construction failure
/// - Reading stdin failed
/// - The controller stopped unexpectedly
pub async fn browse(
    config: &SnapscoutConfig,
    kind: MediaKind,
    demo: Option<Duration>,
) -> anyhow::Result<()> {
    let service = build_service(config, demo)?;
    let handle = spawn_controller_on_tab(service, config, kind);
    let mut updates = handle.subscribe();

    println!("{BROWSE_HELP}");
    print!("{}", render_state(&updates.borrow_and_update()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                if !dispatch(&handle, parse_browse_line(&line)).await? {
                    break;
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    anyhow::bail!("session controller stopped");
                }
                let state = updates.borrow_and_update().clone();
                print!("{}", render_state(&state));
            }
        }
    }

    handle.shutdown().await?;
    Ok(())
}

/// Applies one input. Returns false when the session should end.
async fn dispatch(handle: &SessionHandle, input: BrowseInput) -> anyhow::Result<bool> {
    match input {
        BrowseInput::Submit(text) => {
            let outcome = handle.submit_query(text).await?;
            tracing::debug!("Submit dispatched: {:?}", outcome);
        }
        BrowseInput::SelectTab(kind) => {
            let outcome = handle.select_tab(kind).await?;
            tracing::debug!("Tab switch dispatched: {:?}", outcome);
        }
        BrowseInput::Clear => handle.clear_results().await?,
        BrowseInput::Help => println!("{BROWSE_HELP}"),
        BrowseInput::Quit => return Ok(false),
        BrowseInput::Ignored => {}
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use snapscout_search::providers::ScriptedProvider;

    use super::*;

    #[test]
    fn test_parse_browse_line() {
        assert_eq!(
            parse_browse_line("  red fox "),
            BrowseInput::Submit("red fox".to_string())
        );
        assert_eq!(
            parse_browse_line(":videos"),
            BrowseInput::SelectTab(MediaKind::Video)
        );
        assert_eq!(
            parse_browse_line(":Photos"),
            BrowseInput::SelectTab(MediaKind::Photo)
        );
        assert_eq!(parse_browse_line(":clear"), BrowseInput::Clear);
        assert_eq!(parse_browse_line(":q"), BrowseInput::Quit);
        assert_eq!(parse_browse_line("   "), BrowseInput::Ignored);
        assert_eq!(parse_browse_line(":unknown"), BrowseInput::Ignored);
    }

    #[test]
    fn test_build_service_rejects_bad_page_size() {
        let mut config = SnapscoutConfig::for_testing();
        config.search.per_page = 0;

        let error = build_service(&config, Some(Duration::ZERO)).unwrap_err();
        assert!(error.to_string().starts_with("Invalid configuration"));
    }

    #[tokio::test]
    async fn test_dispatch_drives_controller() {
        let photos = ScriptedProvider::new(MediaKind::Photo);
        let videos = ScriptedProvider::new(MediaKind::Video);
        let service =
            MediaSearchService::with_providers(Arc::new(photos.clone()), Arc::new(videos.clone()));
        let handle =
            spawn_controller_on_tab(service, &SnapscoutConfig::for_testing(), MediaKind::Photo);

        assert!(dispatch(&handle, parse_browse_line("kites")).await.unwrap());
        handle.wait_until_settled().await.unwrap();
        assert!(dispatch(&handle, parse_browse_line(":videos")).await.unwrap());
        let state = handle.wait_until_settled().await.unwrap();

        assert_eq!(state.active_tab, MediaKind::Video);
        assert_eq!(photos.call_count(), 1);
        assert_eq!(videos.call_count(), 1);

        assert!(dispatch(&handle, BrowseInput::Clear).await.unwrap());
        assert!(handle.snapshot().results.is_empty());
        assert!(!dispatch(&handle, BrowseInput::Quit).await.unwrap());
    }

    #[tokio::test]
    async fn test_demo_latency_shows_loading() {
        let config = SnapscoutConfig::for_testing();
        let service = build_service(&config, Some(Duration::from_millis(200))).unwrap();
        let handle = spawn_controller_on_tab(service, &config, MediaKind::Photo);

        assert!(dispatch(&handle, parse_browse_line("harbor")).await.unwrap());
        let pending = render_state(&handle.snapshot());
        assert!(pending.contains(crate::render::LOADING_TEXT));

        let state = handle.wait_until_settled().await.unwrap();
        assert_eq!(state.results.len(), config.search.per_page as usize);
        assert!(!render_state(&state).contains(crate::render::LOADING_TEXT));
    }
}
