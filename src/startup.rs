//! # Front-end entry point
//!
//! Wires the request client into a view-model, mounts it, runs the requested action and
//! renders the result. While the action runs, every status change is printed as it happens.
//!
//! # Steps:
//! 1. Loads the configuration
//! 2. Mounts the view-model (initial year refresh)
//! 3. Runs the action
//! 4. Renders the final state

use crate::api_client::{CatalogApi, RequestClient};
use crate::configuration::{self, ConfigFolder, Settings};
use crate::render;
use crate::view_model::{ViewModel, ViewState};
use anyhow::{bail, Context};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Years,
    Content(i32),
    Create(Option<String>),
}

pub fn load_settings(cfg_folder: &ConfigFolder, api_root: Option<&str>) -> anyhow::Result<Settings> {
    let mut settings = configuration::get_configuration(&cfg_folder.config_file)
        .context("Unable to parse configuration file")?;

    if let Some(api_root) = api_root {
        settings.api_settings.api_root_url = api_root.to_string();
    }

    Ok(settings)
}

pub async fn run(settings: Settings, action: Action) -> anyhow::Result<()> {
    let client = RequestClient::new(&settings.api_settings);
    println!(
        "\x1b[1m\x1b[34mUsing backend at {}\x1b[0m",
        client.root_url()
    );

    let view_model = ViewModel::new(client, ViewState::new(&settings.default_artist_name));
    let observer = tokio::spawn(print_status_changes(view_model.subscribe()));

    let outcome = run_action(&view_model, action).await;
    drop(view_model);
    join_observer(observer).await;

    let output = outcome?;
    print!("{output}");
    Ok(())
}

/// Mounts the view-model, runs `action` and returns the rendered final state.
///
/// A failed initial load stops `years` and `content`; `create` carries on, since it
/// reloads the year list itself once the artist is submitted.
pub async fn run_action<A: CatalogApi>(
    view_model: &ViewModel<A>,
    action: Action,
) -> anyhow::Result<String> {
    let mounted = view_model.mount().await;

    match action {
        Action::Years => {
            mounted.context("Failed to load the year list")?;
            Ok(render::render_summary(&view_model.snapshot()))
        }
        Action::Content(year) => {
            mounted.context("Failed to load the year list")?;
            view_model
                .update_content(year)
                .await
                .with_context(|| format!("Failed to load content for {year}"))?;
            Ok(render::render_content(&view_model.snapshot(), year))
        }
        Action::Create(artist_name) => {
            if let Err(e) = mounted {
                warn!(error = %e, "initial year refresh failed, creating anyway");
            }
            if let Some(name) = artist_name {
                view_model.set_artist_name(&name);
            }
            if !view_model.can_create() {
                bail!("Artist name is empty, nothing to create");
            }

            let result = view_model.create_content().await;
            let state = view_model.snapshot();
            if let Some(error) = render::render_error(&state) {
                eprintln!("{error}");
            }
            result.context("Failed to create the artist")?;
            Ok(render::render_summary(&state))
        }
    }
}

/// Waits for the status observer to drain; returns `false` if it panicked or was cancelled.
async fn join_observer(observer: JoinHandle<()>) -> bool {
    match observer.await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "status observer stopped abnormally");
            false
        }
    }
}

async fn print_status_changes(mut receiver: watch::Receiver<ViewState>) {
    let mut last_status = receiver.borrow().status_message.clone();

    while receiver.changed().await.is_ok() {
        let state = receiver.borrow_and_update().clone();
        if state.status_message != last_status {
            println!("{}", render::render_status(&state));
            last_status = state.status_message;
        }
    }
}
