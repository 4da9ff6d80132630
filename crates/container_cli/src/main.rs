//! Terminal presentation of the container list.
//!
//! # Responsibility
//! - Load a listing payload from disk and feed it to the core controller.
//! - Replay one typed search term, an optional submit and an optional sort
//!   selection, then print both derived views.
//! - Own display-only shaping: text truncation and date extraction.

mod render;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use container_core::{
    init_logging, load_containers, ContainerListController, ControllerConfig, JsonFileSource,
    LoadState,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "container-list")]
#[command(about = "Render owned and shared container lists")]
struct Cli {
    /// JSON file with `ownContainers` and `sharedContainers` arrays.
    #[arg(long)]
    payload: PathBuf,

    /// Optional controller config (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search term as typed into the search box.
    #[arg(long, default_value = "")]
    search: String,

    /// Press the commit key after typing the search term.
    #[arg(long)]
    submit: bool,

    /// Sort selector value: ascending|descending|timeAscending|timeDescending.
    #[arg(long)]
    sort: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it.
    #[arg(long)]
    log_dir: Option<String>,

    #[arg(long, default_value_t = container_core::default_log_level().to_string())]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(cli.log_level.as_str(), log_dir).context("failed to initialize logging")?;
    }

    let config = match cli.config.as_ref() {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            ControllerConfig::from_json_str(raw.as_str())
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => ControllerConfig::default(),
    };

    let timeout = config.load_timeout();
    let mut controller = ContainerListController::new(config);
    let signal = controller
        .begin_load()
        .ok_or_else(|| anyhow!("container load could not start"))?;
    let source = JsonFileSource::new(cli.payload.clone());
    let outcome = load_containers(&source, timeout, signal).await;
    controller.apply_load(outcome);

    if let LoadState::Failed(err) = controller.load_state() {
        let hint = if err.is_retryable() {
            "retry may succeed"
        } else {
            "fix the payload and retry"
        };
        return Err(anyhow!("{err} ({hint})"));
    }

    controller.set_search_term(cli.search.as_str());
    if cli.submit {
        controller.submit_search();
    }
    if let Some(sort) = cli.sort.as_deref() {
        controller.select_sort_value(sort);
    }

    let views = controller.views();
    print!("{}", render::render_views(&views));
    controller.dispose();
    Ok(())
}
