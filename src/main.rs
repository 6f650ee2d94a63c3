//! Media Attach
//!
//! Admin media attachment panel with a per-file crop and video-settings
//! review step.

mod app;
mod components;
mod config;
mod constants;
mod core;
mod error;
mod state;
mod utils;

use clap::Parser;
use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use std::path::PathBuf;

use crate::app::LaunchOptions;
use crate::config::AppConfig;
use crate::core::preview_urls::{self, PREVIEW_PROTOCOL};
use crate::state::{MediaRef, MediaSource};

#[derive(Parser, Debug)]
#[command(name = "media-attach", version, about = "Attach, crop and review media before upload")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// URL of an already uploaded media item; repeatable
    #[arg(long = "existing", value_name = "URL")]
    existing: Vec<String>,

    /// URL of an already linked drive item; repeatable
    #[arg(long = "existing-drive", value_name = "URL")]
    existing_drive: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    let existing_media: Vec<MediaRef> = cli
        .existing
        .into_iter()
        .map(|url| MediaRef::new(url, MediaSource::Upload))
        .chain(
            cli.existing_drive
                .into_iter()
                .map(|url| MediaRef::new(url, MediaSource::DriveLink)),
        )
        .collect();
    log::info!("Starting with {} existing media item(s)", existing_media.len());

    // Configure the window
    let desktop = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title("Media Attach")
                .with_inner_size(LogicalSize::new(config.window_width, config.window_height))
                .with_resizable(true),
        )
        .with_menu(None)
        .with_custom_protocol(PREVIEW_PROTOCOL, |_webview_id, request| {
            preview_urls::serve(&request)
        });

    dioxus::LaunchBuilder::desktop()
        .with_cfg(desktop)
        .with_context(LaunchOptions {
            config,
            existing_media,
        })
        .launch(app::App);
    Ok(())
}
