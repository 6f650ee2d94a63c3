//! Root application component
//!
//! A small host page around [`UploadPanel`]: it owns the canonical selection,
//! logs every change it is told about, and shows a summary of what would be
//! uploaded.

use dioxus::prelude::*;
use serde::Serialize;
use std::rc::Rc;

use crate::components::UploadPanel;
use crate::config::AppConfig;
use crate::constants::*;
use crate::core::opener::{SharedOpener, SystemOpener};
use crate::state::{MediaRef, MediaSelection, UploadMethod};
use crate::utils::format_megabytes;

/// Startup data handed to the root component.
#[derive(Clone, Debug, Default)]
pub struct LaunchOptions {
    pub config: AppConfig,
    pub existing_media: Vec<MediaRef>,
}

/// Loggable digest of a selection; file bytes stay out of the log.
#[derive(Debug, Serialize)]
struct SelectionDigest<'a> {
    method: UploadMethod,
    files: Vec<FileDigest<'a>>,
    drive_links: &'a [String],
    existing_media: &'a [MediaRef],
    video_edits: &'a [crate::state::VideoEdit],
}

#[derive(Debug, Serialize)]
struct FileDigest<'a> {
    name: &'a str,
    mime: &'a str,
    size: usize,
}

impl<'a> SelectionDigest<'a> {
    fn new(selection: &'a MediaSelection) -> Self {
        Self {
            method: selection.method,
            files: selection
                .files
                .iter()
                .map(|file| FileDigest {
                    name: &file.name,
                    mime: &file.mime,
                    size: file.size(),
                })
                .collect(),
            drive_links: &selection.drive_links,
            existing_media: &selection.existing_media,
            video_edits: &selection.video_edits,
        }
    }
}

fn log_selection(selection: &MediaSelection) {
    match serde_json::to_string(&SelectionDigest::new(selection)) {
        Ok(json) => log::info!("Selection changed: {}", json),
        Err(err) => log::warn!("Could not serialize selection: {}", err),
    }
}

#[component]
pub fn App() -> Element {
    let options = try_use_context::<LaunchOptions>().unwrap_or_default();
    use_context_provider(|| options.config.clone());
    use_context_provider(|| Rc::new(SystemOpener) as SharedOpener);

    let mut existing_media = use_signal(|| options.existing_media.clone());
    let mut selection = use_signal(|| None::<MediaSelection>);

    let summary = selection.read().clone();

    rsx! {
        div {
            style: "
                min-height: 100vh; box-sizing: border-box; padding: 24px;
                background-color: {BG_BASE}; color: {TEXT_PRIMARY};
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
            ",
            div {
                style: "max-width: 880px; margin: 0 auto; display: flex; flex-direction: column; gap: 20px;",
                h2 { style: "margin: 0; font-size: 18px;", "Attach Media" }

                UploadPanel {
                    existing_media: existing_media(),
                    on_selection_change: move |next: MediaSelection| {
                        log_selection(&next);
                        existing_media.set(next.existing_media.clone());
                        selection.set(Some(next));
                    },
                }

                SelectionSummary { selection: summary }
            }
        }
    }
}

#[component]
fn SelectionSummary(#[props(!optional)] selection: Option<MediaSelection>) -> Element {
    let Some(selection) = selection else {
        return rsx! {
            p { style: "margin: 0; font-size: 12px; color: {TEXT_MUTED};", "No changes reported yet." }
        };
    };

    let method = match selection.method {
        UploadMethod::Upload => "Upload",
        UploadMethod::DriveLink => "Drive links",
    };
    let files: Vec<(usize, String)> = selection
        .files
        .iter()
        .enumerate()
        .map(|(index, file)| {
            let edit = selection
                .video_edits
                .iter()
                .find(|edit| edit.index == index)
                .map(|edit| {
                    format!(
                        ", max {}s at {}",
                        edit.settings.max_duration_seconds,
                        edit.settings.quality.label()
                    )
                })
                .unwrap_or_default();
            (index, format!("{} ({}{})", file.name, format_megabytes(file.size()), edit))
        })
        .collect();
    let links: Vec<(usize, String)> = selection.drive_links.iter().cloned().enumerate().collect();
    let existing_count = selection.existing_media.len();

    rsx! {
        div {
            style: "
                padding: 14px 16px; border-radius: 8px; font-size: 12px;
                background-color: {BG_ELEVATED}; border: 1px solid {BORDER_SUBTLE};
                color: {TEXT_SECONDARY};
            ",
            div { style: "margin-bottom: 6px; color: {TEXT_PRIMARY}; font-weight: 500;", "Last reported selection" }
            div { "Method: {method}" }
            div { "Existing media kept: {existing_count}" }
            for (index, line) in files {
                div { key: "file-{index}", "File: {line}" }
            }
            for (index, link) in links {
                div { key: "link-{index}", "Link: {link}" }
            }
        }
    }
}
