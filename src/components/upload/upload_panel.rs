use dioxus::prelude::*;
use std::rc::Rc;

use crate::components::crop_review::CropReviewModal;
use crate::components::upload::{DriveLinksSection, ExistingMediaGrid};
use crate::config::AppConfig;
use crate::constants::*;
use crate::core::media::load_picked_files;
use crate::core::opener::{open_external, SharedOpener, SystemOpener};
use crate::state::{MediaRef, MediaSelection, UploadMethod, UploadPanelState};
use crate::utils::format_megabytes;

fn method_button_style(active: bool, accent: &str) -> String {
    let (background, border, color) = if active {
        (BG_HOVER, accent, accent)
    } else {
        ("transparent", BORDER_DEFAULT, TEXT_SECONDARY)
    };
    format!(
        "display: flex; align-items: center; justify-content: center; gap: 8px; \
         padding: 8px 16px; font-size: 13px; border-radius: 8px; cursor: pointer; \
         background-color: {background}; border: 1px solid {border}; color: {color}; \
         transition: all 0.15s ease;"
    )
}

/// Media attachment form: files picked from disk or pasted drive links.
///
/// Every change the host should know about goes through
/// `on_selection_change`. Picking files alone does not; the host hears about
/// them once the review pass completes.
#[component]
pub fn UploadPanel(
    existing_media: Vec<MediaRef>,
    on_selection_change: EventHandler<MediaSelection>,
) -> Element {
    let config = try_use_context::<AppConfig>().unwrap_or_default();
    let opener = try_use_context::<SharedOpener>()
        .unwrap_or_else(|| Rc::new(SystemOpener) as SharedOpener);

    let mut panel = use_signal(|| UploadPanelState::new(existing_media.clone()));

    use_effect(use_reactive((&existing_media,), move |(media,)| {
        if panel.peek().existing_media() != media.as_slice() {
            panel.write().replace_existing_media(media);
        }
    }));

    let notify = move |selection: MediaSelection| {
        log::debug!(
            "Selection changed: {:?}, {} file(s), {} link(s), {} existing",
            selection.method,
            selection.files.len(),
            selection.drive_links.len(),
            selection.existing_media.len()
        );
        on_selection_change.call(selection);
    };

    let pick_files = move |_: MouseEvent| {
        let all_media = [PICKER_IMAGE_EXTENSIONS, PICKER_VIDEO_EXTENSIONS].concat();
        let Some(paths) = rfd::FileDialog::new()
            .add_filter("Images and Videos", &all_media[..])
            .add_filter("Images", PICKER_IMAGE_EXTENSIONS)
            .add_filter("Videos", PICKER_VIDEO_EXTENSIONS)
            .set_title("Add Files")
            .pick_files()
        else {
            return;
        };
        spawn(async move {
            let files = load_picked_files(paths).await;
            if files.is_empty() {
                return;
            }
            let count = files.len();
            if panel.write().add_picked_files(files) {
                log::info!("Added {} file(s)", count);
            } else {
                log::info!("Discarded {} picked file(s) after leaving upload mode", count);
            }
        });
    };

    let open_drive_browser = {
        let opener = opener.clone();
        let drive_url = config.drive_url.clone();
        move |_: ()| {
            open_external(opener.as_ref(), &drive_url);
        }
    };

    let state = panel.read();
    let method = state.method();
    let file_rows: Vec<(usize, String, String)> = state
        .files()
        .iter()
        .enumerate()
        .map(|(index, file)| (index, file.name.clone(), format_megabytes(file.size())))
        .collect();
    let file_count = file_rows.len();
    let processed_count = state.processed().len();
    let links = state.drive_links().to_vec();
    let existing = state.existing_media().to_vec();
    let review_files = state.is_review_open().then(|| state.files().to_vec());
    drop(state);

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 16px;",

            // Method selection
            div {
                style: "display: flex; gap: 12px;",
                button {
                    r#type: "button",
                    style: method_button_style(method == UploadMethod::Upload, ACCENT_UPLOAD),
                    onclick: move |_| {
                        let selection = panel.write().set_method(UploadMethod::Upload);
                        notify(selection);
                    },
                    "⬆ Upload Files"
                }
                button {
                    r#type: "button",
                    style: method_button_style(method == UploadMethod::DriveLink, ACCENT_DRIVE),
                    onclick: move |_| {
                        let selection = panel.write().set_method(UploadMethod::DriveLink);
                        notify(selection);
                    },
                    "🔗 Google Drive Links"
                }
            }

            if method == UploadMethod::Upload {
                div {
                    style: "
                        display: flex; flex-direction: column; gap: 12px;
                        padding: 16px; border-radius: 8px;
                        background-color: {BG_SURFACE}; border: 1px solid {ACCENT_UPLOAD};
                    ",
                    div {
                        h4 { style: "margin: 0 0 4px 0; font-size: 14px; color: {ACCENT_UPLOAD};", "Upload from Computer" }
                        p {
                            style: "margin: 0; font-size: 12px; color: {TEXT_SECONDARY};",
                            "Select images and videos from your computer to upload."
                        }
                    }
                    div {
                        style: "display: flex; gap: 8px;",
                        button {
                            r#type: "button",
                            style: "
                                flex: 1; padding: 8px 16px; font-size: 13px; border-radius: 8px;
                                background-color: {ACCENT_UPLOAD}; color: white; border: none; cursor: pointer;
                            ",
                            onclick: pick_files,
                            "⬆ Add More Files"
                        }
                        button {
                            r#type: "button",
                            style: "
                                padding: 8px 16px; font-size: 13px; border-radius: 8px;
                                background-color: {BORDER_STRONG}; color: white; border: none; cursor: pointer;
                            ",
                            onclick: move |_| panel.write().clear_files(),
                            "Clear All"
                        }
                    }
                    p {
                        style: "margin: 0; font-size: 11px; color: {TEXT_MUTED};",
                        "You can select multiple files. Click \"Add More Files\" to add additional files."
                    }

                    if file_count > 0 {
                        div {
                            style: "display: flex; flex-direction: column; gap: 8px;",
                            p {
                                style: "margin: 0; font-size: 12px; font-weight: 500; color: {TEXT_PRIMARY};",
                                "Selected Files ({file_count}):"
                            }
                            div {
                                style: "display: flex; flex-direction: column; gap: 6px; max-height: 128px; overflow-y: auto;",
                                for (index, name, size) in file_rows {
                                    div {
                                        key: "{index}",
                                        style: "
                                            display: flex; align-items: center; gap: 8px;
                                            padding: 6px 8px; border-radius: 4px;
                                            font-size: 12px; color: {TEXT_SECONDARY};
                                            background-color: {BG_ELEVATED};
                                        ",
                                        span {
                                            style: "flex: 1; min-width: 0; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                                            "{name}"
                                        }
                                        span { style: "font-size: 11px; color: {TEXT_DIM};", "({size})" }
                                        button {
                                            r#type: "button",
                                            title: "Remove file",
                                            style: "
                                                padding: 0 4px; font-size: 14px;
                                                background: transparent; border: none;
                                                color: {ACCENT_DANGER}; cursor: pointer;
                                            ",
                                            onclick: move |_| panel.write().remove_file(index),
                                            "×"
                                        }
                                    }
                                }
                            }
                            button {
                                r#type: "button",
                                style: "
                                    align-self: flex-start; padding: 8px 16px; font-size: 13px; border-radius: 8px;
                                    background-color: {ACCENT_DRIVE}; color: white; border: none; cursor: pointer;
                                ",
                                onclick: move |_| {
                                    panel.write().open_review();
                                },
                                "✎ Crop & Edit Files"
                            }
                            if processed_count > 0 {
                                p {
                                    style: "margin: 0; font-size: 12px; color: {ACCENT_DRIVE};",
                                    "✓ {processed_count} files processed and ready to upload"
                                }
                            }
                        }
                    }
                }
            }

            if method == UploadMethod::DriveLink {
                DriveLinksSection {
                    links: links,
                    on_open_drive: open_drive_browser,
                    on_link_change: move |(index, value): (usize, String)| {
                        let selection = panel.write().set_drive_link(index, value);
                        if let Some(selection) = selection {
                            notify(selection);
                        }
                    },
                    on_add_link: move |_| panel.write().add_drive_link(),
                    on_remove_link: move |index: usize| {
                        let selection = panel.write().remove_drive_link(index);
                        if let Some(selection) = selection {
                            notify(selection);
                        }
                    },
                }
            }

            if !existing.is_empty() {
                ExistingMediaGrid {
                    media: existing,
                    on_remove: move |index: usize| {
                        let selection = panel.write().remove_existing_media(index);
                        if let Some(selection) = selection {
                            notify(selection);
                        }
                    },
                }
            }

            if let Some(files) = review_files {
                CropReviewModal {
                    files: files,
                    on_close: move |_| panel.write().close_review(),
                    on_complete: move |processed| {
                        let selection = panel.write().finish_review(processed);
                        notify(selection);
                    },
                }
            }
        }
    }
}
