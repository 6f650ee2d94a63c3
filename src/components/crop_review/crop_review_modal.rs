use dioxus::prelude::*;
use uuid::Uuid;

use crate::components::crop_review::{ImageCropEditor, StageBounds, VideoSettingsEditor};
use crate::config::AppConfig;
use crate::constants::*;
use crate::core::crop::render_crop_async;
use crate::core::preview_urls::PreviewUrl;
use crate::state::{
    CropReview, MediaKind, ProcessRequest, ProcessedFile, RawFile, ReviewPhase, ReviewStep,
};

fn register_preview(file: Option<&RawFile>) -> Option<(Uuid, PreviewUrl)> {
    file.map(|file| (file.id, PreviewUrl::register(file)))
}

fn title_for(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "Crop Image",
        MediaKind::Video => "Edit Video",
        MediaKind::Unsupported => "Process File",
    }
}

/// Walks `files` one at a time. Mounted only while the review is open, so
/// all per-file state is dropped with the component.
#[component]
pub fn CropReviewModal(
    files: Vec<RawFile>,
    on_close: EventHandler<()>,
    on_complete: EventHandler<Vec<ProcessedFile>>,
) -> Element {
    let config = try_use_context::<AppConfig>().unwrap_or_default();
    let jpeg_quality = config.jpeg_quality;
    let stage_height = config.crop_container_height;

    let mut review = use_signal(|| CropReview::new(files.clone()));
    let mut preview = use_signal(|| register_preview(files.first()));
    let mut stage = use_signal(|| None::<StageBounds>);

    // Swap the preview whenever the current file changes; the old guard is
    // released as it is replaced.
    use_effect(move || {
        let current = review.read().current_file().cloned();
        let stale = match (current.as_ref(), preview.peek().as_ref()) {
            (Some(file), Some((id, _))) => file.id != *id,
            (None, None) => false,
            _ => true,
        };
        if stale {
            preview.set(register_preview(current.as_ref()));
        }
    });

    let mut finish = move |step: ReviewStep| match step {
        // The next editor reports its own layout once mounted.
        ReviewStep::Advanced(_) => stage.set(None),
        ReviewStep::Completed(processed) => {
            log::info!("Review finished with {} file(s)", processed.len());
            preview.set(None);
            on_complete.call(processed);
        }
    };

    let on_process = move |_: MouseEvent| {
        let display = stage.peek().as_ref().and_then(|bounds| bounds.display_size());
        let request = review.write().process(display);
        match request {
            ProcessRequest::Encode(job) => {
                spawn(async move {
                    let result = render_crop_async(job, jpeg_quality).await;
                    let step = review.write().finish_encode(result);
                    if let Some(step) = step {
                        finish(step);
                    }
                });
            }
            ProcessRequest::Done(step) => finish(step),
            ProcessRequest::Ignored => {}
        }
    };

    let on_skip = move |_: MouseEvent| {
        let step = review.write().skip();
        if let Some(step) = step {
            finish(step);
        }
    };

    let close = move |_: MouseEvent| {
        preview.set(None);
        on_close.call(());
    };

    let state = review.read();
    let Some(file) = state.current_file().cloned() else {
        return rsx! {};
    };
    let kind = file.kind();
    let file_name = file.name.clone();
    let file_key = file.id.to_string();
    let title = title_for(kind);
    let position = state.index() + 1;
    let total = state.total();
    let processed_count = state.processed_count();
    let phase = state.phase().clone();
    let is_last = state.is_last();
    let video_settings = state.video;
    drop(state);

    let preview_url = preview
        .read()
        .as_ref()
        .filter(|(id, _)| *id == file.id)
        .map(|(_, url)| url.url().to_string());
    let busy = phase == ReviewPhase::Encoding;
    let primary_label = match &phase {
        ReviewPhase::Encoding => "Processing…",
        ReviewPhase::Failed(_) => "Retry",
        _ if is_last => "Finish",
        _ => "Next",
    };
    let primary_icon = if kind == MediaKind::Image { "✂" } else { "✓" };
    let failure = match &phase {
        ReviewPhase::Failed(message) => Some(message.clone()),
        _ => None,
    };
    let button_opacity = if busy { "0.6" } else { "1" };
    let button_cursor = if busy { "default" } else { "pointer" };

    rsx! {
        div {
            style: "
                position: fixed; top: 0; left: 0; right: 0; bottom: 0;
                background-color: rgba(0, 0, 0, 0.75);
                display: flex; align-items: center; justify-content: center;
                padding: 8px; z-index: 2000;
            ",
            onclick: close,
            div {
                style: "
                    width: 100%; max-width: 896px; max-height: 95vh;
                    display: flex; flex-direction: column;
                    background-color: {BG_ELEVATED};
                    border: 1px solid {BORDER_DEFAULT}; border-radius: 8px;
                    box-shadow: 0 10px 25px rgba(0,0,0,0.5);
                ",
                onclick: move |e| e.stop_propagation(),

                // Header
                div {
                    style: "
                        display: flex; align-items: center; justify-content: space-between;
                        padding: 16px; border-bottom: 1px solid {BORDER_DEFAULT}; flex-shrink: 0;
                    ",
                    div {
                        style: "display: flex; align-items: center; gap: 12px; min-width: 0;",
                        span { style: "font-size: 18px; color: {ACCENT_CROP};", "⛶" }
                        div {
                            style: "min-width: 0;",
                            h3 { style: "margin: 0; font-size: 16px; color: {TEXT_PRIMARY};", "{title}" }
                            p {
                                style: "margin: 2px 0 0 0; font-size: 12px; color: {TEXT_SECONDARY}; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                                "File {position} of {total}: {file_name}"
                            }
                        }
                    }
                    button {
                        r#type: "button",
                        style: "
                            width: 32px; height: 32px; border-radius: 50%;
                            background: transparent; border: none;
                            color: {TEXT_SECONDARY}; font-size: 18px; cursor: pointer;
                        ",
                        onclick: close,
                        "×"
                    }
                }

                // Body
                div {
                    style: "flex: 1; overflow-y: auto; padding: 16px;",
                    if let Some(message) = failure {
                        div {
                            style: "
                                margin-bottom: 12px; padding: 10px 12px; border-radius: 6px;
                                font-size: 12px; color: {TEXT_PRIMARY};
                                background-color: rgba(239, 68, 68, 0.12);
                                border: 1px solid {ACCENT_DANGER};
                            ",
                            "Could not crop this image: {message}. Retry or skip it."
                        }
                    }
                    {match (kind, preview_url) {
                        (MediaKind::Image, Some(url)) => rsx! {
                            ImageCropEditor {
                                key: "{file_key}",
                                review: review,
                                stage: stage,
                                preview_url: url,
                                stage_height: stage_height,
                            }
                        },
                        (MediaKind::Video, Some(url)) => rsx! {
                            VideoSettingsEditor {
                                key: "{file_key}",
                                preview_url: url,
                                settings: video_settings,
                                on_change: move |settings| review.write().video = settings,
                            }
                        },
                        (MediaKind::Unsupported, _) => rsx! {
                            div {
                                style: "padding: 32px 0; text-align: center; font-size: 13px; color: {TEXT_SECONDARY};",
                                "File type not supported for editing"
                            }
                        },
                        _ => rsx! {
                            div {
                                style: "height: {stage_height}px; display: flex; align-items: center; justify-content: center; color: {TEXT_MUTED}; font-size: 12px;",
                                "Loading preview…"
                            }
                        },
                    }}
                }

                // Footer
                div {
                    style: "
                        display: flex; align-items: center; justify-content: space-between;
                        padding: 16px; border-top: 1px solid {BORDER_DEFAULT};
                        background-color: {BG_SURFACE}; flex-shrink: 0;
                        border-radius: 0 0 8px 8px;
                    ",
                    div {
                        style: "font-size: 12px; color: {TEXT_SECONDARY};",
                        "{processed_count} of {total} files processed"
                    }
                    div {
                        style: "display: flex; gap: 12px;",
                        button {
                            r#type: "button",
                            disabled: busy,
                            style: "
                                padding: 8px 16px; font-size: 13px; border-radius: 6px;
                                background: transparent; color: {TEXT_SECONDARY};
                                border: 1px solid {BORDER_STRONG};
                                opacity: {button_opacity}; cursor: {button_cursor};
                            ",
                            onclick: on_skip,
                            "Skip"
                        }
                        button {
                            r#type: "button",
                            disabled: busy,
                            style: "
                                display: flex; align-items: center; gap: 8px;
                                padding: 8px 16px; font-size: 13px; border-radius: 6px;
                                background-color: {ACCENT_CROP}; color: white; border: none;
                                opacity: {button_opacity}; cursor: {button_cursor};
                            ",
                            onclick: on_process,
                            span { "{primary_icon}" }
                            "{primary_label}"
                        }
                    }
                }
            }
        }
    }
}
