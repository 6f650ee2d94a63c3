use dioxus::prelude::*;

use crate::components::common::IntegerField;
use crate::constants::*;
use crate::state::{VideoEditSettings, VideoQuality};

/// Preview player plus the trim settings recorded for the current video.
#[component]
pub fn VideoSettingsEditor(
    preview_url: String,
    settings: VideoEditSettings,
    on_change: EventHandler<VideoEditSettings>,
) -> Element {
    let selected = settings.quality.as_str();
    let options: Vec<(&'static str, &'static str, bool)> = VideoQuality::ALL
        .iter()
        .map(|quality| (quality.as_str(), quality.label(), *quality == settings.quality))
        .collect();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 14px;",
            div {
                style: "
                    padding: 12px; border-radius: 8px;
                    background-color: {BG_DEEPEST}; border: 1px solid {BORDER_DEFAULT};
                ",
                video {
                    src: "{preview_url}",
                    controls: true,
                    style: "display: block; width: 100%; max-height: 256px; border-radius: 4px;",
                }
            }
            div {
                style: "display: grid; grid-template-columns: repeat(2, minmax(0, 1fr)); gap: 16px;",
                IntegerField {
                    label: "Max Duration (seconds)",
                    value: settings.max_duration_seconds as i64,
                    min: VideoEditSettings::MIN_DURATION_SECONDS as i64,
                    max: VideoEditSettings::MAX_DURATION_SECONDS as i64,
                    on_commit: move |seconds: i64| {
                        let mut next = settings;
                        next.set_max_duration(seconds);
                        on_change.call(next);
                    },
                }
                div {
                    style: "display: flex; flex-direction: column; gap: 4px; min-width: 0;",
                    span { style: "font-size: 11px; font-weight: 500; color: {TEXT_SECONDARY};", "Quality" }
                    select {
                        style: "
                            width: 100%; padding: 6px 8px; font-size: 12px;
                            background-color: {BG_SURFACE}; color: {TEXT_PRIMARY};
                            border: 1px solid {BORDER_DEFAULT}; border-radius: 4px;
                            outline: none;
                        ",
                        value: "{selected}",
                        onchange: move |e| {
                            if let Some(quality) = VideoQuality::parse(&e.value()) {
                                on_change.call(VideoEditSettings { quality, ..settings });
                            }
                        },
                        for (value, label, is_selected) in options.iter().copied() {
                            option {
                                key: "{value}",
                                value: value,
                                selected: is_selected,
                                "{label}"
                            }
                        }
                    }
                }
            }
            p {
                style: "margin: 0; font-size: 11px; color: {TEXT_MUTED};",
                "These settings are passed along with the original file; the video itself is not trimmed here."
            }
        }
    }
}
