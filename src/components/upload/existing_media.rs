use dioxus::prelude::*;

use crate::constants::*;
use crate::state::{MediaRef, MediaSource};

fn badge_color(source: MediaSource) -> &'static str {
    match source {
        MediaSource::Upload => ACCENT_UPLOAD,
        MediaSource::DriveLink => ACCENT_DRIVE,
    }
}

/// Grid of already-persisted media with a per-item remove button.
#[component]
pub fn ExistingMediaGrid(media: Vec<MediaRef>, on_remove: EventHandler<usize>) -> Element {
    let mut hovered = use_signal(|| None::<usize>);
    let hovered_index = hovered();
    let tiles: Vec<_> = media
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let opacity = if hovered_index == Some(index) { 1 } else { 0 };
            (
                index,
                index + 1,
                item.url.clone(),
                item.source.badge_label(),
                badge_color(item.source),
                opacity,
            )
        })
        .collect();

    rsx! {
        div {
            style: "margin-top: 8px;",
            h4 { style: "margin: 0 0 12px 0; font-size: 13px; font-weight: 500; color: {TEXT_SECONDARY};", "Current Media:" }
            div {
                style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(120px, 1fr)); gap: 12px;",
                for (index, number, url, badge, color, opacity) in tiles {
                    div {
                        key: "{index}",
                        style: "position: relative;",
                        onmouseenter: move |_| hovered.set(Some(index)),
                        onmouseleave: move |_| hovered.set(None),
                        img {
                            src: "{url}",
                            alt: "Media {number}",
                            style: "
                                display: block; width: 100%; height: 80px; object-fit: cover;
                                border-radius: 6px; border: 1px solid {BORDER_DEFAULT};
                            ",
                        }
                        button {
                            r#type: "button",
                            title: "Remove",
                            style: "
                                position: absolute; top: -4px; right: -4px;
                                width: 20px; height: 20px; border-radius: 50%;
                                display: flex; align-items: center; justify-content: center;
                                background-color: {ACCENT_DANGER}; color: white; border: none;
                                font-size: 12px; cursor: pointer;
                                opacity: {opacity};
                                transition: opacity 0.15s ease;
                            ",
                            onclick: move |_| on_remove.call(index),
                            "×"
                        }
                        span {
                            style: "
                                position: absolute; bottom: 4px; right: 4px;
                                padding: 1px 4px; border-radius: 3px;
                                font-size: 10px; color: white;
                                background-color: {color};
                            ",
                            "{badge}"
                        }
                    }
                }
            }
        }
    }
}
