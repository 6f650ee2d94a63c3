use dioxus::prelude::*;

use crate::components::common::LinkField;
use crate::constants::*;

#[component]
pub fn DriveLinksSection(
    links: Vec<String>,
    on_open_drive: EventHandler<()>,
    on_link_change: EventHandler<(usize, String)>,
    on_add_link: EventHandler<()>,
    on_remove_link: EventHandler<usize>,
) -> Element {
    let removable = links.len() > 1;

    rsx! {
        div {
            style: "
                display: flex; flex-direction: column; gap: 10px;
                padding: 16px; border-radius: 8px;
                background-color: {BG_SURFACE}; border: 1px solid {ACCENT_DRIVE};
            ",
            div {
                style: "display: flex; align-items: center; justify-content: space-between; gap: 12px;",
                div {
                    h4 { style: "margin: 0 0 4px 0; font-size: 14px; color: {ACCENT_DRIVE};", "Use Google Drive Links" }
                    p {
                        style: "margin: 0; font-size: 12px; color: {TEXT_SECONDARY};",
                        "Paste Google Drive share links for images and videos:"
                    }
                }
                button {
                    r#type: "button",
                    style: "
                        padding: 4px 12px; font-size: 12px; border-radius: 4px;
                        background-color: {ACCENT_DRIVE}; color: white; border: none; cursor: pointer;
                    ",
                    onclick: move |_| on_open_drive.call(()),
                    "Open Drive"
                }
            }

            for (index, link) in links.into_iter().enumerate() {
                div {
                    key: "{index}",
                    style: "display: flex; align-items: center; gap: 8px;",
                    LinkField {
                        value: link,
                        placeholder: DRIVE_LINK_PLACEHOLDER,
                        on_change: move |value: String| on_link_change.call((index, value)),
                    }
                    if removable {
                        button {
                            r#type: "button",
                            title: "Remove link",
                            style: "
                                padding: 6px 8px; font-size: 13px; border-radius: 4px;
                                background: transparent; border: none;
                                color: {ACCENT_DANGER}; cursor: pointer;
                            ",
                            onclick: move |_| on_remove_link.call(index),
                            "×"
                        }
                    }
                }
            }

            button {
                r#type: "button",
                style: "
                    align-self: flex-start; padding: 0; font-size: 12px; font-weight: 500;
                    background: transparent; border: none; color: {ACCENT_UPLOAD}; cursor: pointer;
                ",
                onclick: move |_| on_add_link.call(()),
                "+ Add another link"
            }

            div {
                style: "
                    margin-top: 6px; padding: 10px 12px; border-radius: 6px;
                    font-size: 12px; color: {TEXT_PRIMARY};
                    background-color: rgba(234, 179, 8, 0.1); border: 1px solid {ACCENT_WARNING};
                ",
                strong { "Note: " }
                "Make sure your Google Drive files are set to \"Anyone with the link can view\" for them to display properly on your website."
            }
        }
    }
}
