use dioxus::prelude::*;
use crate::constants::*;
use crate::utils::{parse_f32_input, parse_i64_input};

/// Labelled range slider. Commits on every input event.
#[component]
pub fn RangeField(
    label: &'static str,
    value: f32,
    min: f32,
    max: f32,
    step: &'static str,
    /// Text shown under the slider, e.g. `"200px"`
    readout: String,
    on_change: EventHandler<f32>,
    /// Rendered to the right of the slider
    accessory: Option<Element>,
) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 4px; min-width: 0;",
            span { style: "font-size: 11px; font-weight: 500; color: {TEXT_SECONDARY};", "{label}" }
            div {
                style: "display: flex; align-items: center; gap: 6px;",
                input {
                    r#type: "range",
                    min: "{min}",
                    max: "{max}",
                    step: "{step}",
                    value: "{value}",
                    style: "flex: 1; min-width: 0; accent-color: {ACCENT_CROP};",
                    oninput: move |e| {
                        let parsed = parse_f32_input(&e.value(), value).clamp(min, max);
                        on_change.call(parsed);
                    },
                }
                {accessory}
            }
            span { style: "font-size: 10px; color: {TEXT_MUTED};", "{readout}" }
        }
    }
}

/// Integer input that commits on blur or Enter, clamped to `[min, max]`.
#[component]
pub fn IntegerField(
    label: &'static str,
    value: i64,
    min: i64,
    max: i64,
    on_commit: EventHandler<i64>,
) -> Element {
    let mut text = use_signal(|| value.to_string());
    let mut last_prop_value = use_signal(|| value);

    if value != *last_prop_value.peek() {
        text.set(value.to_string());
        last_prop_value.set(value);
    }

    let make_commit = || {
        let mut text = text.clone();
        let mut last_prop_value = last_prop_value.clone();
        let on_commit = on_commit.clone();
        move || {
            let next = parse_i64_input(&text(), value).clamp(min, max);
            on_commit.call(next);
            text.set(next.to_string());
            last_prop_value.set(next);
        }
    };

    let mut commit_on_blur = make_commit();
    let mut commit_on_key = make_commit();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 4px; min-width: 0;",
            span { style: "font-size: 11px; font-weight: 500; color: {TEXT_SECONDARY};", "{label}" }
            input {
                r#type: "number",
                step: "1",
                min: "{min}",
                max: "{max}",
                value: "{text()}",
                style: "
                    width: 100%; min-width: 0; box-sizing: border-box;
                    padding: 6px 8px; font-size: 12px;
                    background-color: {BG_SURFACE}; color: {TEXT_PRIMARY};
                    border: 1px solid {BORDER_DEFAULT}; border-radius: 4px;
                    outline: none;
                    user-select: text;
                ",
                oninput: move |e| text.set(e.value()),
                onblur: move |_| commit_on_blur(),
                onkeydown: move |e: KeyboardEvent| {
                    if e.key() == Key::Enter {
                        commit_on_key();
                    }
                },
            }
        }
    }
}

/// Single-line text input that reports every edit.
#[component]
pub fn LinkField(
    value: String,
    placeholder: &'static str,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        input {
            r#type: "url",
            value: "{value}",
            placeholder: "{placeholder}",
            style: "
                flex: 1; min-width: 0; box-sizing: border-box;
                padding: 8px 10px; font-size: 12px;
                background-color: {BG_SURFACE}; color: {TEXT_PRIMARY};
                border: 1px solid {BORDER_DEFAULT}; border-radius: 4px;
                outline: none;
                user-select: text;
            ",
            oninput: move |e| on_change.call(e.value()),
        }
    }
}
