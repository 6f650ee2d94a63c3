use dioxus::prelude::*;
use serde::Deserialize;
use std::time::Duration;

use crate::components::common::RangeField;
use crate::constants::*;
use crate::state::{ContainerSize, CropReview, DisplaySize, DragMode, Handle, Point};

/// Layout of the crop stage as reported by [`CROP_STAGE_SCRIPT`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct StageBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Layout size of the preview image, once it has loaded
    pub image_width: Option<f64>,
    pub image_height: Option<f64>,
}

impl StageBounds {
    pub fn container(&self) -> ContainerSize {
        ContainerSize::new(self.width as f32, self.height as f32)
    }

    pub fn display_size(&self) -> Option<DisplaySize> {
        match (self.image_width, self.image_height) {
            (Some(width), Some(height)) if width > 0.0 && height > 0.0 => Some(DisplaySize {
                width: width as f32,
                height: height as f32,
            }),
            _ => None,
        }
    }

    /// Convert client coordinates into stage space.
    pub fn to_local(&self, client_x: f64, client_y: f64) -> Point {
        Point::new((client_x - self.left) as f32, (client_y - self.top) as f32)
    }
}

fn fallback_container(stage_height: f64) -> ContainerSize {
    ContainerSize::new(CROP_STAGE_FALLBACK_WIDTH as f32, stage_height as f32)
}

fn handle_style(handle: Handle) -> String {
    let offset = -(CROP_HANDLE_SIZE / 2.0);
    let (vertical, horizontal) = match handle {
        Handle::TopLeft => ("top", "left"),
        Handle::TopRight => ("top", "right"),
        Handle::BottomLeft => ("bottom", "left"),
        Handle::BottomRight => ("bottom", "right"),
    };
    format!(
        "position: absolute; {vertical}: {offset}px; {horizontal}: {offset}px; \
         width: {size}px; height: {size}px; box-sizing: border-box; \
         background-color: white; border: 2px solid {ACCENT_CROP}; border-radius: 2px; \
         cursor: {cursor};",
        size = CROP_HANDLE_SIZE,
        cursor = handle.cursor(),
    )
}

#[component]
pub fn ImageCropEditor(
    review: Signal<CropReview>,
    stage: Signal<Option<StageBounds>>,
    preview_url: String,
    stage_height: f64,
) -> Element {
    let mut stage_eval = use_signal(|| None::<document::Eval>);

    use_effect(move || {
        if stage_eval().is_some() {
            return;
        }
        let eval = document::eval(CROP_STAGE_SCRIPT);
        stage_eval.set(Some(eval));
    });

    use_future(move || {
        let mut stage = stage.clone();
        let mut review = review.clone();
        let stage_eval = stage_eval.clone();
        async move {
            loop {
                let Some(eval) = stage_eval() else {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    continue;
                };
                let mut eval = eval;
                loop {
                    match eval.recv::<StageBounds>().await {
                        Ok(bounds) => {
                            let previous = stage();
                            if previous != Some(bounds) {
                                if previous.map(|p| p.container()) != Some(bounds.container()) {
                                    review.write().editor.fit_into(bounds.container());
                                }
                                stage.set(Some(bounds));
                            }
                        }
                        Err(_) => break,
                    }
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        }
    });

    let container = move || {
        stage()
            .map(|bounds| bounds.container())
            .unwrap_or_else(|| fallback_container(stage_height))
    };

    let editor = review.read().editor;
    let rect = editor.rect;
    let rect_cursor = match editor.drag_mode() {
        Some(DragMode::Move) => "grabbing",
        Some(DragMode::Resize(handle)) => handle.cursor(),
        None => "grab",
    };
    let width_readout = format!("{}px", rect.width.round());
    let height_readout = format!("{}px", rect.height.round());
    let scale_readout = format!("{:.1}x", rect.scale);
    let rotation_readout = format!("{}°", rect.rotation);
    let (rect_x, rect_y) = (rect.x, rect.y);
    let (rect_w, rect_h) = (rect.width, rect.height);
    let (scale, rotation) = (rect.scale, rect.rotation);

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 14px;",

            div {
                id: CROP_STAGE_ID,
                style: "
                    position: relative; width: 100%; height: {stage_height}px;
                    overflow: hidden; border-radius: 8px;
                    background-color: {BG_DEEPEST}; border: 1px solid {BORDER_DEFAULT};
                    cursor: crosshair; user-select: none;
                ",
                onmousedown: move |e| {
                    let Some(bounds) = stage() else {
                        return;
                    };
                    let coords = e.client_coordinates();
                    let point = bounds.to_local(coords.x, coords.y);
                    if review.write().editor.pointer_down(point) {
                        e.prevent_default();
                    }
                },
                onmousemove: move |e| {
                    if !review.peek().editor.is_dragging() {
                        return;
                    }
                    let Some(bounds) = stage() else {
                        return;
                    };
                    let coords = e.client_coordinates();
                    let point = bounds.to_local(coords.x, coords.y);
                    review.write().editor.pointer_move(point, bounds.container());
                },
                onmouseup: move |_| review.write().editor.pointer_up(),
                onmouseleave: move |_| {
                    if review.peek().editor.is_dragging() {
                        review.write().editor.pointer_up();
                    }
                },

                img {
                    id: CROP_STAGE_IMAGE_ID,
                    src: "{preview_url}",
                    alt: "Preview",
                    draggable: "false",
                    style: "
                        display: block; max-width: 100%; max-height: 100%;
                        object-fit: contain; pointer-events: none;
                        transform: scale({scale}) rotate({rotation}deg);
                        transform-origin: center;
                    ",
                }

                div {
                    style: "
                        position: absolute; box-sizing: border-box;
                        left: {rect_x}px; top: {rect_y}px;
                        width: {rect_w}px; height: {rect_h}px;
                        border: 2px dashed white; cursor: {rect_cursor};
                        background-color: rgba(0, 0, 0, 0.3);
                        box-shadow: 0 0 0 9999px rgba(0, 0, 0, 0.5);
                    ",
                    for handle in Handle::ALL {
                        div { key: "{handle:?}", style: handle_style(handle) }
                    }
                    div {
                        style: "
                            position: absolute; top: 50%; left: 50%;
                            transform: translate(-50%, -50%);
                            width: 20px; height: 20px; border-radius: 50%;
                            display: flex; align-items: center; justify-content: center;
                            background-color: {ACCENT_CROP}; color: white; font-size: 11px;
                            pointer-events: none;
                        ",
                        "✥"
                    }
                }
            }

            div {
                style: "
                    padding: 10px 12px; border-radius: 6px; font-size: 12px;
                    background-color: {BG_SURFACE}; border: 1px solid {BORDER_SUBTLE};
                    color: {TEXT_SECONDARY};
                ",
                strong { style: "color: {TEXT_PRIMARY};", "How to crop: " }
                "Drag the selection to position it and pull a corner to resize. The selected area is kept; everything else is darkened."
            }

            div {
                style: "display: grid; grid-template-columns: repeat(4, minmax(0, 1fr)); gap: 16px;",
                RangeField {
                    label: "Width",
                    value: rect.width,
                    min: CROP_WIDTH_RANGE.0,
                    max: CROP_WIDTH_RANGE.1,
                    step: "1",
                    readout: width_readout,
                    on_change: move |width: f32| {
                        let container = container();
                        review.write().editor.rect.set_width(width, container);
                    },
                }
                RangeField {
                    label: "Height",
                    value: rect.height,
                    min: CROP_HEIGHT_RANGE.0,
                    max: CROP_HEIGHT_RANGE.1,
                    step: "1",
                    readout: height_readout,
                    on_change: move |height: f32| {
                        let container = container();
                        review.write().editor.rect.set_height(height, container);
                    },
                }
                RangeField {
                    label: "Scale",
                    value: rect.scale,
                    min: CROP_MIN_SCALE,
                    max: CROP_MAX_SCALE,
                    step: "0.1",
                    readout: scale_readout,
                    on_change: move |scale: f32| review.write().editor.rect.set_scale(scale),
                }
                RangeField {
                    label: "Rotation",
                    value: rect.rotation as f32,
                    min: 0.0,
                    max: 360.0,
                    step: "1",
                    readout: rotation_readout,
                    on_change: move |degrees: f32| {
                        review.write().editor.rect.set_rotation(degrees.round() as i32)
                    },
                    accessory: rsx! {
                        button {
                            r#type: "button",
                            title: "Rotate 90°",
                            style: "
                                padding: 2px 6px; font-size: 13px; cursor: pointer;
                                background: transparent; border: 1px solid {BORDER_DEFAULT};
                                border-radius: 4px; color: {TEXT_SECONDARY};
                            ",
                            onclick: move |_| review.write().editor.rect.rotate_quarter(),
                            "⟳"
                        }
                    },
                }
            }
        }
    }
}
