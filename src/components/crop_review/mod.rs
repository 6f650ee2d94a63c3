//! Per-file review modal and its editors.
mod crop_review_modal;
mod image_crop_editor;
mod video_settings_editor;

pub use crop_review_modal::CropReviewModal;
pub use image_crop_editor::{ImageCropEditor, StageBounds};
pub use video_settings_editor::VideoSettingsEditor;
