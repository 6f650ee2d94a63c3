//! UI components grouped by feature domain.
pub mod common;
pub mod crop_review;
pub mod upload;

pub use crop_review::CropReviewModal;
pub use upload::UploadPanel;
