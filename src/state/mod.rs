//! State management module
//!
//! Plain data and state machines behind the components:
//! - Media: raw files, persisted media references, the host-facing selection
//! - UploadPanelState: method, pending files, drive links, existing media
//! - CropRect / CropEditor: the adjustable crop region and pointer drags
//! - CropReview: the one-pass, per-file review workflow

mod media;
mod crop_rect;
mod crop_review;
mod upload_panel;

pub use media::*;
pub use crop_rect::*;
pub use crop_review::*;
pub use upload_panel::*;
