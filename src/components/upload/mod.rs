//! Media attachment form.
mod drive_links;
mod existing_media;
mod upload_panel;

pub use drive_links::DriveLinksSection;
pub use existing_media::ExistingMediaGrid;
pub use upload_panel::UploadPanel;
