//! Media types
//!
//! Raw files picked by the admin, references to media that is already
//! persisted, and the selection snapshot reported to the host.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// How the admin attaches new media.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadMethod {
    /// Binary files picked from disk
    #[default]
    Upload,
    /// Share links pasted from an external drive
    #[serde(rename = "drive")]
    DriveLink,
}

/// Where a persisted media item originally came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSource {
    Upload,
    #[serde(rename = "drive")]
    DriveLink,
}

impl MediaSource {
    pub fn badge_label(&self) -> &'static str {
        match self {
            MediaSource::Upload => "Upload",
            MediaSource::DriveLink => "Drive",
        }
    }
}

/// Already-persisted media shown for editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub url: String,
    pub source: MediaSource,
}

impl MediaRef {
    pub fn new(url: impl Into<String>, source: MediaSource) -> Self {
        Self {
            url: url.into(),
            source,
        }
    }
}

/// Broad category of a raw file, derived from its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Unsupported,
}

impl MediaKind {
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            MediaKind::Image
        } else if mime.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Unsupported
        }
    }
}

/// A file picked by the admin. Content is immutable once read.
#[derive(Debug, Clone)]
pub struct RawFile {
    /// Stable identity for list keys; derived files get a fresh id
    pub id: Uuid,
    /// File name including extension
    pub name: String,
    /// MIME type, e.g. `image/png`
    pub mime: String,
    /// File content
    pub bytes: Arc<Vec<u8>>,
}

impl PartialEq for RawFile {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.mime == other.mime
            && Arc::ptr_eq(&self.bytes, &other.bytes)
    }
}

impl RawFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            mime: mime.into(),
            bytes: Arc::new(bytes),
        }
    }

    /// Build a new file with the same name and type but different content.
    pub fn derive_with(&self, bytes: Vec<u8>) -> Self {
        Self::new(self.name.clone(), self.mime.clone(), bytes)
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_mime(&self.mime)
    }

    /// True when both values share the same underlying content buffer.
    pub fn same_content(&self, other: &RawFile) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }
}

/// Target quality for a video, recorded for downstream processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoQuality {
    Low,
    #[default]
    Medium,
    High,
}

impl VideoQuality {
    pub const ALL: [VideoQuality; 3] = [VideoQuality::Low, VideoQuality::Medium, VideoQuality::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            VideoQuality::Low => "low",
            VideoQuality::Medium => "medium",
            VideoQuality::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VideoQuality::Low => "Low (480p)",
            VideoQuality::Medium => "Medium (720p)",
            VideoQuality::High => "High (1080p)",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.as_str() == value)
    }
}

/// Video trim settings captured in the review modal. Not applied to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEditSettings {
    pub max_duration_seconds: u32,
    pub quality: VideoQuality,
}

impl VideoEditSettings {
    pub const MIN_DURATION_SECONDS: u32 = 1;
    pub const MAX_DURATION_SECONDS: u32 = 60;

    pub fn set_max_duration(&mut self, seconds: i64) {
        let clamped = seconds.clamp(
            Self::MIN_DURATION_SECONDS as i64,
            Self::MAX_DURATION_SECONDS as i64,
        );
        self.max_duration_seconds = clamped as u32;
    }
}

impl Default for VideoEditSettings {
    fn default() -> Self {
        Self {
            max_duration_seconds: 30,
            quality: VideoQuality::default(),
        }
    }
}

/// How a reviewed file ended up in the processed list.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// Image content was re-rendered from the crop rectangle
    Cropped,
    /// Original video content plus the settings captured for it
    VideoSettings(VideoEditSettings),
    /// Original content, untouched
    Passthrough,
}

/// One entry of the review result.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedFile {
    pub file: RawFile,
    pub outcome: ProcessOutcome,
}

/// Video settings attached to a file of a [`MediaSelection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEdit {
    /// Position of the file in `MediaSelection::files`
    pub index: usize,
    pub settings: VideoEditSettings,
}

/// Snapshot reported to the host on every meaningful change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaSelection {
    pub method: UploadMethod,
    pub files: Vec<RawFile>,
    pub drive_links: Vec<String>,
    pub existing_media: Vec<MediaRef>,
    pub video_edits: Vec<VideoEdit>,
}

impl MediaSelection {
    /// Empty selection under `method`, keeping the persisted media.
    pub fn empty(method: UploadMethod, existing_media: Vec<MediaRef>) -> Self {
        Self {
            method,
            existing_media,
            ..Default::default()
        }
    }
}

/// Split a review result into the files and the video settings that go with them.
pub fn split_processed(processed: Vec<ProcessedFile>) -> (Vec<RawFile>, Vec<VideoEdit>) {
    let mut files = Vec::with_capacity(processed.len());
    let mut edits = Vec::new();
    for (index, entry) in processed.into_iter().enumerate() {
        if let ProcessOutcome::VideoSettings(settings) = entry.outcome {
            edits.push(VideoEdit { index, settings });
        }
        files.push(entry.file);
    }
    (files, edits)
}
