//! Sequential per-file review workflow.
//!
//! Files are visited strictly forward, one at a time. Each file is either
//! processed (images are re-rendered from the crop rectangle, videos carry
//! their captured settings) or skipped. Once the last file is handled the
//! accumulated list is handed back in a single [`ReviewStep::Completed`].

use crate::error::MediaError;
use crate::state::{
    CropEditor, CropRect, MediaKind, ProcessOutcome, ProcessedFile, RawFile, VideoEditSettings,
};

/// Rendered size of the preview image on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySize {
    pub width: f32,
    pub height: f32,
}

/// Everything needed to render a cropped derivative off the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub struct CropJob {
    pub file: RawFile,
    pub rect: CropRect,
    /// On-screen size of the image; `None` means it was shown at natural size
    pub display: Option<DisplaySize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReviewPhase {
    /// Waiting for the admin to process or skip the current file
    Reviewing,
    /// A crop of the current file is being encoded
    Encoding,
    /// Encoding the current file failed; retry or skip
    Failed(String),
    /// Every file was handled, or there were none
    Finished,
}

/// Result of a transition that moved past the current file.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewStep {
    /// Now reviewing the file at this index
    Advanced(usize),
    /// The last file was handled; this is the full processed list
    Completed(Vec<ProcessedFile>),
}

/// What the caller has to do after asking to process the current file.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessRequest {
    /// Render this job, then report back through [`CropReview::finish_encode`]
    Encode(CropJob),
    /// The file was handled without any rendering
    Done(ReviewStep),
    /// Nothing to process in the current phase
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CropReview {
    files: Vec<RawFile>,
    index: usize,
    processed: Vec<ProcessedFile>,
    phase: ReviewPhase,
    pub editor: CropEditor,
    pub video: VideoEditSettings,
}

impl CropReview {
    pub fn new(files: Vec<RawFile>) -> Self {
        let phase = if files.is_empty() {
            ReviewPhase::Finished
        } else {
            ReviewPhase::Reviewing
        };
        Self {
            files,
            index: 0,
            processed: Vec::new(),
            phase,
            editor: CropEditor::default(),
            video: VideoEditSettings::default(),
        }
    }

    pub fn phase(&self) -> &ReviewPhase {
        &self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.files.len()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == ReviewPhase::Finished
    }

    /// The file under review, if any.
    pub fn current_file(&self) -> Option<&RawFile> {
        if self.is_finished() {
            return None;
        }
        self.files.get(self.index)
    }

    /// Process the current file. Images need an encode round-trip; everything
    /// else is handled immediately.
    pub fn process(&mut self, display: Option<DisplaySize>) -> ProcessRequest {
        if !matches!(self.phase, ReviewPhase::Reviewing | ReviewPhase::Failed(_)) {
            return ProcessRequest::Ignored;
        }
        let Some(file) = self.current_file().cloned() else {
            return ProcessRequest::Ignored;
        };

        match file.kind() {
            MediaKind::Image => {
                self.phase = ReviewPhase::Encoding;
                log::debug!("Encoding crop of {} ({}/{})", file.name, self.index + 1, self.total());
                ProcessRequest::Encode(CropJob {
                    file,
                    rect: self.editor.rect,
                    display,
                })
            }
            MediaKind::Video => {
                let outcome = ProcessOutcome::VideoSettings(self.video);
                ProcessRequest::Done(self.push_and_advance(file, outcome))
            }
            MediaKind::Unsupported => {
                ProcessRequest::Done(self.push_and_advance(file, ProcessOutcome::Passthrough))
            }
        }
    }

    /// Report the outcome of an [`ProcessRequest::Encode`] job.
    ///
    /// A failure leaves the review on the same file in [`ReviewPhase::Failed`].
    pub fn finish_encode(&mut self, result: Result<RawFile, MediaError>) -> Option<ReviewStep> {
        if self.phase != ReviewPhase::Encoding {
            return None;
        }
        match result {
            Ok(file) => Some(self.push_and_advance(file, ProcessOutcome::Cropped)),
            Err(err) => {
                log::error!("Error processing file: {}", err);
                self.phase = ReviewPhase::Failed(err.to_string());
                None
            }
        }
    }

    /// Keep the current file as-is and move on. Not allowed mid-encode.
    pub fn skip(&mut self) -> Option<ReviewStep> {
        if !matches!(self.phase, ReviewPhase::Reviewing | ReviewPhase::Failed(_)) {
            return None;
        }
        let file = self.current_file().cloned()?;
        Some(self.push_and_advance(file, ProcessOutcome::Passthrough))
    }

    fn push_and_advance(&mut self, file: RawFile, outcome: ProcessOutcome) -> ReviewStep {
        self.processed.push(ProcessedFile { file, outcome });
        if self.index + 1 < self.files.len() {
            self.index += 1;
            self.editor.reset();
            self.video = VideoEditSettings::default();
            self.phase = ReviewPhase::Reviewing;
            log::debug!("Reviewing file {}/{}", self.index + 1, self.total());
            ReviewStep::Advanced(self.index)
        } else {
            self.phase = ReviewPhase::Finished;
            ReviewStep::Completed(std::mem::take(&mut self.processed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Point, VideoQuality};

    fn files() -> Vec<RawFile> {
        vec![
            RawFile::new("img1.png", "image/png", vec![1, 2, 3]),
            RawFile::new("clip.mp4", "video/mp4", vec![4, 5, 6]),
            RawFile::new("doc.txt", "text/plain", vec![7, 8, 9]),
        ]
    }

    #[test]
    fn test_empty_review_is_finished() {
        let review = CropReview::new(Vec::new());
        assert!(review.is_finished());
        assert!(review.current_file().is_none());
    }

    #[test]
    fn test_image_process_requests_encode() {
        let mut review = CropReview::new(files());
        let display = Some(DisplaySize { width: 400.0, height: 300.0 });
        let ProcessRequest::Encode(job) = review.process(display) else {
            panic!("expected encode request");
        };
        assert_eq!(job.file.name, "img1.png");
        assert_eq!(job.rect, CropRect::default());
        assert_eq!(job.display, display);
        assert_eq!(review.phase(), &ReviewPhase::Encoding);
        // Second click while encoding does nothing.
        assert_eq!(review.process(display), ProcessRequest::Ignored);
        assert!(review.skip().is_none());
    }

    #[test]
    fn test_advance_resets_editor_and_video() {
        let mut review = CropReview::new(files());
        review.editor.rect.set_scale(1.8);
        review.editor.rect.set_rotation(90);
        review.editor.pointer_down(Point::new(100.0, 100.0));
        review.video.quality = VideoQuality::High;
        let ProcessRequest::Encode(job) = review.process(None) else {
            panic!("expected encode request");
        };
        let step = review.finish_encode(Ok(job.file.derive_with(vec![0])));
        assert_eq!(step, Some(ReviewStep::Advanced(1)));
        assert_eq!(review.editor.rect, CropRect::default());
        assert!(!review.editor.is_dragging());
        assert_eq!(review.video, VideoEditSettings::default());
        assert_eq!(review.current_file().map(|f| f.name.as_str()), Some("clip.mp4"));
    }

    #[test]
    fn test_process_process_skip_end_to_end() {
        let originals = files();
        let mut review = CropReview::new(originals.clone());

        let ProcessRequest::Encode(job) = review.process(None) else {
            panic!("expected encode request");
        };
        let cropped = job.file.derive_with(vec![42]);
        assert_eq!(review.finish_encode(Ok(cropped.clone())), Some(ReviewStep::Advanced(1)));

        review.video.set_max_duration(12);
        let video_settings = review.video;
        assert_eq!(
            review.process(None),
            ProcessRequest::Done(ReviewStep::Advanced(2))
        );

        let Some(ReviewStep::Completed(processed)) = review.skip() else {
            panic!("expected completion");
        };
        assert_eq!(processed.len(), 3);
        assert_eq!(processed[0].file, cropped);
        assert_eq!(processed[0].file.name, "img1.png");
        assert_eq!(processed[0].file.mime, "image/png");
        assert_eq!(processed[0].outcome, ProcessOutcome::Cropped);
        assert!(processed[1].file.same_content(&originals[1]));
        assert_eq!(processed[1].outcome, ProcessOutcome::VideoSettings(video_settings));
        assert!(processed[2].file.same_content(&originals[2]));
        assert_eq!(processed[2].outcome, ProcessOutcome::Passthrough);
        assert!(review.is_finished());
        assert!(review.current_file().is_none());
    }

    #[test]
    fn test_encode_failure_is_recoverable() {
        let mut review = CropReview::new(files());
        let _ = review.process(None);
        let step = review.finish_encode(Err(MediaError::UnsupportedFormat("image/x-foo".into())));
        assert!(step.is_none());
        assert!(matches!(review.phase(), ReviewPhase::Failed(_)));
        assert_eq!(review.index(), 0);
        assert_eq!(review.processed_count(), 0);

        // Retry goes back to encoding.
        assert!(matches!(review.process(None), ProcessRequest::Encode(_)));
        let _ = review.finish_encode(Err(MediaError::Task("boom".into())));

        // Skip from the failed state keeps the original.
        assert_eq!(review.skip(), Some(ReviewStep::Advanced(1)));
        assert_eq!(review.processed_count(), 1);
    }

    #[test]
    fn test_stray_encode_result_is_ignored() {
        let mut review = CropReview::new(files());
        let file = RawFile::new("x.png", "image/png", vec![]);
        assert!(review.finish_encode(Ok(file)).is_none());
        assert_eq!(review.index(), 0);
    }

    #[test]
    fn test_single_file_skip_completes() {
        let only = RawFile::new("doc.txt", "text/plain", vec![1]);
        let mut review = CropReview::new(vec![only.clone()]);
        assert!(review.is_last());
        let Some(ReviewStep::Completed(processed)) = review.skip() else {
            panic!("expected completion");
        };
        assert_eq!(processed.len(), 1);
        assert!(processed[0].file.same_content(&only));
        assert!(review.skip().is_none());
    }
}
