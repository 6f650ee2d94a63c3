//! Upload panel selection state.
//!
//! Operations that the host has to hear about return the [`MediaSelection`]
//! to report; the component forwards it through its change callback.

use crate::state::{
    split_processed, MediaRef, MediaSelection, ProcessedFile, RawFile, UploadMethod, VideoEdit,
};

#[derive(Debug, Clone, PartialEq)]
pub struct UploadPanelState {
    method: UploadMethod,
    files: Vec<RawFile>,
    /// Editable link slots; never empty
    drive_links: Vec<String>,
    existing_media: Vec<MediaRef>,
    /// Result of the last completed review pass over `files`
    processed: Vec<RawFile>,
    video_edits: Vec<VideoEdit>,
    review_open: bool,
}

impl Default for UploadPanelState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl UploadPanelState {
    pub fn new(existing_media: Vec<MediaRef>) -> Self {
        Self {
            method: UploadMethod::Upload,
            files: Vec::new(),
            drive_links: vec![String::new()],
            existing_media,
            processed: Vec::new(),
            video_edits: Vec::new(),
            review_open: false,
        }
    }

    pub fn method(&self) -> UploadMethod {
        self.method
    }

    pub fn files(&self) -> &[RawFile] {
        &self.files
    }

    pub fn drive_links(&self) -> &[String] {
        &self.drive_links
    }

    pub fn existing_media(&self) -> &[MediaRef] {
        &self.existing_media
    }

    pub fn processed(&self) -> &[RawFile] {
        &self.processed
    }

    pub fn is_review_open(&self) -> bool {
        self.review_open
    }

    /// Link slots with blank or whitespace-only entries removed.
    pub fn filtered_links(&self) -> Vec<String> {
        self.drive_links
            .iter()
            .filter(|link| !link.trim().is_empty())
            .cloned()
            .collect()
    }

    /// Full selection as the host should see it right now. Reviewed files
    /// stand in for the raw ones once a review pass has completed.
    pub fn selection(&self) -> MediaSelection {
        let (files, video_edits) = if self.processed.is_empty() {
            (self.files.clone(), Vec::new())
        } else {
            (self.processed.clone(), self.video_edits.clone())
        };
        MediaSelection {
            method: self.method,
            files,
            drive_links: self.filtered_links(),
            existing_media: self.existing_media.clone(),
            video_edits,
        }
    }

    /// Switch method, dropping pending files and link text.
    pub fn set_method(&mut self, method: UploadMethod) -> MediaSelection {
        self.method = method;
        self.drive_links = vec![String::new()];
        self.files.clear();
        self.clear_processed();
        MediaSelection::empty(method, self.existing_media.clone())
    }

    /// Append a batch of picked files. The host hears about them after review.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = RawFile>) {
        self.files.extend(files);
        self.clear_processed();
    }

    /// Append files that finished loading in the background. Dropped if the
    /// panel left upload mode meanwhile, since switching methods clears files.
    pub fn add_picked_files(&mut self, files: Vec<RawFile>) -> bool {
        if self.method != UploadMethod::Upload {
            return false;
        }
        self.add_files(files);
        true
    }

    pub fn remove_file(&mut self, index: usize) {
        if index < self.files.len() {
            self.files.remove(index);
            self.clear_processed();
        }
    }

    pub fn clear_files(&mut self) {
        self.files.clear();
        self.clear_processed();
    }

    pub fn set_drive_link(&mut self, index: usize, value: impl Into<String>) -> Option<MediaSelection> {
        let slot = self.drive_links.get_mut(index)?;
        *slot = value.into();
        Some(self.selection())
    }

    pub fn add_drive_link(&mut self) {
        self.drive_links.push(String::new());
    }

    /// Remove a link slot. The last slot is replaced by an empty one.
    pub fn remove_drive_link(&mut self, index: usize) -> Option<MediaSelection> {
        if index >= self.drive_links.len() {
            return None;
        }
        self.drive_links.remove(index);
        if self.drive_links.is_empty() {
            self.drive_links.push(String::new());
        }
        Some(self.selection())
    }

    pub fn remove_existing_media(&mut self, index: usize) -> Option<MediaSelection> {
        if index >= self.existing_media.len() {
            return None;
        }
        self.existing_media.remove(index);
        Some(self.selection())
    }

    /// Adopt a new persisted-media list from the host without echoing it back.
    pub fn replace_existing_media(&mut self, media: Vec<MediaRef>) {
        self.existing_media = media;
    }

    /// Open the review modal if there is anything to review.
    pub fn open_review(&mut self) -> bool {
        self.review_open = !self.files.is_empty();
        self.review_open
    }

    pub fn close_review(&mut self) {
        self.review_open = false;
    }

    /// Store the review result and return the selection to report.
    pub fn finish_review(&mut self, processed: Vec<ProcessedFile>) -> MediaSelection {
        let (files, video_edits) = split_processed(processed);
        self.processed = files;
        self.video_edits = video_edits;
        self.review_open = false;
        self.selection()
    }

    fn clear_processed(&mut self) {
        self.processed.clear();
        self.video_edits.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CropReview, MediaSource, ProcessRequest, ReviewStep};

    fn file(name: &str, mime: &str) -> RawFile {
        RawFile::new(name, mime, name.as_bytes().to_vec())
    }

    fn names(files: &[RawFile]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_add_files_appends_batches_in_order() {
        let mut panel = UploadPanelState::default();
        panel.add_files(vec![file("a.png", "image/png"), file("b.png", "image/png")]);
        panel.add_files(Vec::new());
        panel.add_files(vec![file("c.mp4", "video/mp4")]);
        panel.add_files(vec![file("d.jpg", "image/jpeg"), file("a.png", "image/png")]);
        assert_eq!(names(panel.files()), vec!["a.png", "b.png", "c.mp4", "d.jpg", "a.png"]);
    }

    #[test]
    fn test_files_loaded_after_method_switch_are_dropped() {
        let mut panel = UploadPanelState::default();
        panel.set_method(UploadMethod::DriveLink);
        assert!(!panel.add_picked_files(vec![file("late.png", "image/png")]));
        assert!(panel.files().is_empty());

        panel.set_method(UploadMethod::Upload);
        assert!(panel.add_picked_files(vec![file("a.png", "image/png")]));
        assert_eq!(names(panel.files()), vec!["a.png"]);
    }

    #[test]
    fn test_remove_file_shifts_left() {
        let mut panel = UploadPanelState::default();
        panel.add_files(vec![
            file("a.png", "image/png"),
            file("b.png", "image/png"),
            file("c.png", "image/png"),
        ]);
        panel.remove_file(1);
        assert_eq!(names(panel.files()), vec!["a.png", "c.png"]);
        panel.remove_file(7);
        assert_eq!(panel.files().len(), 2);
    }

    #[test]
    fn test_drive_links_reported_without_blanks() {
        let mut panel = UploadPanelState::default();
        panel.set_method(UploadMethod::DriveLink);
        let sel = panel.set_drive_link(0, "https://drive.example/1").unwrap();
        assert_eq!(sel.drive_links, vec!["https://drive.example/1"]);

        panel.add_drive_link();
        let sel = panel.set_drive_link(1, "   ").unwrap();
        assert_eq!(sel.drive_links, vec!["https://drive.example/1"]);
        assert_eq!(panel.drive_links().len(), 2);

        panel.add_drive_link();
        let sel = panel.set_drive_link(2, "not a url").unwrap();
        assert_eq!(sel.drive_links, vec!["https://drive.example/1", "not a url"]);

        let sel = panel.remove_drive_link(0).unwrap();
        assert_eq!(sel.drive_links, vec!["not a url"]);
        assert!(sel.drive_links.iter().all(|l| !l.trim().is_empty()));
        assert!(panel.set_drive_link(9, "x").is_none());
    }

    #[test]
    fn test_removing_last_link_leaves_empty_slot() {
        let mut panel = UploadPanelState::default();
        panel.set_drive_link(0, "https://drive.example/only");
        let sel = panel.remove_drive_link(0).unwrap();
        assert!(sel.drive_links.is_empty());
        assert_eq!(panel.drive_links(), &[String::new()]);
    }

    #[test]
    fn test_method_round_trip_clears_files_and_links() {
        let mut panel = UploadPanelState::default();
        panel.add_files(vec![file("a.png", "image/png")]);
        let sel = panel.set_method(UploadMethod::DriveLink);
        assert_eq!(sel.method, UploadMethod::DriveLink);
        assert!(sel.files.is_empty() && sel.drive_links.is_empty());
        panel.set_drive_link(0, "https://drive.example/x");
        let sel = panel.set_method(UploadMethod::Upload);
        assert!(sel.files.is_empty() && sel.drive_links.is_empty());
        assert!(panel.files().is_empty());
        assert_eq!(panel.drive_links(), &[String::new()]);
    }

    #[test]
    fn test_method_switch_keeps_existing_media() {
        let existing = vec![MediaRef::new("https://cdn.example/1.jpg", MediaSource::Upload)];
        let mut panel = UploadPanelState::new(existing.clone());
        let sel = panel.set_method(UploadMethod::DriveLink);
        assert_eq!(sel.existing_media, existing);
    }

    #[test]
    fn test_remove_existing_media_reports_full_selection() {
        let mut panel = UploadPanelState::new(vec![
            MediaRef::new("https://cdn.example/1.jpg", MediaSource::Upload),
            MediaRef::new("https://drive.example/2", MediaSource::DriveLink),
        ]);
        panel.add_files(vec![file("a.png", "image/png")]);
        panel.set_drive_link(0, " ");
        let sel = panel.remove_existing_media(0).unwrap();
        assert_eq!(sel.method, UploadMethod::Upload);
        assert_eq!(names(&sel.files), vec!["a.png"]);
        assert!(sel.drive_links.is_empty());
        assert_eq!(sel.existing_media.len(), 1);
        assert_eq!(sel.existing_media[0].source, MediaSource::DriveLink);
        assert!(panel.remove_existing_media(5).is_none());
    }

    #[test]
    fn test_review_only_opens_with_files() {
        let mut panel = UploadPanelState::default();
        assert!(!panel.open_review());
        panel.add_files(vec![file("a.png", "image/png")]);
        assert!(panel.open_review());
        panel.close_review();
        assert!(!panel.is_review_open());
    }

    #[test]
    fn test_review_pass_notifies_once_with_processed_files() {
        let mut panel = UploadPanelState::default();
        panel.add_files(vec![
            file("img1.png", "image/png"),
            file("clip.mp4", "video/mp4"),
            file("doc.txt", "text/plain"),
        ]);
        assert!(panel.open_review());

        let mut notifications: Vec<MediaSelection> = Vec::new();
        let mut review = CropReview::new(panel.files().to_vec());
        let mut steps = Vec::new();

        if let ProcessRequest::Encode(job) = review.process(None) {
            steps.push(review.finish_encode(Ok(job.file.derive_with(vec![7]))));
        }
        if let ProcessRequest::Done(step) = review.process(None) {
            steps.push(Some(step));
        }
        steps.push(review.skip());

        for step in steps.into_iter().flatten() {
            if let ReviewStep::Completed(processed) = step {
                notifications.push(panel.finish_review(processed));
            }
        }

        assert_eq!(notifications.len(), 1);
        let sel = &notifications[0];
        assert_eq!(names(&sel.files), vec!["img1.png", "clip.mp4", "doc.txt"]);
        assert_eq!(sel.files[0].mime, "image/png");
        assert_eq!(sel.files[0].bytes.as_slice(), &[7]);
        assert!(sel.files[1].same_content(&panel.files()[1]));
        assert!(sel.files[2].same_content(&panel.files()[2]));
        assert_eq!(sel.video_edits.len(), 1);
        assert_eq!(sel.video_edits[0].index, 1);
        assert!(!panel.is_review_open());
        assert_eq!(panel.processed().len(), 3);
    }

    #[test]
    fn test_adding_files_discards_stale_review() {
        let mut panel = UploadPanelState::default();
        panel.add_files(vec![file("a.txt", "text/plain")]);
        let mut review = CropReview::new(panel.files().to_vec());
        if let Some(ReviewStep::Completed(processed)) = review.skip() {
            panel.finish_review(processed);
        }
        assert_eq!(panel.processed().len(), 1);
        panel.add_files(vec![file("b.txt", "text/plain")]);
        assert!(panel.processed().is_empty());
        assert_eq!(panel.selection().files.len(), 2);
    }
}
