//! Preview URLs for files shown in the webview.
//!
//! Registering a file hands back a [`PreviewUrl`] guard. The entry stays
//! servable through the `media` custom protocol until the guard is dropped,
//! so callers own the lifetime of every preview they create.

use http::{header, Request, Response, StatusCode};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use crate::state::RawFile;

pub const PREVIEW_PROTOCOL: &str = "media";

#[cfg(target_os = "windows")]
const PREVIEW_ORIGIN: &str = "http://media.localhost";
#[cfg(not(target_os = "windows"))]
const PREVIEW_ORIGIN: &str = "media://localhost";

#[derive(Clone)]
struct PreviewEntry {
    mime: String,
    bytes: Arc<Vec<u8>>,
}

struct PreviewRegistry {
    next_id: u64,
    entries: HashMap<u64, PreviewEntry>,
}

impl PreviewRegistry {
    fn new() -> Self {
        Self {
            next_id: 0,
            entries: HashMap::new(),
        }
    }

    fn insert(&mut self, entry: PreviewEntry) -> u64 {
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.insert(self.next_id, entry);
        self.next_id
    }
}

fn registry() -> &'static RwLock<PreviewRegistry> {
    static REGISTRY: OnceLock<RwLock<PreviewRegistry>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(PreviewRegistry::new()))
}

/// Owned handle to a servable preview. Dropping it releases the entry.
#[derive(Debug)]
pub struct PreviewUrl {
    id: u64,
    url: String,
}

impl PreviewUrl {
    pub fn register(file: &RawFile) -> Self {
        let entry = PreviewEntry {
            mime: file.mime.clone(),
            bytes: file.bytes.clone(),
        };
        let id = match registry().write() {
            Ok(mut registry) => registry.insert(entry),
            Err(_) => {
                log::warn!("Preview registry poisoned; {} will not render", file.name);
                0
            }
        };
        Self {
            id,
            url: format!(
                "{}/preview/{}/{}",
                PREVIEW_ORIGIN,
                id,
                urlencoding::encode(&file.name)
            ),
        }
    }

    #[cfg(test)]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PartialEq for PreviewUrl {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Drop for PreviewUrl {
    fn drop(&mut self) {
        if let Ok(mut registry) = registry().write() {
            registry.entries.remove(&self.id);
        }
    }
}

/// Whether an entry is still registered.
#[cfg(test)]
pub fn is_live(id: u64) -> bool {
    registry()
        .read()
        .map(|registry| registry.entries.contains_key(&id))
        .unwrap_or(false)
}

fn lookup(id: u64) -> Option<PreviewEntry> {
    let registry = registry().read().ok()?;
    registry.entries.get(&id).cloned()
}

/// Extract the entry id from a `/preview/{id}/{name}` request path.
pub fn parse_preview_path(path: &str) -> Option<u64> {
    let mut parts = path.trim_start_matches('/').split('/');
    if parts.next()? != "preview" {
        return None;
    }
    parts.next()?.parse().ok()
}

/// Parse a single `bytes=start-end` range against a body of `len` bytes.
fn parse_range(value: &str, len: usize) -> Option<(usize, usize)> {
    let ranges = value.trim().strip_prefix("bytes=")?;
    let (start, end) = ranges.split_once('-')?;
    if len == 0 {
        return None;
    }
    let (start, end) = match (start.trim(), end.trim()) {
        ("", suffix) => {
            let suffix: usize = suffix.parse().ok()?;
            (len.saturating_sub(suffix), len - 1)
        }
        (start, "") => (start.parse().ok()?, len - 1),
        (start, end) => (start.parse().ok()?, end.parse::<usize>().ok()?.min(len - 1)),
    };
    (start <= end && start < len).then_some((start, end))
}

/// Answer a custom-protocol request from the registry.
pub fn serve(request: &Request<Vec<u8>>) -> Response<Cow<'static, [u8]>> {
    let entry = parse_preview_path(request.uri().path()).and_then(lookup);
    let Some(entry) = entry else {
        return status_only(StatusCode::NOT_FOUND);
    };

    let len = entry.bytes.len();
    let range = request
        .headers()
        .get(header::RANGE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| parse_range(value, len));

    let builder = Response::builder()
        .header(header::CONTENT_TYPE, entry.mime.as_str())
        .header(header::ACCEPT_RANGES, "bytes")
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");

    let response = match range {
        Some((start, end)) => builder
            .status(StatusCode::PARTIAL_CONTENT)
            .header(header::CONTENT_RANGE, format!("bytes {}-{}/{}", start, end, len))
            .body(Cow::Owned(entry.bytes[start..=end].to_vec())),
        None => builder
            .status(StatusCode::OK)
            .body(Cow::Owned(entry.bytes.as_ref().clone())),
    };
    response.unwrap_or_else(|_| status_only(StatusCode::INTERNAL_SERVER_ERROR))
}

fn status_only(status: StatusCode) -> Response<Cow<'static, [u8]>> {
    let mut response = Response::new(Cow::Borrowed(&[][..]));
    *response.status_mut() = status;
    response
}
