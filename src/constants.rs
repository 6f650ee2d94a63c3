//! Shared UI constants such as colors, crop defaults, and scripts.

pub const BG_DEEPEST: &str = "#09090b";
pub const BG_BASE: &str = "#0a0a0b";
pub const BG_ELEVATED: &str = "#141414";
pub const BG_SURFACE: &str = "#1a1a1a";
pub const BG_HOVER: &str = "#262626";

pub const BORDER_SUBTLE: &str = "#1f1f1f";
pub const BORDER_DEFAULT: &str = "#27272a";
pub const BORDER_STRONG: &str = "#3f3f46";

pub const TEXT_PRIMARY: &str = "#fafafa";
pub const TEXT_SECONDARY: &str = "#a1a1aa";
pub const TEXT_MUTED: &str = "#71717a";
pub const TEXT_DIM: &str = "#52525b";

pub const ACCENT_UPLOAD: &str = "#3b82f6";
pub const ACCENT_DRIVE: &str = "#22c55e";
pub const ACCENT_CROP: &str = "#7b5fc4";
pub const ACCENT_WARNING: &str = "#eab308";
pub const ACCENT_DANGER: &str = "#ef4444";

pub const DEFAULT_DRIVE_URL: &str = "https://drive.google.com/drive/my-drive";
pub const DRIVE_LINK_PLACEHOLDER: &str = "https://drive.google.com/file/d/...";

/// Extensions offered by the file picker.
pub const PICKER_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff"];
pub const PICKER_VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "webm", "mkv", "avi"];

pub const CROP_DEFAULT_X: f32 = 50.0;
pub const CROP_DEFAULT_Y: f32 = 50.0;
pub const CROP_DEFAULT_WIDTH: f32 = 200.0;
pub const CROP_DEFAULT_HEIGHT: f32 = 200.0;
pub const CROP_MIN_SIZE: f32 = 20.0;
pub const CROP_MIN_SCALE: f32 = 0.5;
pub const CROP_MAX_SCALE: f32 = 2.0;
pub const CROP_HANDLE_SIZE: f32 = 16.0;
pub const CROP_HANDLE_HIT_SIZE: f32 = 20.0;
pub const CROP_WIDTH_RANGE: (f32, f32) = (50.0, 400.0);
pub const CROP_HEIGHT_RANGE: (f32, f32) = (50.0, 300.0);
pub const CROP_STAGE_HEIGHT: f64 = 400.0;
/// Used until the stage reports its real width.
pub const CROP_STAGE_FALLBACK_WIDTH: f64 = 760.0;
/// Encoder quality for lossy output, on a 1..=100 scale (0.9 of the maximum).
pub const CROP_JPEG_QUALITY: u8 = 90;

pub const CROP_STAGE_ID: &str = "crop-stage";
pub const CROP_STAGE_IMAGE_ID: &str = "crop-stage-image";

/// Reports the crop stage's client rect and the preview image's layout size.
pub const CROP_STAGE_SCRIPT: &str = r#"
const hostId = "crop-stage";
const imageId = "crop-stage-image";
let last = null;
let owner = null;
let timer = null;

function stop() {
    clearInterval(timer);
    window.removeEventListener("resize", sendBounds);
    window.removeEventListener("scroll", sendBounds, { capture: true });
}

function sendBounds() {
    const host = document.getElementById(hostId);
    // The stage this script measured was removed or replaced by a newer one.
    if (owner && host !== owner) {
        stop();
        return;
    }
    if (!host) {
        last = null;
        return;
    }
    owner = host;
    const rect = host.getBoundingClientRect();
    const image = document.getElementById(imageId);
    const loaded = image && image.complete && image.naturalWidth > 0;
    const next = {
        left: rect.left,
        top: rect.top,
        width: rect.width,
        height: rect.height,
        image_width: loaded ? image.offsetWidth : null,
        image_height: loaded ? image.offsetHeight : null
    };
    if (last &&
        Math.abs(last.left - next.left) < 0.5 &&
        Math.abs(last.top - next.top) < 0.5 &&
        Math.abs(last.width - next.width) < 0.5 &&
        Math.abs(last.height - next.height) < 0.5 &&
        last.image_width === next.image_width &&
        last.image_height === next.image_height) {
        return;
    }
    last = next;
    dioxus.send(next);
}

window.addEventListener("resize", sendBounds, { passive: true });
window.addEventListener("scroll", sendBounds, { passive: true, capture: true });
timer = setInterval(sendBounds, 150);
sendBounds();
await new Promise(() => {});
"#;
