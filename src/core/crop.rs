//! Off-screen crop rendering.
//!
//! The crop rectangle is picked in screen space over the preview image. It is
//! mapped into source pixels with independent horizontal and vertical factors
//! (natural size / displayed size), drawn into an output surface the size of
//! the on-screen rectangle, and then rotated and zoomed about the surface
//! centre. Rotation and zoom change the drawing transform, never the sampled
//! source region.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};
use std::io::Cursor;

use crate::error::{MediaError, MediaResult};
use crate::state::{CropJob, CropRect, DisplaySize, RawFile};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Source-space rectangle sampled for the crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Map a screen-space crop rectangle onto the natural image.
pub fn source_rect(rect: &CropRect, natural: (u32, u32), display: Option<DisplaySize>) -> SourceRect {
    let (natural_w, natural_h) = (natural.0 as f32, natural.1 as f32);
    let (display_w, display_h) = match display {
        Some(size) if size.width > 0.0 && size.height > 0.0 => (size.width, size.height),
        _ => (natural_w, natural_h),
    };
    let scale_x = natural_w / display_w;
    let scale_y = natural_h / display_h;
    SourceRect {
        x: rect.x * scale_x,
        y: rect.y * scale_y,
        width: rect.width * scale_x,
        height: rect.height * scale_y,
    }
}

/// Output surface size: the unscaled on-screen crop size.
pub fn output_size(rect: &CropRect) -> (u32, u32) {
    let width = rect.width.round().max(1.0) as u32;
    let height = rect.height.round().max(1.0) as u32;
    (width, height)
}

/// Render and encode the cropped derivative of `job.file`.
pub fn render_crop(job: &CropJob, jpeg_quality: u8) -> MediaResult<RawFile> {
    let format = ImageFormat::from_mime_type(&job.file.mime)
        .ok_or_else(|| MediaError::UnsupportedFormat(job.file.mime.clone()))?;

    let decoded = image::load_from_memory(&job.file.bytes).map_err(|e| MediaError::Decode {
        name: job.file.name.clone(),
        reason: e.to_string(),
    })?;
    let source = decoded.to_rgba8();

    let sampled = source_rect(&job.rect, source.dimensions(), job.display);
    let (out_w, out_h) = output_size(&job.rect);
    let layer = draw_source(&source, sampled, out_w, out_h);
    let rendered = apply_transform(layer, job.rect.rotation, job.rect.scale)?;

    let bytes = encode(&rendered, format, jpeg_quality).map_err(|reason| MediaError::Encode {
        name: job.file.name.clone(),
        mime: job.file.mime.clone(),
        reason,
    })?;
    Ok(job.file.derive_with(bytes))
}

/// Run [`render_crop`] on the blocking pool.
pub async fn render_crop_async(job: CropJob, jpeg_quality: u8) -> MediaResult<RawFile> {
    tokio::task::spawn_blocking(move || render_crop(&job, jpeg_quality))
        .await
        .map_err(|e| MediaError::Task(e.to_string()))?
}

/// Draw `sampled` into a `width` x `height` surface, clipping the parts that
/// fall outside the source and shrinking the destination to match.
fn draw_source(source: &RgbaImage, sampled: SourceRect, width: u32, height: u32) -> RgbaImage {
    let mut layer = RgbaImage::from_pixel(width, height, TRANSPARENT);
    if sampled.width <= 0.0 || sampled.height <= 0.0 {
        return layer;
    }

    let (src_w, src_h) = (source.width() as f32, source.height() as f32);
    let x0 = sampled.x.max(0.0);
    let y0 = sampled.y.max(0.0);
    let x1 = (sampled.x + sampled.width).min(src_w);
    let y1 = (sampled.y + sampled.height).min(src_h);
    if x1 <= x0 || y1 <= y0 {
        return layer;
    }

    let to_dest_x = width as f32 / sampled.width;
    let to_dest_y = height as f32 / sampled.height;
    let dest_x = ((x0 - sampled.x) * to_dest_x).round();
    let dest_y = ((y0 - sampled.y) * to_dest_y).round();
    let dest_w = ((x1 - x0) * to_dest_x).round().max(1.0) as u32;
    let dest_h = ((y1 - y0) * to_dest_y).round().max(1.0) as u32;

    let crop_x = x0.floor() as u32;
    let crop_y = y0.floor() as u32;
    let crop_w = ((x1.ceil() as u32).saturating_sub(crop_x)).max(1);
    let crop_h = ((y1.ceil() as u32).saturating_sub(crop_y)).max(1);

    let region = imageops::crop_imm(source, crop_x, crop_y, crop_w, crop_h).to_image();
    let scaled = if region.dimensions() == (dest_w, dest_h) {
        region
    } else {
        imageops::resize(&region, dest_w, dest_h, FilterType::Triangle)
    };
    imageops::overlay(&mut layer, &scaled, dest_x as i64, dest_y as i64);
    layer
}

/// Forward matrix for: translate to centre, rotate, zoom, translate back.
fn transform_matrix(width: u32, height: u32, rotation_deg: i32, scale: f32) -> [f32; 9] {
    let theta = (rotation_deg as f32).to_radians();
    let (sin, cos) = theta.sin_cos();
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let a = scale * cos;
    let b = -scale * sin;
    let d = scale * sin;
    let e = scale * cos;
    let tx = cx - (a * cx + b * cy);
    let ty = cy - (d * cx + e * cy);
    [a, b, tx, d, e, ty, 0.0, 0.0, 1.0]
}

fn apply_transform(layer: RgbaImage, rotation_deg: i32, scale: f32) -> MediaResult<RgbaImage> {
    if rotation_deg.rem_euclid(360) == 0 && (scale - 1.0).abs() < f32::EPSILON {
        return Ok(layer);
    }
    let (width, height) = layer.dimensions();
    let projection = Projection::from_matrix(transform_matrix(width, height, rotation_deg, scale))
        .ok_or_else(|| MediaError::Task(format!("non-invertible crop transform (scale {})", scale)))?;
    let mut out = RgbaImage::from_pixel(width, height, TRANSPARENT);
    warp_into(&layer, &projection, Interpolation::Bilinear, TRANSPARENT, &mut out);
    Ok(out)
}

fn encode(image: &RgbaImage, format: ImageFormat, jpeg_quality: u8) -> Result<Vec<u8>, String> {
    let mut bytes = Vec::new();
    match format {
        ImageFormat::Jpeg => {
            // No alpha channel; uncovered pixels end up black.
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            let encoder = JpegEncoder::new_with_quality(&mut bytes, jpeg_quality.clamp(1, 100));
            DynamicImage::ImageRgb8(rgb)
                .write_with_encoder(encoder)
                .map_err(|e| e.to_string())?;
        }
        other => {
            DynamicImage::ImageRgba8(image.clone())
                .write_to(&mut Cursor::new(&mut bytes), other)
                .map_err(|e| e.to_string())?;
        }
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn png_bytes(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image.clone())
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    /// Left half red, right half blue.
    fn split_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, _| if x < width / 2 { RED } else { BLUE })
    }

    fn job(image: &RgbaImage, mime: &str, rect: CropRect, display: Option<DisplaySize>) -> CropJob {
        CropJob {
            file: RawFile::new("img1.png", mime, png_bytes(image)),
            rect,
            display,
        }
    }

    fn decode(file: &RawFile) -> RgbaImage {
        image::load_from_memory(&file.bytes).unwrap().to_rgba8()
    }

    /// Bilinear sampling may land a hair off exact channel values.
    fn close(pixel: &Rgba<u8>, expected: Rgba<u8>) -> bool {
        pixel.0.iter().zip(expected.0.iter()).all(|(a, b)| a.abs_diff(*b) <= 2)
    }

    fn rect(x: f32, y: f32, width: f32, height: f32) -> CropRect {
        CropRect {
            x,
            y,
            width,
            height,
            ..CropRect::default()
        }
    }

    #[test]
    fn test_source_rect_uses_independent_factors() {
        let sampled = source_rect(
            &rect(10.0, 20.0, 30.0, 40.0),
            (800, 300),
            Some(DisplaySize { width: 400.0, height: 100.0 }),
        );
        assert_eq!(sampled, SourceRect { x: 20.0, y: 60.0, width: 60.0, height: 120.0 });
    }

    #[test]
    fn test_source_rect_without_display_is_identity() {
        let crop = rect(5.0, 6.0, 7.0, 8.0);
        let sampled = source_rect(&crop, (100, 100), None);
        assert_eq!(sampled, SourceRect { x: 5.0, y: 6.0, width: 7.0, height: 8.0 });
    }

    #[test]
    fn test_identity_crop_reproduces_pixels() {
        let source = RgbaImage::from_fn(4, 3, |x, y| Rgba([x as u8 * 40, y as u8 * 60, 7, 255]));
        let out = render_crop(&job(&source, "image/png", rect(0.0, 0.0, 4.0, 3.0), None), 90).unwrap();
        assert_eq!(out.name, "img1.png");
        assert_eq!(out.mime, "image/png");
        assert_eq!(decode(&out), source);
    }

    #[test]
    fn test_output_is_sized_to_unscaled_crop() {
        let source = split_image(100, 100);
        let mut crop = rect(0.0, 0.0, 20.0, 25.0);
        crop.set_scale(1.5);
        let display = Some(DisplaySize { width: 50.0, height: 50.0 });
        let out = render_crop(&job(&source, "image/png", crop, display), 90).unwrap();
        assert_eq!(decode(&out).dimensions(), (20, 25));
    }

    #[test]
    fn test_display_scale_selects_source_region() {
        let source = split_image(100, 100);
        let display = Some(DisplaySize { width: 50.0, height: 50.0 });
        // Screen (0,0,20,25) covers source (0,0,40,50): entirely the red half.
        let out = render_crop(&job(&source, "image/png", rect(0.0, 0.0, 20.0, 25.0), display), 90).unwrap();
        assert!(decode(&out).pixels().all(|p| *p == RED));
        // Screen (30,0,20,25) covers source (60,0,40,50): entirely blue.
        let out = render_crop(&job(&source, "image/png", rect(30.0, 0.0, 20.0, 25.0), display), 90).unwrap();
        assert!(decode(&out).pixels().all(|p| *p == BLUE));
    }

    #[test]
    fn test_half_turn_mirrors_content() {
        let source = split_image(40, 20);
        let mut crop = rect(0.0, 0.0, 40.0, 20.0);
        crop.set_rotation(180);
        let out = decode(&render_crop(&job(&source, "image/png", crop, None), 90).unwrap());
        assert!(close(out.get_pixel(5, 10), BLUE));
        assert!(close(out.get_pixel(34, 10), RED));
    }

    #[test]
    fn test_quarter_turn_moves_top_to_right() {
        // Top half red, bottom half blue.
        let source = RgbaImage::from_fn(40, 20, |_, y| if y < 10 { RED } else { BLUE });
        let mut crop = rect(0.0, 0.0, 40.0, 20.0);
        crop.rotate_quarter();
        let out = decode(&render_crop(&job(&source, "image/png", crop, None), 90).unwrap());
        assert_eq!(out.dimensions(), (40, 20));
        // The turned content is 20 wide and centred, so columns 10..30 are covered.
        assert!(close(out.get_pixel(25, 10), RED));
        assert!(close(out.get_pixel(25, 2), RED));
        assert!(close(out.get_pixel(14, 10), BLUE));
        assert!(close(out.get_pixel(14, 17), BLUE));
        assert_eq!(out.get_pixel(3, 10)[3], 0);
        assert_eq!(out.get_pixel(36, 10)[3], 0);
    }

    #[test]
    fn test_zoom_out_leaves_transparent_border() {
        let source = RgbaImage::from_pixel(40, 40, RED);
        let mut crop = rect(0.0, 0.0, 40.0, 40.0);
        crop.set_scale(0.5);
        let out = decode(&render_crop(&job(&source, "image/png", crop, None), 90).unwrap());
        assert_eq!(out.get_pixel(2, 2)[3], 0);
        assert!(close(out.get_pixel(20, 20), RED));
    }

    #[test]
    fn test_region_outside_image_is_transparent() {
        let source = RgbaImage::from_pixel(10, 10, RED);
        let out = decode(&render_crop(&job(&source, "image/png", rect(50.0, 50.0, 8.0, 6.0), None), 90).unwrap());
        assert_eq!(out.dimensions(), (8, 6));
        assert!(out.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_partially_outside_region_is_clipped() {
        let source = RgbaImage::from_pixel(10, 10, RED);
        let out = decode(&render_crop(&job(&source, "image/png", rect(5.0, 0.0, 10.0, 10.0), None), 90).unwrap());
        assert_eq!(*out.get_pixel(2, 5), RED);
        assert_eq!(out.get_pixel(8, 5)[3], 0);
    }

    #[test]
    fn test_jpeg_keeps_type() {
        let source = split_image(64, 64);
        let out = render_crop(&job(&source, "image/jpeg", rect(8.0, 8.0, 32.0, 16.0), None), 90).unwrap();
        assert_eq!(out.mime, "image/jpeg");
        assert_eq!(image::guess_format(&out.bytes).unwrap(), ImageFormat::Jpeg);
        assert_eq!(decode(&out).dimensions(), (32, 16));
    }

    #[test]
    fn test_unknown_image_type_is_rejected() {
        let source = split_image(4, 4);
        let err = render_crop(&job(&source, "image/x-unknown", rect(0.0, 0.0, 4.0, 4.0), None), 90).unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let bad = CropJob {
            file: RawFile::new("broken.png", "image/png", vec![0, 1, 2, 3]),
            rect: CropRect::default(),
            display: None,
        };
        assert!(matches!(render_crop(&bad, 90), Err(MediaError::Decode { .. })));
    }

    #[test]
    fn test_identity_transform_matrix() {
        let m = transform_matrix(10, 20, 0, 1.0);
        assert_eq!(m, [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    }
}
