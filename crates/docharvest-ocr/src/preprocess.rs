//! Deterministic image preprocessing for OCR
//!
//! The pipeline mirrors a scanned-document cleanup chain: grayscale,
//! conditional upscale for small sources, Gaussian denoise, contrast-limited
//! adaptive histogram equalization, a small morphological closing to bridge
//! gaps in strokes, and Otsu binarization. Given identical input bytes the
//! output image is identical, which keeps downstream OCR selection
//! reproducible.

use image::{imageops::FilterType, DynamicImage, GrayImage, Luma};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use imageproc::filter::gaussian_blur_f32;

/// Minimum dimension fed to the OCR engine. Smaller images are upscaled.
pub const MIN_OCR_DIMENSION: u32 = 300;

/// Sigma matching a 3x3 Gaussian kernel.
const GAUSSIAN_SIGMA: f32 = 0.8;

/// CLAHE contrast clip limit.
const CLAHE_CLIP_LIMIT: f32 = 2.0;

/// CLAHE tile grid size (8x8 tiles).
const CLAHE_TILE_GRID: u32 = 8;

/// Normalize a raw image into an OCR-ready binary image.
///
/// Stages, in order: grayscale; cubic upscale when either dimension is below
/// [`MIN_OCR_DIMENSION`] (aspect ratio preserved, the smaller dimension
/// reaches the minimum); 3x3 Gaussian blur; CLAHE (clip 2.0, 8x8 tiles);
/// 2x2 morphological closing; Otsu global thresholding. Output pixels are
/// exactly 0 or 255.
#[must_use]
pub fn preprocess(image: &DynamicImage) -> GrayImage {
    let mut gray = image.to_luma8();

    let (width, height) = gray.dimensions();
    if width > 0 && height > 0 && (width < MIN_OCR_DIMENSION || height < MIN_OCR_DIMENSION) {
        // Scale so the smaller dimension reaches the minimum
        #[allow(clippy::cast_precision_loss)]
        let scale = (MIN_OCR_DIMENSION as f32 / height as f32)
            .max(MIN_OCR_DIMENSION as f32 / width as f32);
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let new_width = ((width as f32 * scale) as u32).max(1);
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let new_height = ((height as f32 * scale) as u32).max(1);
        gray = image::imageops::resize(&gray, new_width, new_height, FilterType::CatmullRom);
    }

    let blurred = gaussian_blur_f32(&gray, GAUSSIAN_SIGMA);
    let equalized = clahe(&blurred, CLAHE_CLIP_LIMIT, CLAHE_TILE_GRID);
    let closed = close_2x2(&equalized);

    let level = otsu_level(&closed);
    threshold(&closed, level, ThresholdType::Binary)
}

/// Contrast-limited adaptive histogram equalization.
///
/// Per-tile histograms are clipped at `clip_limit * tile_area / 256` with
/// the excess redistributed uniformly, then each pixel is remapped by
/// bilinear interpolation between the CDF lookup tables of its four
/// neighboring tiles.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clahe(image: &GrayImage, clip_limit: f32, tile_grid: u32) -> GrayImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let tiles_x = tile_grid.min(width).max(1);
    let tiles_y = tile_grid.min(height).max(1);

    // Tile boundaries partition the image evenly; sizes differ by at most
    // one pixel so every tile is non-empty.
    let tile_x0 = |tx: u32| (u64::from(tx) * u64::from(width) / u64::from(tiles_x)) as u32;
    let tile_y0 = |ty: u32| (u64::from(ty) * u64::from(height) / u64::from(tiles_y)) as u32;

    let mut luts = vec![[0u8; 256]; (tiles_x * tiles_y) as usize];

    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let (x0, x1) = (tile_x0(tx), tile_x0(tx + 1));
            let (y0, y1) = (tile_y0(ty), tile_y0(ty + 1));

            let mut hist = [0u32; 256];
            for y in y0..y1 {
                for x in x0..x1 {
                    hist[image.get_pixel(x, y)[0] as usize] += 1;
                }
            }

            let area = ((x1 - x0) * (y1 - y0)) as f32;
            let limit = ((clip_limit * area / 256.0).max(1.0)) as u32;

            let mut excess = 0u32;
            for bin in &mut hist {
                if *bin > limit {
                    excess += *bin - limit;
                    *bin = limit;
                }
            }
            let bonus = excess / 256;
            let residual = (excess % 256) as usize;
            for bin in &mut hist {
                *bin += bonus;
            }
            for bin in hist.iter_mut().take(residual) {
                *bin += 1;
            }

            let scale = 255.0 / area;
            let lut = &mut luts[(ty * tiles_x + tx) as usize];
            let mut cumulative = 0u32;
            for (value, bin) in hist.iter().enumerate() {
                cumulative += bin;
                lut[value] = (cumulative as f32 * scale).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    let tile_w = width as f32 / tiles_x as f32;
    let tile_h = height as f32 / tiles_y as f32;
    let max_tx = (tiles_x - 1) as f32;
    let max_ty = (tiles_y - 1) as f32;

    let mut out = GrayImage::new(width, height);
    for y in 0..height {
        let gy = (y as f32 + 0.5) / tile_h - 0.5;
        let fy = gy.floor();
        let wy = gy - fy;
        let iy0 = fy.clamp(0.0, max_ty) as u32;
        let iy1 = (fy + 1.0).clamp(0.0, max_ty) as u32;

        for x in 0..width {
            let gx = (x as f32 + 0.5) / tile_w - 0.5;
            let fx = gx.floor();
            let wx = gx - fx;
            let ix0 = fx.clamp(0.0, max_tx) as u32;
            let ix1 = (fx + 1.0).clamp(0.0, max_tx) as u32;

            let value = image.get_pixel(x, y)[0] as usize;
            let p00 = f32::from(luts[(iy0 * tiles_x + ix0) as usize][value]);
            let p01 = f32::from(luts[(iy0 * tiles_x + ix1) as usize][value]);
            let p10 = f32::from(luts[(iy1 * tiles_x + ix0) as usize][value]);
            let p11 = f32::from(luts[(iy1 * tiles_x + ix1) as usize][value]);

            let top = p00 * (1.0 - wx) + p01 * wx;
            let bottom = p10 * (1.0 - wx) + p11 * wx;
            let blended = top * (1.0 - wy) + bottom * wy;

            out.put_pixel(x, y, Luma([blended.round().clamp(0.0, 255.0) as u8]));
        }
    }

    out
}

/// Grayscale morphological closing with a 2x2 structuring element.
///
/// Dilation takes the window maximum at offsets {0, 1}; the erosion that
/// follows uses the reflected window at offsets {-1, 0}, so the composition
/// introduces no net shift.
fn close_2x2(image: &GrayImage) -> GrayImage {
    let dilated = window_2x2(image, 0, u8::MIN, u8::max);
    window_2x2(&dilated, -1, u8::MAX, u8::min)
}

/// Apply a 2x2 window fold at the given base offset, ignoring pixels
/// outside the image.
fn window_2x2(image: &GrayImage, base: i64, init: u8, fold: fn(u8, u8) -> u8) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut out = GrayImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let mut value = init;
            for dy in 0..2i64 {
                for dx in 0..2i64 {
                    let sx = i64::from(x) + base + dx;
                    let sy = i64::from(y) + base + dy;
                    if sx >= 0 && sy >= 0 && sx < i64::from(width) && sy < i64::from(height) {
                        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                        let sample = image.get_pixel(sx as u32, sy as u32)[0];
                        value = fold(value, sample);
                    }
                }
            }
            out.put_pixel(x, y, Luma([value]));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(width: u32, height: u32) -> DynamicImage {
        let mut img = GrayImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let value = if (x + y) % 2 == 0 { 230 } else { 40 };
                img.put_pixel(x, y, Luma([value]));
            }
        }
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn test_output_is_binary() {
        let img = checkerboard(64, 64);
        let binary = preprocess(&img);
        assert!(binary.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn test_small_image_is_upscaled() {
        let img = checkerboard(150, 150);
        let binary = preprocess(&img);
        let (w, h) = binary.dimensions();
        assert!(w >= MIN_OCR_DIMENSION);
        assert!(h >= MIN_OCR_DIMENSION);
    }

    #[test]
    fn test_upscale_preserves_aspect_ratio() {
        let img = checkerboard(100, 200);
        let binary = preprocess(&img);
        let (w, h) = binary.dimensions();
        // Smaller dimension reaches the minimum, larger scales with it
        assert_eq!(w, MIN_OCR_DIMENSION);
        assert_eq!(h, 2 * MIN_OCR_DIMENSION);
    }

    #[test]
    fn test_large_image_keeps_dimensions() {
        let img = checkerboard(400, 350);
        let binary = preprocess(&img);
        assert_eq!(binary.dimensions(), (400, 350));
    }

    #[test]
    fn test_preprocess_is_deterministic() {
        let img = checkerboard(120, 80);
        let first = preprocess(&img);
        let second = preprocess(&img);
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn test_clahe_preserves_dimensions() {
        let img = checkerboard(97, 53);
        let equalized = clahe(&img.to_luma8(), 2.0, 8);
        assert_eq!(equalized.dimensions(), (97, 53));
    }

    #[test]
    fn test_clahe_handles_tiny_images() {
        let img = GrayImage::from_pixel(3, 3, Luma([128]));
        let equalized = clahe(&img, 2.0, 8);
        assert_eq!(equalized.dimensions(), (3, 3));
    }

    #[test]
    fn test_closing_fills_single_pixel_gap() {
        // A dark pinhole inside a bright region closes up
        let mut img = GrayImage::from_pixel(8, 8, Luma([200]));
        img.put_pixel(4, 4, Luma([10]));
        let closed = close_2x2(&img);
        assert_eq!(closed.get_pixel(4, 4)[0], 200);
    }
}
