//! Dimension bounds for photos before re-encoding.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Dimensions that fit `(width, height)` inside a `max_side` square,
/// preserving aspect ratio. `None` when the image already fits.
pub fn bounded_dimensions(width: u32, height: u32, max_side: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    if longest <= max_side || max_side == 0 {
        return None;
    }

    let scale = max_side as f64 / longest as f64;
    let w = ((width as f64 * scale).round() as u32).clamp(1, max_side);
    let h = ((height as f64 * scale).round() as u32).clamp(1, max_side);
    Some((w, h))
}

/// Downscales so the longer side is at most `max_side`. Never enlarges.
pub fn fit_within(image: DynamicImage, max_side: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    match bounded_dimensions(width, height, max_side) {
        Some((w, h)) => resize_to(&image, w, h),
        None => image,
    }
}

/// Shrinks both sides by `factor` (`0 < factor < 1`), keeping at least one pixel.
pub fn scale_down(image: &DynamicImage, factor: f32) -> DynamicImage {
    let (width, height) = image.dimensions();
    let w = ((width as f32 * factor).round() as u32).max(1);
    let h = ((height as f32 * factor).round() as u32).max(1);
    if (w, h) == (width, height) {
        return image.clone();
    }
    resize_to(image, w, h)
}

fn resize_to(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let (orig_w, orig_h) = image.dimensions();
    image.resize_exact(width, height, select_filter(orig_w, orig_h, width, height))
}

/// Cheaper filters for large shrink ratios, where their blur is invisible.
fn select_filter(orig_width: u32, orig_height: u32, new_width: u32, new_height: u32) -> FilterType {
    let width_ratio = orig_width as f32 / new_width.max(1) as f32;
    let height_ratio = orig_height as f32 / new_height.max(1) as f32;
    let max_ratio = width_ratio.max(height_ratio);

    if max_ratio > 2.0 {
        FilterType::Triangle
    } else if max_ratio > 1.5 {
        FilterType::CatmullRom
    } else {
        FilterType::Lanczos3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn bounds_the_longer_side() {
        assert_eq!(bounded_dimensions(4000, 3000, 1920), Some((1920, 1440)));
        assert_eq!(bounded_dimensions(3000, 4000, 1920), Some((1440, 1920)));
        assert_eq!(bounded_dimensions(1920, 1080, 1920), None);
        assert_eq!(bounded_dimensions(800, 600, 1920), None);
        assert_eq!(bounded_dimensions(10000, 1, 100), Some((100, 1)));
    }

    #[test]
    fn fit_within_never_enlarges() {
        let small = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 20, Rgb([200, 10, 10])));
        assert_eq!(fit_within(small, 100).dimensions(), (40, 20));

        let wide = DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 100, Rgb([0, 0, 0])));
        assert_eq!(fit_within(wide, 200).dimensions(), (200, 50));
    }

    #[test]
    fn scale_down_keeps_a_pixel() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 50, Rgb([1, 2, 3])));
        assert_eq!(scale_down(&img, 0.9).dimensions(), (90, 45));

        let tiny = DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([1, 2, 3])));
        assert_eq!(scale_down(&tiny, 0.5).dimensions(), (1, 1));
    }

    #[test]
    fn picks_filters_by_ratio() {
        assert_eq!(select_filter(1000, 1000, 100, 100), FilterType::Triangle);
        assert_eq!(select_filter(1000, 1000, 600, 600), FilterType::CatmullRom);
        assert_eq!(select_filter(1000, 1000, 900, 900), FilterType::Lanczos3);
    }
}
