//! Low-level drawing helpers shared by the chart renderers

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_text_mut, text_size};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([20, 20, 20]);
pub const AXIS_GRAY: Rgb<u8> = Rgb([80, 80, 80]);
pub const GRID_GRAY: Rgb<u8> = Rgb([215, 215, 215]);

const DASH_ON: i32 = 6;
const DASH_OFF: i32 = 5;

/// Blend a color toward white; stands in for drawing with alpha on a white
/// background.
pub fn lighten(color: Rgb<u8>, alpha: f32) -> Rgb<u8> {
    let mix = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)) as u8;
    Rgb([mix(color.0[0]), mix(color.0[1]), mix(color.0[2])])
}

pub fn draw_hline(img: &mut RgbImage, x0: i32, x1: i32, y: i32, color: Rgb<u8>) {
    draw_line_segment_mut(img, (x0 as f32, y as f32), (x1 as f32, y as f32), color);
}

pub fn draw_vline(img: &mut RgbImage, y0: i32, y1: i32, x: i32, color: Rgb<u8>) {
    draw_line_segment_mut(img, (x as f32, y0 as f32), (x as f32, y1 as f32), color);
}

pub fn draw_dashed_hline(img: &mut RgbImage, x0: i32, x1: i32, y: i32, color: Rgb<u8>) {
    let mut x = x0;
    while x < x1 {
        let end = (x + DASH_ON).min(x1);
        draw_hline(img, x, end, y, color);
        x = end + DASH_OFF;
    }
}

pub fn draw_dashed_vline(img: &mut RgbImage, y0: i32, y1: i32, x: i32, color: Rgb<u8>) {
    let mut y = y0;
    while y < y1 {
        let end = (y + DASH_ON).min(y1);
        draw_vline(img, y, end, x, color);
        y = end + DASH_OFF;
    }
}

/// Line segment with pixel thickness, drawn as parallel 1px segments.
pub fn draw_thick_segment(
    img: &mut RgbImage,
    start: (f32, f32),
    end: (f32, f32),
    width: u32,
    color: Rgb<u8>,
) {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    // Offset perpendicular to the dominant direction
    let vertical_offset = dx.abs() >= dy.abs();
    for i in 0..width.max(1) as i32 {
        let off = (i - (width as i32 - 1) / 2) as f32;
        let (ox, oy) = if vertical_offset { (0.0, off) } else { (off, 0.0) };
        draw_line_segment_mut(
            img,
            (start.0 + ox, start.1 + oy),
            (end.0 + ox, end.1 + oy),
            color,
        );
    }
}

/// Text centered horizontally on `cx`.
pub fn draw_text_centered(
    img: &mut RgbImage,
    color: Rgb<u8>,
    cx: i32,
    y: i32,
    scale: PxScale,
    font: &FontVec,
    text: &str,
) {
    let (tw, _) = text_size(scale, font, text);
    draw_text_mut(img, color, cx - tw as i32 / 2, y, scale, font, text);
}

/// Text ending at `x_right`, for right-aligned tick labels.
pub fn draw_text_right(
    img: &mut RgbImage,
    color: Rgb<u8>,
    x_right: i32,
    y: i32,
    scale: PxScale,
    font: &FontVec,
    text: &str,
) {
    let (tw, _) = text_size(scale, font, text);
    draw_text_mut(img, color, x_right - tw as i32, y, scale, font, text);
}

/// Text rotated 90 degrees counter-clockwise (reads bottom-to-top),
/// centered vertically on `cy`. Renders to a strip and copies the inked
/// pixels over, so it can sit next to existing drawing.
pub fn draw_vertical_text(
    img: &mut RgbImage,
    color: Rgb<u8>,
    x: i32,
    cy: i32,
    scale: PxScale,
    font: &FontVec,
    text: &str,
) {
    if text.is_empty() {
        return;
    }
    let (tw, th) = text_size(scale, font, text);
    let (tw, th) = (tw as u32 + 2, th as u32 + 2);
    let mut strip = RgbImage::from_pixel(tw, th, WHITE);
    draw_text_mut(&mut strip, color, 1, 1, scale, font, text);
    let rotated = image::imageops::rotate270(&strip);

    let top = cy - rotated.height() as i32 / 2;
    for (sx, sy, pixel) in rotated.enumerate_pixels() {
        if *pixel == WHITE {
            continue;
        }
        let px = x + sx as i32;
        let py = top + sy as i32;
        if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height() {
            img.put_pixel(px as u32, py as u32, *pixel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lighten_moves_toward_white() {
        let c = lighten(Rgb([100, 100, 100]), 0.5);
        assert_eq!(c, Rgb([177, 177, 177]));
        assert_eq!(lighten(Rgb([40, 80, 120]), 1.0), Rgb([40, 80, 120]));
    }

    #[test]
    fn test_dashed_hline_leaves_gaps() {
        let mut img = RgbImage::from_pixel(40, 3, WHITE);
        draw_dashed_hline(&mut img, 0, 39, 1, BLACK);
        let inked: usize = (0..40).filter(|&x| *img.get_pixel(x, 1) == BLACK).count();
        assert!(inked > 0 && inked < 40, "dashes must cover part of the span, got {inked}");
    }
}
