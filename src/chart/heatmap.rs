//! Best-action heatmap rendering
//!
//! Draws the state grid as colored cells on a red/yellow/green diverging
//! ramp, overlays the one-character action label in a contrast-selected
//! color, and adds axis labels plus a vertical colorbar.

use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;

use crate::contrast::{LabelColor, select_label_color};
use crate::grid::{GRID_COLS, GRID_ROWS, StateGrid};

use super::draw::{
    BLACK, WHITE, draw_text_centered, draw_text_right, draw_vertical_text,
};

// 12x9 inches at 150 dpi
pub const HEATMAP_WIDTH: u32 = 1800;
pub const HEATMAP_HEIGHT: u32 = 1350;

const MARGIN_LEFT: i32 = 110;
const MARGIN_RIGHT: i32 = 200;
const MARGIN_TOP: i32 = 110;
const MARGIN_BOTTOM: i32 = 110;

const COLORBAR_WIDTH: i32 = 36;
const COLORBAR_GAP: i32 = 30;

const TITLE_SCALE: f32 = 26.0;
const SUBTITLE_SCALE: f32 = 19.0;
const LABEL_SCALE: f32 = 22.0;
const TICK_SCALE: f32 = 17.0;
const CELL_TEXT_SCALE: f32 = 22.0;

// Diverging ramp stops: low = red, mid = pale yellow, high = green
const RAMP_LOW: [f32; 3] = [165.0, 10.0, 38.0];
const RAMP_MID: [f32; 3] = [255.0, 255.0, 191.0];
const RAMP_HIGH: [f32; 3] = [10.0, 104.0, 55.0];

/// Map a normalized value (0..1) onto the diverging ramp.
fn value_to_color(t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0) as f32;
    let (from, to, local) = if t < 0.5 {
        (RAMP_LOW, RAMP_MID, t * 2.0)
    } else {
        (RAMP_MID, RAMP_HIGH, (t - 0.5) * 2.0)
    };
    let channel = |i: usize| (from[i] + (to[i] - from[i]) * local) as u8;
    Rgb([channel(0), channel(1), channel(2)])
}

fn label_rgb(color: LabelColor) -> Rgb<u8> {
    match color {
        LabelColor::Light => WHITE,
        LabelColor::Dark => BLACK,
    }
}

/// Render the best-action heatmap PNG.
pub fn render_q_heatmap(grid: &StateGrid, font: &FontVec, path: &Path) -> Result<()> {
    let mut img = RgbImage::from_pixel(HEATMAP_WIDTH, HEATMAP_HEIGHT, WHITE);

    let plot_left = MARGIN_LEFT;
    let plot_right = HEATMAP_WIDTH as i32 - MARGIN_RIGHT;
    let plot_top = MARGIN_TOP;
    let plot_bottom = HEATMAP_HEIGHT as i32 - MARGIN_BOTTOM;

    let cell_w = (plot_right - plot_left) / GRID_COLS as i32;
    let cell_h = (plot_bottom - plot_top) / GRID_ROWS as i32;

    let range = grid.max_value - grid.min_value;
    let normalize = |value: f64| {
        if range > 0.0 { (value - grid.min_value) / range } else { 0.5 }
    };

    // Cells with overlaid action labels
    let cell_scale = PxScale::from(CELL_TEXT_SCALE);
    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            let Some(value) = grid.value_at(row, col) else {
                continue;
            };
            let color = value_to_color(normalize(value));
            let x0 = plot_left + col as i32 * cell_w;
            let y0 = plot_top + row as i32 * cell_h;
            for dy in 0..cell_h {
                for dx in 0..cell_w {
                    img.put_pixel((x0 + dx) as u32, (y0 + dy) as u32, color);
                }
            }

            if let Some(action) = grid.action_at(row, col) {
                let text_color =
                    label_rgb(select_label_color(value, grid.min_value, grid.max_value));
                draw_text_centered(
                    &mut img,
                    text_color,
                    x0 + cell_w / 2,
                    y0 + cell_h / 2 - (CELL_TEXT_SCALE / 2.0) as i32,
                    cell_scale,
                    font,
                    action.label(),
                );
            }
        }
    }

    // Axis tick labels
    let tick_scale = PxScale::from(TICK_SCALE);
    let tick_half = (TICK_SCALE / 2.0) as i32;
    for (row, label) in StateGrid::row_labels().iter().enumerate() {
        let cy = plot_top + row as i32 * cell_h + cell_h / 2;
        draw_text_right(&mut img, BLACK, plot_left - 10, cy - tick_half, tick_scale, font, label);
    }
    for (col, label) in StateGrid::col_labels().iter().enumerate() {
        let cx = plot_left + col as i32 * cell_w + cell_w / 2;
        draw_text_centered(&mut img, BLACK, cx, plot_bottom + 10, tick_scale, font, label);
    }

    // Axis titles and chart title
    let center_x = (plot_left + plot_right) / 2;
    draw_text_centered(
        &mut img,
        BLACK,
        center_x,
        HEATMAP_HEIGHT as i32 - 50,
        PxScale::from(LABEL_SCALE),
        font,
        "Dealer Up Card",
    );
    draw_vertical_text(
        &mut img,
        BLACK,
        20,
        (plot_top + plot_bottom) / 2,
        PxScale::from(LABEL_SCALE),
        font,
        "Player Total",
    );
    draw_text_centered(
        &mut img,
        BLACK,
        center_x,
        18,
        PxScale::from(TITLE_SCALE),
        font,
        "Q-Value Heatmap - Best Action Value per State (Hard Totals)",
    );
    draw_text_centered(
        &mut img,
        BLACK,
        center_x,
        18 + TITLE_SCALE as i32 + 10,
        PxScale::from(SUBTITLE_SCALE),
        font,
        "H=Hit  S=Stand  D=Double  P=Split  R=Surrender",
    );

    draw_colorbar(&mut img, grid, font, plot_top, plot_bottom);

    img.save(path)
        .with_context(|| format!("writing '{}'", path.display()))?;
    Ok(())
}

/// Vertical gradient bar with min/mid/max value ticks, max at the top.
fn draw_colorbar(img: &mut RgbImage, grid: &StateGrid, font: &FontVec, top: i32, bottom: i32) {
    let bar_left = HEATMAP_WIDTH as i32 - MARGIN_RIGHT + COLORBAR_GAP;
    let bar_height = bottom - top;

    for dy in 0..bar_height {
        let t = 1.0 - dy as f64 / bar_height as f64;
        let color = value_to_color(t);
        for dx in 0..COLORBAR_WIDTH {
            img.put_pixel((bar_left + dx) as u32, (top + dy) as u32, color);
        }
    }

    let tick_scale = PxScale::from(TICK_SCALE);
    let tick_half = (TICK_SCALE / 2.0) as i32;
    let mid_value = (grid.min_value + grid.max_value) / 2.0;
    let ticks = [
        (top, grid.max_value),
        ((top + bottom) / 2, mid_value),
        (bottom, grid.min_value),
    ];
    for (y, value) in ticks {
        draw_text_mut(
            img,
            BLACK,
            bar_left + COLORBAR_WIDTH + 8,
            y - tick_half,
            tick_scale,
            font,
            &format!("{value:.2}"),
        );
    }

    draw_vertical_text(
        img,
        BLACK,
        bar_left + COLORBAR_WIDTH + 78,
        (top + bottom) / 2,
        PxScale::from(LABEL_SCALE),
        font,
        "Best Q-Value",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_endpoints() {
        assert_eq!(value_to_color(0.0), Rgb([165, 10, 38]));
        assert_eq!(value_to_color(1.0), Rgb([10, 104, 55]));
        let mid = value_to_color(0.5);
        assert_eq!(mid, Rgb([255, 255, 191]), "midpoint is the pale stop");
    }

    #[test]
    fn test_ramp_clamps_out_of_range() {
        assert_eq!(value_to_color(-2.0), value_to_color(0.0));
        assert_eq!(value_to_color(3.0), value_to_color(1.0));
    }

    #[test]
    fn test_label_rgb_maps_both_classes() {
        assert_eq!(label_rgb(LabelColor::Light), WHITE);
        assert_eq!(label_rgb(LabelColor::Dark), BLACK);
    }
}
