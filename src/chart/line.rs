//! Episode series line charts
//!
//! Declarative chart description rendered to a fixed-size PNG: dashed
//! gridlines, nice-number y ticks, compact episode x ticks, dashed
//! reference lines, and a legend box in the top-right corner.

use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};

use super::axis;
use super::draw::{
    AXIS_GRAY, BLACK, GRID_GRAY, WHITE, draw_dashed_hline, draw_dashed_vline, draw_hline,
    draw_text_centered, draw_text_right, draw_thick_segment, draw_vertical_text, draw_vline,
};

// 11x5 inches at 150 dpi
pub const CHART_WIDTH: u32 = 1650;
pub const CHART_HEIGHT: u32 = 750;

const MARGIN_LEFT: i32 = 95;
const MARGIN_RIGHT: i32 = 30;
const MARGIN_TOP: i32 = 60;
const MARGIN_BOTTOM: i32 = 85;

const TITLE_SCALE: f32 = 26.0;
const LABEL_SCALE: f32 = 20.0;
const TICK_SCALE: f32 = 16.0;
const LEGEND_SCALE: f32 = 16.0;

const LEGEND_SWATCH: i32 = 28;
const LEGEND_PAD: i32 = 10;
const LEGEND_ROW: i32 = 24;

/// One plotted series.
pub struct Series {
    pub label: String,
    pub color: Rgb<u8>,
    pub width: u32,
    pub points: Vec<(f64, f64)>,
}

/// A horizontal dashed reference line, optionally shown in the legend.
pub struct RefLine {
    pub label: Option<String>,
    pub y: f64,
    pub color: Rgb<u8>,
}

/// A line chart description; `render` turns it into a PNG.
#[derive(Default)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Fixed y range; data extent with padding when absent.
    pub y_range: Option<(f64, f64)>,
    pub series: Vec<Series>,
    pub ref_lines: Vec<RefLine>,
}

impl Default for Series {
    fn default() -> Self {
        Self {
            label: String::new(),
            color: BLACK,
            width: 2,
            points: Vec::new(),
        }
    }
}

impl LineChart {
    pub fn render(&self, font: &FontVec, path: &Path) -> Result<()> {
        let mut img = RgbImage::from_pixel(CHART_WIDTH, CHART_HEIGHT, WHITE);

        let plot_left = MARGIN_LEFT;
        let plot_right = CHART_WIDTH as i32 - MARGIN_RIGHT;
        let plot_top = MARGIN_TOP;
        let plot_bottom = CHART_HEIGHT as i32 - MARGIN_BOTTOM;

        let (x_min, x_max) = self.x_extent();
        let (y_min, y_max) = self.y_extent();

        let map_x = |x: f64| {
            let t = (x - x_min) / (x_max - x_min);
            (plot_left as f64 + t * (plot_right - plot_left) as f64) as f32
        };
        let map_y = |y: f64| {
            let t = (y - y_min) / (y_max - y_min);
            (plot_bottom as f64 - t * (plot_bottom - plot_top) as f64) as f32
        };

        let tick_scale = PxScale::from(TICK_SCALE);
        let tick_half = (TICK_SCALE / 2.0) as i32;

        // Gridlines and tick labels
        let y_ticks = axis::ticks(y_min, y_max, 6);
        let y_step = axis::nice_step(y_max - y_min, 6);
        for &ty in &y_ticks {
            let py = map_y(ty) as i32;
            draw_dashed_hline(&mut img, plot_left + 1, plot_right - 1, py, GRID_GRAY);
            let label = axis::format_tick(ty, y_step);
            draw_text_right(&mut img, BLACK, plot_left - 8, py - tick_half, tick_scale, font, &label);
        }
        for &tx in &axis::ticks(x_min, x_max, 8) {
            let px = map_x(tx) as i32;
            draw_dashed_vline(&mut img, plot_top + 1, plot_bottom - 1, px, GRID_GRAY);
            let label = axis::format_episode(tx);
            draw_text_centered(&mut img, BLACK, px, plot_bottom + 8, tick_scale, font, &label);
        }

        // Reference lines
        for ref_line in &self.ref_lines {
            if ref_line.y < y_min || ref_line.y > y_max {
                continue;
            }
            let py = map_y(ref_line.y) as i32;
            draw_dashed_hline(&mut img, plot_left + 1, plot_right - 1, py, ref_line.color);
            draw_dashed_hline(&mut img, plot_left + 1, plot_right - 1, py + 1, ref_line.color);
        }

        // Series polylines, clamped to the plot area
        let clamp_y = |py: f32| py.clamp(plot_top as f32, plot_bottom as f32);
        for series in &self.series {
            for pair in series.points.windows(2) {
                let (x0, y0) = pair[0];
                let (x1, y1) = pair[1];
                draw_thick_segment(
                    &mut img,
                    (map_x(x0), clamp_y(map_y(y0))),
                    (map_x(x1), clamp_y(map_y(y1))),
                    series.width,
                    series.color,
                );
            }
        }

        // Axis frame on top of grid and series edges
        draw_hline(&mut img, plot_left, plot_right, plot_top, AXIS_GRAY);
        draw_hline(&mut img, plot_left, plot_right, plot_bottom, AXIS_GRAY);
        draw_vline(&mut img, plot_top, plot_bottom, plot_left, AXIS_GRAY);
        draw_vline(&mut img, plot_top, plot_bottom, plot_right, AXIS_GRAY);

        // Titles and axis labels
        let center_x = (plot_left + plot_right) / 2;
        draw_text_centered(&mut img, BLACK, center_x, 14, PxScale::from(TITLE_SCALE), font, &self.title);
        draw_text_centered(
            &mut img,
            BLACK,
            center_x,
            CHART_HEIGHT as i32 - 32,
            PxScale::from(LABEL_SCALE),
            font,
            &self.x_label,
        );
        draw_vertical_text(
            &mut img,
            BLACK,
            14,
            (plot_top + plot_bottom) / 2,
            PxScale::from(LABEL_SCALE),
            font,
            &self.y_label,
        );

        self.draw_legend(&mut img, font, plot_right, plot_top);

        img.save(path)
            .with_context(|| format!("writing '{}'", path.display()))?;
        Ok(())
    }

    fn x_extent(&self) -> (f64, f64) {
        let xs = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
        let min = xs.clone().fold(f64::INFINITY, f64::min);
        let max = xs.fold(f64::NEG_INFINITY, f64::max);
        if min.is_finite() && max > min {
            (min, max)
        } else if min.is_finite() {
            (min - 0.5, min + 0.5)
        } else {
            (0.0, 1.0)
        }
    }

    fn y_extent(&self) -> (f64, f64) {
        if let Some(range) = self.y_range {
            return range;
        }
        let ys = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.1));
        let min = ys.clone().fold(f64::INFINITY, f64::min);
        let max = ys.fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() {
            return (0.0, 1.0);
        }
        if max > min {
            let pad = (max - min) * 0.05;
            (min - pad, max + pad)
        } else {
            (min - 0.5, min + 0.5)
        }
    }

    fn draw_legend(&self, img: &mut RgbImage, font: &FontVec, plot_right: i32, plot_top: i32) {
        let scale = PxScale::from(LEGEND_SCALE);
        let entries: Vec<(&str, Rgb<u8>)> = self
            .series
            .iter()
            .map(|s| (s.label.as_str(), s.color))
            .chain(
                self.ref_lines
                    .iter()
                    .filter_map(|r| r.label.as_deref().map(|l| (l, r.color))),
            )
            .collect();
        if entries.is_empty() {
            return;
        }

        let text_width = entries
            .iter()
            .map(|(label, _)| text_size(scale, font, label).0 as i32)
            .max()
            .unwrap_or(0);
        let box_w = LEGEND_PAD * 3 + LEGEND_SWATCH + text_width;
        let box_h = LEGEND_PAD * 2 + LEGEND_ROW * entries.len() as i32;
        let box_left = plot_right - box_w - 12;
        let box_top = plot_top + 12;

        for y in box_top..box_top + box_h {
            draw_hline(img, box_left, box_left + box_w, y, WHITE);
        }
        draw_hline(img, box_left, box_left + box_w, box_top, AXIS_GRAY);
        draw_hline(img, box_left, box_left + box_w, box_top + box_h, AXIS_GRAY);
        draw_vline(img, box_top, box_top + box_h, box_left, AXIS_GRAY);
        draw_vline(img, box_top, box_top + box_h, box_left + box_w, AXIS_GRAY);

        for (i, (label, color)) in entries.iter().enumerate() {
            let row_top = box_top + LEGEND_PAD + LEGEND_ROW * i as i32;
            let mid = row_top + LEGEND_ROW / 2;
            draw_thick_segment(
                img,
                ((box_left + LEGEND_PAD) as f32, mid as f32),
                ((box_left + LEGEND_PAD + LEGEND_SWATCH) as f32, mid as f32),
                3,
                *color,
            );
            draw_text_mut(
                img,
                BLACK,
                box_left + LEGEND_PAD * 2 + LEGEND_SWATCH,
                mid - (LEGEND_SCALE / 2.0) as i32,
                scale,
                font,
                label,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_with_points(points: Vec<(f64, f64)>) -> LineChart {
        LineChart {
            title: "t".into(),
            series: vec![Series {
                label: "s".into(),
                points,
                ..Series::default()
            }],
            ..LineChart::default()
        }
    }

    #[test]
    fn test_x_extent_spans_data() {
        let chart = chart_with_points(vec![(1000.0, 0.1), (5000.0, 0.4), (3000.0, 0.2)]);
        assert_eq!(chart.x_extent(), (1000.0, 5000.0));
    }

    #[test]
    fn test_y_extent_prefers_fixed_range() {
        let mut chart = chart_with_points(vec![(0.0, 10.0), (1.0, 50.0)]);
        chart.y_range = Some((0.0, 65.0));
        assert_eq!(chart.y_extent(), (0.0, 65.0));
    }

    #[test]
    fn test_empty_chart_has_fallback_extents() {
        let chart = LineChart::default();
        let (x0, x1) = chart.x_extent();
        let (y0, y1) = chart.y_extent();
        assert!(x1 > x0);
        assert!(y1 > y0);
    }

    #[test]
    fn test_single_point_extents_are_nonzero() {
        let chart = chart_with_points(vec![(100.0, 0.5)]);
        let (x0, x1) = chart.x_extent();
        assert!(x1 > x0);
        let (y0, y1) = chart.y_extent();
        assert!(y1 > y0);
    }
}
