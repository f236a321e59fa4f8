//! Label color selection for text drawn over heatmap cells
//!
//! The heatmap uses a diverging color ramp: both extremes are dark and
//! saturated, the midrange is pale. A single midpoint threshold would pick
//! an unreadable color at one end, so the selector switches to the light
//! label at either extreme and the dark label in the middle.

/// Guards the normalization against a zero-width value range.
const RANGE_EPSILON: f64 = 1e-9;

const LIGHT_THRESHOLD_HIGH: f64 = 0.65;
const LIGHT_THRESHOLD_LOW: f64 = 0.35;

/// Color class for a cell's overlaid label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelColor {
    /// For dark cell backgrounds at either end of the ramp.
    Light,
    /// For the pale midrange of the ramp.
    Dark,
}

/// Pick the legible label color for a cell value given the grid bounds.
///
/// All-equal grids normalize every cell to t = 0, which lands in the light
/// band; the epsilon keeps that case free of division by zero.
pub fn select_label_color(value: f64, min_value: f64, max_value: f64) -> LabelColor {
    let t = (value - min_value) / (max_value - min_value + RANGE_EPSILON);
    if t > LIGHT_THRESHOLD_HIGH || t < LIGHT_THRESHOLD_LOW {
        LabelColor::Light
    } else {
        LabelColor::Dark
    }
}
