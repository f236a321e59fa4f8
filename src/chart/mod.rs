//! PNG chart rendering
//!
//! All charts draw into an `RgbImage` with imageproc primitives and
//! ab_glyph text, then save to disk. `line` renders the episode series
//! charts, `heatmap` the best-action grid.

pub mod axis;
pub mod draw;
pub mod font;
pub mod heatmap;
pub mod line;

pub use font::load_font;
pub use heatmap::render_q_heatmap;
pub use line::{LineChart, RefLine, Series};
