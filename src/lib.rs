//! Blackjack training visualization
//!
//! Library behind the `plot_training` binary: loads evaluation logs and the
//! Q-table export from a Q-learning run, builds the best-action state grid,
//! and renders diagnostic PNG charts.

pub mod chart;
pub mod contrast;
pub mod grid;
pub mod logs;
pub mod qtable;

// Re-export commonly used types for convenience
pub use chart::{LineChart, RefLine, Series, load_font, render_q_heatmap};
pub use contrast::{LabelColor, select_label_color};
pub use grid::{Action, DEALER_CARDS, GRID_COLS, GRID_ROWS, StateGrid, StateRecord};
pub use logs::{EvalRecord, episode_range, load_logs};
pub use qtable::load_q_table;
