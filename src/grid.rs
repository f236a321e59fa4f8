//! Best-action grid construction from Q-table state records
//!
//! Converts the flat per-state action values exported by the trainer into a
//! dense (player total × dealer up-card) grid of best values and best
//! actions, ready for heatmap rendering. Hard totals only.

/// Player actions, in canonical priority order.
///
/// The order matters: when two actions tie for the best value, the one
/// earlier in this list wins, which keeps renders reproducible across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Hit,
    Stand,
    Double,
    Split,
    Surrender,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Hit,
        Action::Stand,
        Action::Double,
        Action::Split,
        Action::Surrender,
    ];

    /// Column name in the Q-table CSV export.
    pub fn column_name(self) -> &'static str {
        match self {
            Action::Hit => "Q_HIT",
            Action::Stand => "Q_STAND",
            Action::Double => "Q_DOUBLE",
            Action::Split => "Q_SPLIT",
            Action::Surrender => "Q_SURRENDER",
        }
    }

    /// Single-character abbreviation drawn inside heatmap cells.
    pub fn label(self) -> &'static str {
        match self {
            Action::Hit => "H",
            Action::Stand => "S",
            Action::Double => "D",
            Action::Split => "P",
            Action::Surrender => "R",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One row of the Q-table export: a state and whatever action values the
/// trainer had learned for it. Not every action is present for every state.
#[derive(Debug, Clone)]
pub struct StateRecord {
    pub player_total: i32,
    pub dealer_card: i32,
    pub usable_ace: bool,
    values: [Option<f64>; Action::ALL.len()],
}

impl StateRecord {
    pub fn new(player_total: i32, dealer_card: i32, usable_ace: bool) -> Self {
        Self {
            player_total,
            dealer_card,
            usable_ace,
            values: [None; Action::ALL.len()],
        }
    }

    pub fn set_value(&mut self, action: Action, value: f64) {
        self.values[action.index()] = Some(value);
    }

    pub fn value(&self, action: Action) -> Option<f64> {
        self.values[action.index()]
    }

    /// Best (action, value) pair, scanning actions in canonical priority
    /// order so a tie goes to the earlier action. NaN values are skipped,
    /// matching the source table's missing-entry semantics. `None` when
    /// the record carries no comparable values at all.
    pub fn best(&self) -> Option<(Action, f64)> {
        let mut best: Option<(Action, f64)> = None;
        for action in Action::ALL {
            if let Some(value) = self.value(action) {
                if value.is_nan() {
                    continue;
                }
                match best {
                    Some((_, best_value)) if value <= best_value => {}
                    _ => best = Some((action, value)),
                }
            }
        }
        best
    }
}

/// Row axis: hard player totals 4..=21, top row = 4.
pub const PLAYER_TOTAL_MIN: i32 = 4;
pub const PLAYER_TOTAL_MAX: i32 = 21;
pub const GRID_ROWS: usize = (PLAYER_TOTAL_MAX - PLAYER_TOTAL_MIN + 1) as usize;

/// Column axis: dealer up-cards in display order, ace (1) last.
pub const DEALER_CARDS: [i32; 10] = [2, 3, 4, 5, 6, 7, 8, 9, 10, 1];
pub const GRID_COLS: usize = DEALER_CARDS.len();

/// Dense best-value / best-action grid over the fixed state axes.
///
/// Absent cells hold NaN in the value grid and `None` in the action grid;
/// NaN cannot collide with a legitimate learned value.
#[derive(Debug, Clone)]
pub struct StateGrid {
    best_value: Vec<f64>,
    best_action: Vec<Option<Action>>,
    pub min_value: f64,
    pub max_value: f64,
}

impl StateGrid {
    /// Build the grid from a stream of state records.
    ///
    /// Soft-total records, empty records, and records whose coordinates
    /// fall outside the fixed axes are silently dropped. Duplicate
    /// coordinates overwrite (last record wins). Returns `None` when no
    /// cell ends up populated, since bounds over an empty set are
    /// undefined and the heatmap has nothing to show.
    pub fn build(records: &[StateRecord]) -> Option<StateGrid> {
        let mut best_value = vec![f64::NAN; GRID_ROWS * GRID_COLS];
        let mut best_action: Vec<Option<Action>> = vec![None; GRID_ROWS * GRID_COLS];

        for record in records {
            if record.usable_ace {
                continue;
            }
            let Some((action, value)) = record.best() else {
                continue;
            };
            let Some(idx) = cell_index(record.player_total, record.dealer_card) else {
                continue;
            };
            best_value[idx] = value;
            best_action[idx] = Some(action);
        }

        let mut min_value = f64::INFINITY;
        let mut max_value = f64::NEG_INFINITY;
        let mut populated = false;
        for &value in &best_value {
            if value.is_nan() {
                continue;
            }
            populated = true;
            min_value = min_value.min(value);
            max_value = max_value.max(value);
        }

        if !populated {
            return None;
        }

        Some(StateGrid {
            best_value,
            best_action,
            min_value,
            max_value,
        })
    }

    /// Best value at (row, col), or `None` for an absent cell.
    pub fn value_at(&self, row: usize, col: usize) -> Option<f64> {
        let v = self.best_value[row * GRID_COLS + col];
        if v.is_nan() { None } else { Some(v) }
    }

    /// Best action at (row, col), or `None` for an absent cell.
    pub fn action_at(&self, row: usize, col: usize) -> Option<Action> {
        self.best_action[row * GRID_COLS + col]
    }

    /// Row labels for rendering: "4".."21".
    pub fn row_labels() -> Vec<String> {
        (PLAYER_TOTAL_MIN..=PLAYER_TOTAL_MAX)
            .map(|t| t.to_string())
            .collect()
    }

    /// Column labels for rendering: "2".."10" then "A".
    pub fn col_labels() -> Vec<String> {
        DEALER_CARDS
            .iter()
            .map(|&c| if c == 1 { "A".to_string() } else { c.to_string() })
            .collect()
    }
}

/// Map state coordinates to a flat grid index, `None` when outside the
/// fixed axes.
fn cell_index(player_total: i32, dealer_card: i32) -> Option<usize> {
    if !(PLAYER_TOTAL_MIN..=PLAYER_TOTAL_MAX).contains(&player_total) {
        return None;
    }
    let row = (player_total - PLAYER_TOTAL_MIN) as usize;
    let col = DEALER_CARDS.iter().position(|&c| c == dealer_card)?;
    Some(row * GRID_COLS + col)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(total: i32, dealer: i32, values: &[(Action, f64)]) -> StateRecord {
        let mut rec = StateRecord::new(total, dealer, false);
        for &(action, value) in values {
            rec.set_value(action, value);
        }
        rec
    }

    #[test]
    fn test_tie_break_prefers_hit_over_stand() {
        let rec = record(16, 10, &[(Action::Stand, 0.40), (Action::Hit, 0.40)]);
        let (action, value) = rec.best().unwrap();
        assert_eq!(action, Action::Hit, "tie must go to the earlier action");
        assert_eq!(value, 0.40);
    }

    #[test]
    fn test_tie_break_with_subset_of_actions() {
        // Without HIT present, STAND is first in the filtered order
        let rec = record(12, 4, &[(Action::Double, 0.1), (Action::Stand, 0.1)]);
        let (action, _) = rec.best().unwrap();
        assert_eq!(action, Action::Stand);
    }

    #[test]
    fn test_best_of_empty_record_is_none() {
        let rec = StateRecord::new(16, 10, false);
        assert!(rec.best().is_none());
    }

    #[test]
    fn test_nan_values_never_win() {
        // A NaN entry in the table means "not learned", not "best"
        let mut rec = record(16, 10, &[(Action::Hit, 0.3)]);
        rec.set_value(Action::Stand, f64::NAN);
        let (action, value) = rec.best().unwrap();
        assert_eq!(action, Action::Hit, "real value must win over NaN");
        assert_eq!(value, 0.3);

        let mut rec = record(16, 10, &[(Action::Stand, -0.2)]);
        rec.set_value(Action::Hit, f64::NAN);
        let (action, _) = rec.best().unwrap();
        assert_eq!(action, Action::Stand, "leading NaN must not mask later values");
    }

    #[test]
    fn test_all_nan_record_leaves_cell_absent() {
        let mut rec = StateRecord::new(16, 10, false);
        rec.set_value(Action::Hit, f64::NAN);
        assert!(rec.best().is_none());
        assert!(StateGrid::build(&[rec]).is_none());
    }

    #[test]
    fn test_soft_totals_never_populate_cells() {
        let mut soft = record(18, 6, &[(Action::Stand, 0.5)]);
        soft.usable_ace = true;
        let grid = StateGrid::build(&[soft]);
        assert!(grid.is_none(), "a soft-total-only table yields no grid");
    }

    #[test]
    fn test_out_of_range_coordinates_are_dropped() {
        let records = vec![
            record(16, 10, &[(Action::Hit, 0.2)]),
            record(3, 10, &[(Action::Hit, 9.0)]),   // total below range
            record(22, 10, &[(Action::Hit, 9.0)]),  // total above range
            record(16, 11, &[(Action::Hit, 9.0)]),  // no such dealer card
            record(16, 0, &[(Action::Hit, 9.0)]),
        ];
        let grid = StateGrid::build(&records).unwrap();
        assert_eq!(grid.max_value, 0.2, "out-of-range values must not leak in");
        let populated: usize = (0..GRID_ROWS)
            .flat_map(|r| (0..GRID_COLS).map(move |c| (r, c)))
            .filter(|&(r, c)| grid.value_at(r, c).is_some())
            .count();
        assert_eq!(populated, 1);
    }

    #[test]
    fn test_duplicate_coordinates_last_write_wins() {
        let records = vec![
            record(16, 10, &[(Action::Stand, 0.1)]),
            record(16, 10, &[(Action::Hit, -0.3)]),
        ];
        let grid = StateGrid::build(&records).unwrap();
        let (row, col) = (12, 8); // total 16, dealer 10
        assert_eq!(grid.value_at(row, col), Some(-0.3));
        assert_eq!(grid.action_at(row, col), Some(Action::Hit));
    }

    #[test]
    fn test_bounds_cover_present_cells_only() {
        let records = vec![
            record(16, 10, &[(Action::Hit, -0.5)]),
            record(12, 2, &[(Action::Stand, 0.0)]),
            record(20, 6, &[(Action::Stand, 0.8)]),
        ];
        let grid = StateGrid::build(&records).unwrap();
        assert_eq!(grid.min_value, -0.5);
        assert_eq!(grid.max_value, 0.8);
    }

    #[test]
    fn test_empty_input_signals_empty_result() {
        assert!(StateGrid::build(&[]).is_none());
    }

    #[test]
    fn test_cell_placement_matches_axes() {
        let grid = StateGrid::build(&[record(4, 2, &[(Action::Hit, 1.0)])]).unwrap();
        assert_eq!(grid.value_at(0, 0), Some(1.0), "total 4 / dealer 2 is the top-left cell");

        let grid = StateGrid::build(&[record(21, 1, &[(Action::Stand, 1.0)])]).unwrap();
        assert_eq!(
            grid.value_at(GRID_ROWS - 1, GRID_COLS - 1),
            Some(1.0),
            "total 21 / ace is the bottom-right cell"
        );
    }

    #[test]
    fn test_action_index_follows_priority_order() {
        for (i, &action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
        }
    }

    #[test]
    fn test_axis_labels() {
        let rows = StateGrid::row_labels();
        assert_eq!(rows.len(), GRID_ROWS);
        assert_eq!(rows.first().map(String::as_str), Some("4"));
        assert_eq!(rows.last().map(String::as_str), Some("21"));

        let cols = StateGrid::col_labels();
        assert_eq!(cols.len(), GRID_COLS);
        assert_eq!(cols.first().map(String::as_str), Some("2"));
        assert_eq!(cols.last().map(String::as_str), Some("A"));
    }
}
