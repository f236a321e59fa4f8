//! Q-table CSV reading
//!
//! The trainer exports one row per learned state with a `Q_<ACTION>` column
//! per action it tracks. Exports differ in which action columns they carry
//! (a no-split trainer writes no `Q_SPLIT`), so decoding is header-driven:
//! only the columns actually present are read, in canonical action order,
//! which is what keeps downstream tie-breaks deterministic.

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::grid::{Action, StateRecord};

/// Read a Q-table export into state records.
///
/// Errors identify the offending file and cover the cases that skip the
/// heatmap: missing or unreadable file, missing coordinate columns, or no
/// recognized `Q_*` column at all. Rows with unparseable fields are
/// skipped individually.
pub fn load_q_table(path: &Path) -> Result<Vec<StateRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening '{}'", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("reading header of '{}'", path.display()))?
        .clone();

    let find = |name: &str| headers.iter().position(|h| h == name);

    let Some(total_col) = find("player_total") else {
        bail!("'{}' has no player_total column", path.display());
    };
    let Some(dealer_col) = find("dealer_card") else {
        bail!("'{}' has no dealer_card column", path.display());
    };
    let Some(ace_col) = find("usable_ace") else {
        bail!("'{}' has no usable_ace column", path.display());
    };

    // Canonical order, filtered to the columns this export carries
    let action_cols: Vec<(Action, usize)> = Action::ALL
        .iter()
        .filter_map(|&action| find(action.column_name()).map(|idx| (action, idx)))
        .collect();
    if action_cols.is_empty() {
        bail!("no Q_* columns found in '{}'", path.display());
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.with_context(|| format!("reading '{}'", path.display()))?;

        let Some(player_total) = parse_int(row.get(total_col)) else {
            continue;
        };
        let Some(dealer_card) = parse_int(row.get(dealer_col)) else {
            continue;
        };
        let Some(usable_ace) = parse_flag(row.get(ace_col)) else {
            continue;
        };

        let mut record = StateRecord::new(player_total, dealer_card, usable_ace);
        for &(action, idx) in &action_cols {
            if let Some(value) = row.get(idx).and_then(|f| f.trim().parse::<f64>().ok()) {
                record.set_value(action, value);
            }
        }
        records.push(record);
    }

    Ok(records)
}

/// Integer field, tolerating a float rendering like "16.0".
fn parse_int(field: Option<&str>) -> Option<i32> {
    let field = field?.trim();
    field
        .parse::<i32>()
        .ok()
        .or_else(|| field.parse::<f64>().ok().map(|f| f as i32))
}

/// Boolean flag, written as 0/1 by the trainer or true/false by hand edits.
fn parse_flag(field: Option<&str>) -> Option<bool> {
    let field = field?.trim();
    match field {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => field.parse::<f64>().ok().map(|f| f != 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("bjviz_qtable_{name}_{}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_reads_full_export() {
        let path = temp_file(
            "full.csv",
            "player_total,dealer_card,usable_ace,Q_HIT,Q_STAND,Q_DOUBLE,Q_SPLIT,Q_SURRENDER\n\
             16,10,0,-0.4,-0.45,-0.6,-0.8,-0.5\n\
             18,6,1,0.1,0.35,0.2,-0.1,-0.5\n",
        );

        let records = load_q_table(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].player_total, 16);
        assert_eq!(records[0].dealer_card, 10);
        assert!(!records[0].usable_ace);
        assert_eq!(records[0].value(Action::Hit), Some(-0.4));
        assert!(records[1].usable_ace);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_subset_of_action_columns() {
        // Export without SPLIT/SURRENDER: tie-break order among the
        // remaining columns is still HIT, STAND, DOUBLE
        let path = temp_file(
            "subset.csv",
            "player_total,dealer_card,usable_ace,Q_STAND,Q_HIT\n\
             12,4,0,0.25,0.25\n",
        );

        let records = load_q_table(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value(Action::Split), None);
        let (action, _) = records[0].best().unwrap();
        assert_eq!(action, Action::Hit);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_no_q_columns_is_an_error() {
        let path = temp_file(
            "noq.csv",
            "player_total,dealer_card,usable_ace,reward\n16,10,0,0.5\n",
        );
        assert!(load_q_table(&path).is_err());
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_q_table(Path::new("/nonexistent/bjviz/q_table.csv")).is_err());
    }

    #[test]
    fn test_blank_value_fields_are_absent() {
        let path = temp_file(
            "blank.csv",
            "player_total,dealer_card,usable_ace,Q_HIT,Q_STAND\n\
             16.0,10.0,0.0,,0.3\n",
        );

        let records = load_q_table(&path).unwrap();
        assert_eq!(records[0].value(Action::Hit), None);
        assert_eq!(records[0].value(Action::Stand), Some(0.3));

        fs::remove_file(path).ok();
    }
}
