//! Training visualization tool - render diagnostic charts from training logs
//!
//! Reads CSV training logs and the Q-table export, generates 5 PNG plots.
//!
//! Usage:
//!   cargo run -- logs/training_*.csv
//!   cargo run -- logs/training_20240101_120000.csv --output results/
//!   cargo run -- logs/*.csv --qtable analysis/q_table.csv --output plots/
//!
//! Training log CSV columns:
//!   episode, elapsed_sec, win_rate, loss_rate, push_rate,
//!   avg_reward, bust_rate, epsilon, states_learned
//! Q-table CSV columns:
//!   player_total, dealer_card, usable_ace,
//!   Q_HIT, Q_STAND, Q_DOUBLE, Q_SPLIT, Q_SURRENDER

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use ab_glyph::FontVec;
use image::Rgb;

use blackjack_viz::chart::{self, LineChart, RefLine, Series};
use blackjack_viz::grid::StateGrid;
use blackjack_viz::logs::{self, EvalRecord};
use blackjack_viz::qtable;

/// Approximate basic-strategy win rate (%), drawn as a reference line.
const BASIC_STRATEGY_WIN_RATE: f64 = 43.0;

// Series palette
const GREEN: Rgb<u8> = Rgb([46, 204, 113]);
const RED: Rgb<u8> = Rgb([231, 76, 60]);
const BLUE: Rgb<u8> = Rgb([52, 152, 219]);
const PURPLE: Rgb<u8> = Rgb([155, 89, 182]);
const ORANGE: Rgb<u8> = Rgb([243, 156, 18]);
const TEAL: Rgb<u8> = Rgb([26, 188, 156]);
const REF_GRAY: Rgb<u8> = Rgb([127, 140, 141]);

fn main() {
    let config = PlotConfig::from_args();

    if config.show_help {
        print_help();
        return;
    }
    if config.log_files.is_empty() {
        print_help();
        process::exit(2);
    }

    println!("Loading {} log file(s)...", config.log_files.len());
    let data = match logs::load_logs(&config.log_files) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: {e:#}.");
            process::exit(1);
        }
    };
    let (first, last) = logs::episode_range(&data);
    println!(
        "  {} evaluation points  (episodes {} - {})",
        data.len(),
        first,
        last
    );

    if let Err(e) = fs::create_dir_all(&config.output_dir) {
        eprintln!(
            "Error: could not create output directory '{}': {e}",
            config.output_dir.display()
        );
        process::exit(1);
    }

    let font = match chart::load_font() {
        Ok(font) => font,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    println!("\nGenerating plots in '{}'...", config.output_dir.display());

    plot_learning_curve(&data, &config.output_dir, &font);
    plot_reward_curve(&data, &config.output_dir, &font);
    plot_epsilon_decay(&data, &config.output_dir, &font);
    plot_state_coverage(&data, &config.output_dir, &font);
    plot_q_heatmap(&config.qtable_path, &config.output_dir, &font);

    println!("\nDone. Open the PNG files in your viewer of choice.");
}

// =============================================================================
// CHART DEFINITIONS
// =============================================================================

fn series_points(data: &[EvalRecord], value: impl Fn(&EvalRecord) -> f64) -> Vec<(f64, f64)> {
    data.iter().map(|r| (r.episode as f64, value(r))).collect()
}

/// Win / loss / push rates over episodes with a basic-strategy reference.
fn plot_learning_curve(data: &[EvalRecord], output_dir: &Path, font: &FontVec) {
    let chart = LineChart {
        title: "Learning Curve - Win / Loss / Push Rates".into(),
        x_label: "Episode".into(),
        y_label: "Rate (%)".into(),
        y_range: Some((0.0, 65.0)),
        series: vec![
            Series {
                label: "Win rate".into(),
                color: GREEN,
                width: 3,
                points: series_points(data, |r| r.win_rate * 100.0),
            },
            Series {
                label: "Loss rate".into(),
                color: chart::draw::lighten(RED, 0.8),
                width: 2,
                points: series_points(data, |r| r.loss_rate * 100.0),
            },
            Series {
                label: "Push rate".into(),
                color: chart::draw::lighten(BLUE, 0.6),
                width: 2,
                points: series_points(data, |r| r.push_rate * 100.0),
            },
        ],
        ref_lines: vec![RefLine {
            label: Some(format!("Basic strategy (~{BASIC_STRATEGY_WIN_RATE}%)")),
            y: BASIC_STRATEGY_WIN_RATE,
            color: REF_GRAY,
        }],
    };
    render_and_report(&chart, &output_dir.join("learning_curve.png"), font);
}

/// Average reward per evaluation with a zero reference.
fn plot_reward_curve(data: &[EvalRecord], output_dir: &Path, font: &FontVec) {
    let chart = LineChart {
        title: "Reward Curve - Average Reward per Evaluation".into(),
        x_label: "Episode".into(),
        y_label: "Average Reward".into(),
        y_range: None,
        series: vec![Series {
            label: "Avg reward".into(),
            color: PURPLE,
            width: 3,
            points: series_points(data, |r| r.avg_reward),
        }],
        ref_lines: vec![RefLine {
            label: None,
            y: 0.0,
            color: chart::draw::lighten(REF_GRAY, 0.6),
        }],
    };
    render_and_report(&chart, &output_dir.join("reward_curve.png"), font);
}

/// Exploration rate over the run.
fn plot_epsilon_decay(data: &[EvalRecord], output_dir: &Path, font: &FontVec) {
    let chart = LineChart {
        title: "Epsilon Decay - Exploration vs Exploitation".into(),
        x_label: "Episode".into(),
        y_label: "Epsilon".into(),
        y_range: Some((-0.02, 1.05)),
        series: vec![Series {
            label: "Epsilon (exploration rate)".into(),
            color: ORANGE,
            width: 3,
            points: series_points(data, |r| r.epsilon),
        }],
        ref_lines: Vec::new(),
    };
    render_and_report(&chart, &output_dir.join("epsilon_decay.png"), font);
}

/// Distinct states visited over the run.
fn plot_state_coverage(data: &[EvalRecord], output_dir: &Path, font: &FontVec) {
    let chart = LineChart {
        title: "State Coverage - Q-Table Exploration Progress".into(),
        x_label: "Episode".into(),
        y_label: "States Learned".into(),
        y_range: None,
        series: vec![Series {
            label: "States learned".into(),
            color: TEAL,
            width: 3,
            points: series_points(data, |r| r.states_learned as f64),
        }],
        ref_lines: Vec::new(),
    };
    render_and_report(&chart, &output_dir.join("state_coverage.png"), font);
}

/// Best-action heatmap for hard totals. A missing or unusable Q-table skips
/// this chart only; the line charts above still render.
fn plot_q_heatmap(qtable_path: &Path, output_dir: &Path, font: &FontVec) {
    let records = match qtable::load_q_table(qtable_path) {
        Ok(records) => records,
        Err(e) => {
            println!("  Skipping Q-heatmap: {e:#}.");
            return;
        }
    };

    let Some(grid) = StateGrid::build(&records) else {
        println!("  Skipping Q-heatmap: no hard-total rows in Q-table.");
        return;
    };

    let path = output_dir.join("q_heatmap.png");
    match chart::render_q_heatmap(&grid, font, &path) {
        Ok(()) => println!("  Saved: {}", path.display()),
        Err(e) => eprintln!("  Warning: could not render Q-heatmap: {e:#}"),
    }
}

fn render_and_report(chart: &LineChart, path: &Path, font: &FontVec) {
    match chart.render(font, path) {
        Ok(()) => println!("  Saved: {}", path.display()),
        Err(e) => eprintln!("  Warning: could not render '{}': {e:#}", path.display()),
    }
}

// =============================================================================
// ARGUMENTS
// =============================================================================

/// Configuration for the plotting tool
#[derive(Debug)]
struct PlotConfig {
    log_files: Vec<PathBuf>,
    output_dir: PathBuf,
    qtable_path: PathBuf,
    show_help: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            log_files: Vec::new(),
            output_dir: PathBuf::from("plots"),
            qtable_path: PathBuf::from("analysis/q_table.csv"),
            show_help: false,
        }
    }
}

impl PlotConfig {
    fn from_args() -> Self {
        match Self::parse(std::env::args().skip(1)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                eprintln!("Run with --help for usage.");
                process::exit(2);
            }
        }
    }

    /// Parse an argument list. Unknown flags and options without a value
    /// are errors, not paths.
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self, String> {
        let mut config = PlotConfig::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => config.show_help = true,
                "--output" | "-o" => {
                    let value = args.next().ok_or("--output requires a directory")?;
                    config.output_dir = PathBuf::from(value);
                }
                "--qtable" => {
                    let value = args.next().ok_or("--qtable requires a path")?;
                    config.qtable_path = PathBuf::from(value);
                }
                flag if flag.starts_with('-') => {
                    return Err(format!("unrecognized option '{flag}'"));
                }
                _ => config.log_files.push(PathBuf::from(arg)),
            }
        }

        Ok(config)
    }
}

fn print_help() {
    println!("plot_training - visualize Blackjack Q-learning training results");
    println!();
    println!("Usage:");
    println!("  plot_training <CSV>... [--output DIR] [--qtable PATH]");
    println!();
    println!("Arguments:");
    println!("  <CSV>...          Training log CSV file(s); shell glob patterns work");
    println!();
    println!("Options:");
    println!("  -o, --output DIR  Output directory for PNG plots (default: plots/)");
    println!("      --qtable PATH Q-table CSV for the heatmap (default: analysis/q_table.csv)");
    println!("  -h, --help        Show this help");
    println!();
    println!("Examples:");
    println!("  plot_training logs/training_*.csv");
    println!("  plot_training logs/*.csv --output results/ --qtable analysis/q_table.csv");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<PlotConfig, String> {
        PlotConfig::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_files_and_options() {
        let config = parse(&["a.csv", "-o", "out", "--qtable", "q.csv", "b.csv"]).unwrap();
        assert_eq!(config.log_files, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.qtable_path, PathBuf::from("q.csv"));
        assert!(!config.show_help);
    }

    #[test]
    fn test_option_without_value_is_an_error() {
        assert!(parse(&["a.csv", "--output"]).is_err());
        assert!(parse(&["a.csv", "--qtable"]).is_err());
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let err = parse(&["--outpt", "plots"]).unwrap_err();
        assert!(err.contains("--outpt"), "diagnostic should name the flag: {err}");
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["a.csv"]).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("plots"));
        assert_eq!(config.qtable_path, PathBuf::from("analysis/q_table.csv"));
    }
}
