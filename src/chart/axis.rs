//! Tick placement and label formatting

/// Format an episode count compactly: 500, 5K, 1.2M.
pub fn format_episode(x: f64) -> String {
    if x >= 1_000_000.0 {
        format!("{:.1}M", x / 1_000_000.0)
    } else if x >= 1_000.0 {
        format!("{:.0}K", x / 1_000.0)
    } else {
        format!("{}", x as i64)
    }
}

/// Format a y-axis tick with just enough decimals for the step size.
pub fn format_tick(value: f64, step: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value }; // normalize -0.0
    if step >= 1.0 {
        format!("{value:.0}")
    } else if step >= 0.1 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

/// Round a raw step up to a 1/2/5 multiple of a power of ten.
pub fn nice_step(range: f64, target_ticks: usize) -> f64 {
    let raw = range / target_ticks.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    for multiple in [1.0, 2.0, 5.0] {
        if raw <= multiple * magnitude {
            return multiple * magnitude;
        }
    }
    10.0 * magnitude
}

/// Tick positions covering [min, max] at a nice step.
pub fn ticks(min: f64, max: f64, target_ticks: usize) -> Vec<f64> {
    if !(max > min) {
        return vec![min];
    }
    let step = nice_step(max - min, target_ticks);
    let mut out = Vec::new();
    let mut k = (min / step).ceil() as i64;
    while k as f64 * step <= max + step * 1e-6 {
        out.push(k as f64 * step);
        k += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_formatting() {
        assert_eq!(format_episode(500.0), "500");
        assert_eq!(format_episode(5_000.0), "5K");
        assert_eq!(format_episode(500_000.0), "500K");
        assert_eq!(format_episode(1_200_000.0), "1.2M");
        assert_eq!(format_episode(0.0), "0");
    }

    #[test]
    fn test_nice_step_picks_125_multiples() {
        assert_eq!(nice_step(10.0, 5), 2.0);
        assert_eq!(nice_step(65.0, 6), 20.0);
        assert_eq!(nice_step(1.0, 5), 0.2);
        assert_eq!(nice_step(0.9, 10), 0.1);
    }

    #[test]
    fn test_ticks_cover_range() {
        let t = ticks(0.0, 65.0, 6);
        assert_eq!(t, vec![0.0, 20.0, 40.0, 60.0]);

        let t = ticks(-0.02, 1.05, 6);
        assert!(t.contains(&0.0));
        assert!(t.iter().all(|&v| (-0.02..=1.06).contains(&v)));
    }

    #[test]
    fn test_degenerate_range_yields_single_tick() {
        assert_eq!(ticks(0.5, 0.5, 6), vec![0.5]);
    }

    #[test]
    fn test_tick_formatting_tracks_step() {
        assert_eq!(format_tick(20.0, 20.0), "20");
        assert_eq!(format_tick(0.2, 0.2), "0.2");
        assert_eq!(format_tick(0.05, 0.05), "0.05");
        assert_eq!(format_tick(-0.0, 0.2), "0.0");
    }
}
