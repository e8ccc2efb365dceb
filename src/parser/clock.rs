use regex::Regex;

use crate::config::AnalysisSettings;
use crate::domain::{ClockData, Color, CriticalMove, PhaseTimes};

/// All `[%clk H:MM:SS(.f)]` readings in document order, in seconds.
pub fn extract_clock_times(pgn: &str, clock: &Regex) -> Vec<f64> {
    clock
        .captures_iter(pgn)
        .filter_map(|caps| {
            let hours: f64 = caps.get(1)?.as_str().parse().ok()?;
            let minutes: f64 = caps.get(2)?.as_str().parse().ok()?;
            let seconds: f64 = caps.get(3)?.as_str().parse().ok()?;
            Some(hours * 3600.0 + minutes * 60.0 + seconds)
        })
        .collect()
}

/// The subject's own readings: every other entry, starting at 0 for White
/// and 1 for Black.
pub fn subject_readings(time_data: &[f64], color: Color) -> Vec<f64> {
    time_data
        .iter()
        .enumerate()
        .filter(|(idx, _)| color.owns_ply(*idx))
        .map(|(_, &t)| t)
        .collect()
}

/// Build clock facts, or `None` when there is nothing to build them from.
pub fn build_clock_data(
    time_data: Vec<f64>,
    color: Color,
    settings: &AnalysisSettings,
) -> Option<ClockData> {
    let readings = subject_readings(&time_data, color);
    let final_time = *readings.last()?;

    let time_pressure_moves = readings
        .iter()
        .filter(|&&t| t < settings.time_pressure_seconds)
        .count() as u32;

    let avg_time_per_phase = average_per_phase(&readings, settings);

    let (critical_moves, avg_time_per_move) = if readings.len() > 1 {
        let deltas = time_deltas(&readings);
        let avg = mean(&deltas);
        (find_critical_moves(&readings, &deltas, avg, settings), Some(avg))
    } else {
        (Vec::new(), None)
    };

    Some(ClockData {
        time_data,
        final_time,
        time_pressure_moves,
        avg_time_per_phase,
        critical_moves,
        avg_time_per_move,
    })
}

fn average_per_phase(readings: &[f64], settings: &AnalysisSettings) -> PhaseTimes {
    let mut opening = Vec::new();
    let mut middlegame = Vec::new();
    let mut endgame = Vec::new();

    for (idx, &t) in readings.iter().enumerate() {
        let move_number = idx as u32 + 1;
        if move_number <= settings.opening_phase_end {
            opening.push(t);
        } else if move_number <= settings.middlegame_phase_end {
            middlegame.push(t);
        } else {
            endgame.push(t);
        }
    }

    PhaseTimes {
        opening: mean(&opening),
        middlegame: mean(&middlegame),
        endgame: mean(&endgame),
    }
}

/// Time spent between consecutive readings.
fn time_deltas(readings: &[f64]) -> Vec<f64> {
    readings.windows(2).map(|w| w[0] - w[1]).collect()
}

/// A move is critical when it took more than three times the average, or
/// when it was played in under a third of the average with the clock already
/// below the critical threshold.
fn find_critical_moves(
    readings: &[f64],
    deltas: &[f64],
    avg: f64,
    settings: &AnalysisSettings,
) -> Vec<CriticalMove> {
    deltas
        .iter()
        .enumerate()
        .filter(|&(idx, &delta)| {
            let slow = delta > 3.0 * avg;
            let panicked =
                delta < avg / 3.0 && readings[idx + 1] < settings.critical_time_threshold;
            slow || panicked
        })
        .take(settings.max_critical_moves)
        .map(|(idx, &delta)| CriticalMove {
            move_number: idx as u32 + 1,
            time_delta: delta,
            clock: readings[idx],
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Interleave the subject's readings with constant opponent readings.
    fn as_white(readings: &[f64]) -> Vec<f64> {
        readings.iter().flat_map(|&t| [t, 500.0]).collect()
    }

    fn clock_regex() -> Regex {
        Regex::new(r"\[%clk\s+(\d+):(\d+):(\d+(?:\.\d+)?)\]").unwrap()
    }

    #[test]
    fn test_extract_converts_to_seconds() {
        let pgn = "1. e4 {[%clk 1:02:03]} e5 {[%clk 0:00:09.5]}";
        assert_eq!(extract_clock_times(pgn, &clock_regex()), vec![3723.0, 9.5]);
    }

    #[test]
    fn test_no_annotations_yields_no_clock_data() {
        let settings = AnalysisSettings::default();
        let times = extract_clock_times("1. e4 e5", &clock_regex());
        assert!(build_clock_data(times, Color::White, &settings).is_none());
    }

    #[test]
    fn test_black_needs_its_own_reading() {
        let settings = AnalysisSettings::default();
        assert!(build_clock_data(vec![300.0], Color::Black, &settings).is_none());
        assert!(build_clock_data(vec![300.0], Color::White, &settings).is_some());
    }

    #[test]
    fn test_white_final_time_is_last_even_reading() {
        let settings = AnalysisSettings::default();
        let data = build_clock_data(vec![300.0, 299.0, 280.0, 270.0], Color::White, &settings)
            .unwrap();

        assert_eq!(data.time_data.len(), 4);
        assert_eq!(data.final_time, 280.0);
        assert_eq!(data.avg_time_per_move, Some(20.0));
    }

    #[test]
    fn test_black_uses_odd_readings() {
        let settings = AnalysisSettings::default();
        let data =
            build_clock_data(vec![60.0, 50.0, 55.0, 25.0, 54.0, 20.0], Color::Black, &settings)
                .unwrap();

        assert_eq!(data.final_time, 20.0);
        assert_eq!(data.time_pressure_moves, 2);
    }

    #[test]
    fn test_single_reading_has_no_move_average() {
        let settings = AnalysisSettings::default();
        let data = build_clock_data(vec![180.0], Color::White, &settings).unwrap();

        assert!(data.critical_moves.is_empty());
        assert_eq!(data.avg_time_per_move, None);
    }

    #[test]
    fn test_slow_move_is_critical() {
        let settings = AnalysisSettings::default();
        // Subject deltas: 2, 2, 2, 30, 2 -> avg 7.6, 30 > 22.8
        let readings = [100.0, 98.0, 96.0, 94.0, 64.0, 62.0];
        let data = build_clock_data(as_white(&readings), Color::White, &settings).unwrap();

        assert_eq!(data.critical_moves.len(), 1);
        let critical = data.critical_moves[0];
        assert_eq!(critical.move_number, 4);
        assert_eq!(critical.time_delta, 30.0);
        assert_eq!(critical.clock, 94.0);
    }

    #[test]
    fn test_fast_move_under_threshold_is_critical() {
        let settings = AnalysisSettings::default();
        // Deltas: 20, 20, 0.5 -> avg 13.5; 0.5 < 4.5 and clock 8.5 < 10
        let readings = [49.0, 29.0, 9.0, 8.5];
        let data = build_clock_data(as_white(&readings), Color::White, &settings).unwrap();

        let moves: Vec<u32> = data.critical_moves.iter().map(|c| c.move_number).collect();
        assert!(moves.contains(&3));
    }

    #[test]
    fn test_critical_moves_are_capped() {
        let settings = AnalysisSettings::default();
        // Six 60s moves among thirty 1s moves: avg 10.8, each 60 > 32.4
        let mut readings = vec![2000.0];
        for i in 0..36 {
            let spent = if i % 6 == 0 { 60.0 } else { 1.0 };
            let last = readings[readings.len() - 1];
            readings.push(last - spent);
        }
        let data = build_clock_data(as_white(&readings), Color::White, &settings).unwrap();

        assert_eq!(data.critical_moves.len(), settings.max_critical_moves);
        assert_eq!(data.critical_moves[0].move_number, 1);
    }

    #[test]
    fn test_phase_averages_use_move_numbers() {
        let settings = AnalysisSettings::default();
        let readings: Vec<f64> = (0..40).map(|i| 400.0 - i as f64).collect();
        let data = build_clock_data(as_white(&readings), Color::White, &settings).unwrap();

        // Moves 1-15: 400..386, 16-35: 385..366, 36-40: 365..361
        assert_eq!(data.avg_time_per_phase.opening, 393.0);
        assert_eq!(data.avg_time_per_phase.middlegame, 375.5);
        assert_eq!(data.avg_time_per_phase.endgame, 363.0);
    }
}
