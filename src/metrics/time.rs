use super::stats::{mean, percentage};
use crate::domain::{GamePhase, ParsedGame, ResultType, Termination};

/// Average clock figures over a group of games with clock data.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClockAverages {
    pub opening: f64,
    pub middlegame: f64,
    pub endgame: f64,
    pub per_move: f64,
}

impl ClockAverages {
    pub fn phase(&self, phase: GamePhase) -> f64 {
        match phase {
            GamePhase::Opening => self.opening,
            GamePhase::Middlegame => self.middlegame,
            GamePhase::Endgame => self.endgame,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeMetrics {
    pub time_losses: u32,
    pub time_loss_pct: f64,
    pub games_with_clock: u32,
    pub time_pressure_games: u32,
    /// Share of clocked games in which the player dropped under the pressure threshold.
    pub time_pressure_pct: f64,
    pub time_pressure_win_rate: f64,
    pub wins: ClockAverages,
    pub losses: ClockAverages,
}

pub fn calculate(games: &[ParsedGame]) -> TimeMetrics {
    let time_losses = games
        .iter()
        .filter(|g| g.result_type == ResultType::Loss && g.termination == Termination::Time)
        .count() as u32;

    let clocked: Vec<&ParsedGame> = games.iter().filter(|g| g.clock.is_some()).collect();
    let pressured: Vec<&ParsedGame> = clocked
        .iter()
        .copied()
        .filter(|g| g.clock.as_ref().is_some_and(|c| c.time_pressure_moves > 0))
        .collect();
    let pressured_wins = pressured.iter().filter(|g| g.is_win()).count() as u32;

    TimeMetrics {
        time_losses,
        time_loss_pct: percentage(time_losses, games.len() as u32),
        games_with_clock: clocked.len() as u32,
        time_pressure_games: pressured.len() as u32,
        time_pressure_pct: percentage(pressured.len() as u32, clocked.len() as u32),
        time_pressure_win_rate: percentage(pressured_wins, pressured.len() as u32),
        wins: clock_averages(&clocked, ResultType::Win),
        losses: clock_averages(&clocked, ResultType::Loss),
    }
}

/// Phases the player never reached (mean clock of 0) are left out of the average.
fn clock_averages(clocked: &[&ParsedGame], result_type: ResultType) -> ClockAverages {
    let clocks: Vec<_> = clocked
        .iter()
        .filter(|g| g.result_type == result_type)
        .filter_map(|g| g.clock.as_ref())
        .collect();

    let phase_mean = |phase: GamePhase| {
        let values: Vec<f64> = clocks
            .iter()
            .map(|c| c.avg_time_per_phase.get(phase))
            .filter(|&t| t > 0.0)
            .collect();
        mean(&values)
    };

    let per_move: Vec<f64> = clocks.iter().filter_map(|c| c.avg_time_per_move).collect();

    ClockAverages {
        opening: phase_mean(GamePhase::Opening),
        middlegame: phase_mean(GamePhase::Middlegame),
        endgame: phase_mean(GamePhase::Endgame),
        per_move: mean(&per_move),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::GameBuilder;

    #[test]
    fn test_time_losses_exclude_wins_on_time() {
        let games = vec![
            GameBuilder::new(1).loss().termination(Termination::Time).build(),
            GameBuilder::new(2).win().termination(Termination::Time).build(),
            GameBuilder::new(3).loss().build(),
            GameBuilder::new(4).win().build(),
        ];

        let time = calculate(&games);
        assert_eq!(time.time_losses, 1);
        assert_eq!(time.time_loss_pct, 25.0);
    }

    #[test]
    fn test_pressure_is_measured_on_clocked_games() {
        let games = vec![
            GameBuilder::new(1).win().clock(12.0, 3).build(),
            GameBuilder::new(2).loss().clock(5.0, 6).build(),
            GameBuilder::new(3).win().clock(140.0, 0).build(),
            GameBuilder::new(4).win().build(),
        ];

        let time = calculate(&games);
        assert_eq!(time.games_with_clock, 3);
        assert_eq!(time.time_pressure_games, 2);
        assert_eq!(time.time_pressure_win_rate, 50.0);
        assert!((time.time_pressure_pct - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_unreached_phases_do_not_drag_averages() {
        let games = vec![GameBuilder::new(1).win().clock(60.0, 0).build()];

        let time = calculate(&games);
        assert_eq!(time.wins.opening, 280.0);
        assert_eq!(time.wins.endgame, 0.0);
        assert_eq!(time.wins.per_move, 8.0);
        assert_eq!(time.losses, ClockAverages::default());
    }

    #[test]
    fn test_no_clock_data() {
        let time = calculate(&[GameBuilder::new(1).build()]);
        assert_eq!(time.games_with_clock, 0);
        assert_eq!(time.time_pressure_pct, 0.0);
    }
}
