use std::collections::BTreeMap;

use super::stats::{mean, percentage};
use crate::config::AnalysisSettings;
use crate::domain::{GamePhase, ParsedGame, ResultType, Termination};

/// What decisive games of one outcome looked like.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutcomeProfile {
    pub terminations: BTreeMap<Termination, u32>,
    pub game_lengths: Vec<u32>,
    pub rating_diffs: Vec<i32>,
    pub final_times: Vec<f64>,
}

impl OutcomeProfile {
    pub fn games(&self) -> usize {
        self.game_lengths.len()
    }

    pub fn avg_length(&self) -> f64 {
        let lengths: Vec<f64> = self.game_lengths.iter().map(|&m| m as f64).collect();
        mean(&lengths)
    }

    pub fn avg_rating_diff(&self) -> f64 {
        let diffs: Vec<f64> = self.rating_diffs.iter().map(|&d| d as f64).collect();
        mean(&diffs)
    }

    /// Most frequent way these games ended; ties go to the earlier variant.
    pub fn most_common_termination(&self) -> Option<(Termination, u32)> {
        let mut best: Option<(Termination, u32)> = None;
        for (&termination, &count) in &self.terminations {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((termination, count));
            }
        }
        best
    }

    fn record(&mut self, game: &ParsedGame) {
        *self.terminations.entry(game.termination).or_insert(0) += 1;
        self.game_lengths.push(game.total_moves);
        self.rating_diffs.push(game.rating_diff());
        if let Some(final_time) = game.final_time() {
            self.final_times.push(final_time);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuickLoss {
    pub moves: u32,
    pub opening: String,
    pub phase: GamePhase,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternMetrics {
    pub wins: OutcomeProfile,
    pub losses: OutcomeProfile,
    pub quick_losses: Vec<QuickLoss>,
    pub quick_loss_rate: f64,
}

pub fn calculate(games: &[ParsedGame], settings: &AnalysisSettings) -> PatternMetrics {
    let mut metrics = PatternMetrics::default();

    for game in games {
        match game.result_type {
            ResultType::Win => metrics.wins.record(game),
            ResultType::Loss => {
                metrics.losses.record(game);
                if game.total_moves < settings.quick_loss_moves {
                    metrics.quick_losses.push(QuickLoss {
                        moves: game.total_moves,
                        opening: game.opening.clone(),
                        phase: game.end_phase,
                    });
                }
            }
            ResultType::Draw => {}
        }
    }

    metrics.quick_loss_rate = percentage(metrics.quick_losses.len() as u32, games.len() as u32);
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::GameBuilder;

    #[test]
    fn test_profiles_split_by_outcome() {
        let games = vec![
            GameBuilder::new(1).win().termination(Termination::Checkmate).total_moves(30).ratings(800, 850).build(),
            GameBuilder::new(2).win().termination(Termination::Resignation).total_moves(20).build(),
            GameBuilder::new(3).win().termination(Termination::Checkmate).total_moves(40).clock(33.0, 0).build(),
            GameBuilder::new(4).loss().termination(Termination::Time).total_moves(15).build(),
            GameBuilder::new(5).draw().total_moves(60).build(),
        ];

        let patterns = calculate(&games, &AnalysisSettings::default());

        assert_eq!(patterns.wins.games(), 3);
        assert_eq!(patterns.wins.avg_length(), 30.0);
        assert_eq!(
            patterns.wins.most_common_termination(),
            Some((Termination::Checkmate, 2))
        );
        assert_eq!(patterns.wins.rating_diffs, vec![50, 0, 0]);
        assert_eq!(patterns.wins.final_times, vec![33.0]);
        assert_eq!(patterns.losses.games(), 1);
    }

    #[test]
    fn test_quick_losses() {
        let games = vec![
            GameBuilder::new(1).loss().total_moves(12).opening("Scholars Mate").build(),
            GameBuilder::new(2).loss().total_moves(20).build(),
            GameBuilder::new(3).win().total_moves(10).build(),
            GameBuilder::new(4).win().total_moves(30).build(),
        ];

        let patterns = calculate(&games, &AnalysisSettings::default());

        assert_eq!(patterns.quick_losses.len(), 1);
        assert_eq!(patterns.quick_losses[0].opening, "Scholars Mate");
        assert_eq!(patterns.quick_losses[0].phase, GamePhase::Opening);
        assert_eq!(patterns.quick_loss_rate, 25.0);
    }

    #[test]
    fn test_termination_tie_prefers_earlier_variant() {
        let games = vec![
            GameBuilder::new(1).loss().termination(Termination::Time).build(),
            GameBuilder::new(2).loss().termination(Termination::Resignation).build(),
        ];

        let patterns = calculate(&games, &AnalysisSettings::default());
        assert_eq!(
            patterns.losses.most_common_termination(),
            Some((Termination::Resignation, 1))
        );
        assert_eq!(patterns.wins.most_common_termination(), None);
    }
}
