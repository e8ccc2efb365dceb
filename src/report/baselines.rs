//! Fixed comparison values printed next to computed statistics.
//!
//! These are placeholders, not derived from any population data, and the
//! report labels them as reference values wherever they appear.

use crate::domain::GamePhase;

#[derive(Debug, Clone, Copy)]
pub struct ReferenceBaselines {
    pub opening_win_rate: f64,
    pub middlegame_win_rate: f64,
    pub endgame_win_rate: f64,
    pub trades_per_game: f64,
    pub trade_when_ahead: f64,
    pub trade_when_behind: f64,
    pub blunders_per_game: f64,
}

impl ReferenceBaselines {
    pub const PLACEHOLDER: ReferenceBaselines = ReferenceBaselines {
        opening_win_rate: 45.0,
        middlegame_win_rate: 50.0,
        endgame_win_rate: 48.0,
        trades_per_game: 6.5,
        trade_when_ahead: 75.0,
        trade_when_behind: 25.0,
        blunders_per_game: 2.1,
    };

    pub fn phase_win_rate(&self, phase: GamePhase) -> f64 {
        match phase {
            GamePhase::Opening => self.opening_win_rate,
            GamePhase::Middlegame => self.middlegame_win_rate,
            GamePhase::Endgame => self.endgame_win_rate,
        }
    }
}

impl Default for ReferenceBaselines {
    fn default() -> Self {
        Self::PLACEHOLDER
    }
}

pub const QUOTES: [&str; 6] = [
    "\"Every chess master was once a beginner.\" - Irving Chernev",
    "\"Chess is the struggle against the error.\" - Johannes Zukertort",
    "\"Tactics flow from a superior position.\" - Bobby Fischer",
    "\"The blunders are all there on the board, waiting to be made.\" - Savielly Tartakower",
    "\"When you see a good move, look for a better one.\" - Emanuel Lasker",
    "\"Help your pieces so they can help you.\" - Paul Morphy",
];

/// Picks a quote from the number of analyzed games so a given report is reproducible.
pub fn quote_for(total_games: u32) -> &'static str {
    QUOTES[total_games as usize % QUOTES.len()]
}
