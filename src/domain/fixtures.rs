//! Builders for hand-made games in unit tests.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use std::collections::BTreeMap;

use super::models::*;

pub struct GameBuilder {
    game: ParsedGame,
}

impl GameBuilder {
    /// A 25-move rapid win as White, 800 vs 800, ending `id` hours after
    /// 2024-01-01 00:00 UTC.
    pub fn new(id: u32) -> Self {
        let date = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap()
            + chrono::Duration::hours(id as i64);

        let game = ParsedGame {
            url: format!("https://www.chess.com/game/live/{}", id),
            time_control: "rapid".to_string(),
            rated: true,
            date,
            color: Color::White,
            result: "win".to_string(),
            result_type: ResultType::Win,
            opponent: format!("opponent{}", id),
            player_rating: 800,
            opponent_rating: 800,
            moves: Vec::new(),
            total_moves: 25,
            end_phase: GamePhase::Middlegame,
            opening: "Italian Game".to_string(),
            opening_moves: String::new(),
            termination: Termination::Resignation,
            day_of_week: date.weekday(),
            hour_of_day: date.hour(),
            time_of_day: TimeOfDay::from_hour(date.hour()),
            clock: None,
            piece_activity: BTreeMap::new(),
            captures_made: 0,
            trades: TradeSummary::default(),
            tactics: TacticFlags::default(),
        };

        Self { game }
    }

    pub fn win(self) -> Self {
        self.result("win", ResultType::Win)
    }

    pub fn loss(self) -> Self {
        self.result("resigned", ResultType::Loss)
    }

    pub fn draw(self) -> Self {
        self.result("agreed", ResultType::Draw).termination(Termination::Other)
    }

    pub fn result(mut self, result: &str, result_type: ResultType) -> Self {
        self.game.result = result.to_string();
        self.game.result_type = result_type;
        self
    }

    pub fn black(mut self) -> Self {
        self.game.color = Color::Black;
        self
    }

    pub fn termination(mut self, termination: Termination) -> Self {
        self.game.termination = termination;
        self
    }

    pub fn total_moves(mut self, total_moves: u32) -> Self {
        self.game.total_moves = total_moves;
        self.game.end_phase = if total_moves <= 15 {
            GamePhase::Opening
        } else if total_moves <= 35 {
            GamePhase::Middlegame
        } else {
            GamePhase::Endgame
        };
        self
    }

    pub fn moves(mut self, moves: &[&str]) -> Self {
        self.game.moves = moves.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn opening(mut self, opening: &str) -> Self {
        self.game.opening = opening.to_string();
        self
    }

    pub fn time_control(mut self, time_control: &str) -> Self {
        self.game.time_control = time_control.to_string();
        self
    }

    pub fn ratings(mut self, player: i32, opponent: i32) -> Self {
        self.game.player_rating = player;
        self.game.opponent_rating = opponent;
        self
    }

    pub fn at(mut self, date: DateTime<Utc>) -> Self {
        self.game.date = date;
        self.game.day_of_week = date.weekday();
        self.game.hour_of_day = date.hour();
        self.game.time_of_day = TimeOfDay::from_hour(date.hour());
        self
    }

    pub fn clock(mut self, final_time: f64, time_pressure_moves: u32) -> Self {
        self.game.clock = Some(ClockData {
            time_data: vec![final_time],
            final_time,
            time_pressure_moves,
            avg_time_per_phase: PhaseTimes {
                opening: 280.0,
                middlegame: 150.0,
                endgame: 0.0,
            },
            critical_moves: Vec::new(),
            avg_time_per_move: Some(8.0),
        });
        self
    }

    pub fn trades(mut self, trades_initiated: u32, queen_trade: bool) -> Self {
        self.game.trades.trades_initiated = trades_initiated;
        self.game.trades.queen_trade = queen_trade;
        self
    }

    pub fn tactics(mut self, forks: bool, discovered: bool, back_rank: bool) -> Self {
        self.game.tactics = TacticFlags {
            forks,
            discovered,
            back_rank,
        };
        self
    }

    pub fn build(self) -> ParsedGame {
        self.game
    }
}

/// `Utc` timestamp shorthand for tests.
pub fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap()
}
