use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// --- API Record Structures ---

/// Raw game record as returned by the chess.com archive endpoints.
///
/// Every field is optional: a record missing a required field must surface as
/// a per-record parse error, not as a failure to decode the whole archive.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawGameRecord {
    pub url: Option<String>,
    pub pgn: Option<String>,
    pub end_time: Option<i64>,
    pub rated: Option<bool>,
    pub time_class: Option<String>,
    pub eco: Option<String>,
    pub white: Option<RawSide>,
    pub black: Option<RawSide>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawSide {
    pub username: Option<String>,
    pub rating: Option<i32>,
    pub result: Option<String>,
}

/// Current rating of the analysed player, taken from the stats endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatingSnapshot {
    pub rating: i32,
}

/// Who the report is about.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    pub username: String,
    pub current_rating: i32,
    pub rating_level: RatingLevel,
}

impl PlayerProfile {
    pub fn new(username: &str, snapshot: RatingSnapshot) -> Self {
        Self {
            username: username.to_string(),
            current_rating: snapshot.rating,
            rating_level: RatingLevel::from_rating(snapshot.rating),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingLevel {
    Beginner,     // < 800
    Novice,       // 800-1199
    Intermediate, // 1200-1599
    Advanced,     // 1600-1999
    Expert,       // 2000-2199
    Master,       // 2200+
}

impl RatingLevel {
    pub fn from_rating(rating: i32) -> Self {
        if rating < 800 {
            RatingLevel::Beginner
        } else if rating < 1200 {
            RatingLevel::Novice
        } else if rating < 1600 {
            RatingLevel::Intermediate
        } else if rating < 2000 {
            RatingLevel::Advanced
        } else if rating < 2200 {
            RatingLevel::Expert
        } else {
            RatingLevel::Master
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RatingLevel::Beginner => "Beginner",
            RatingLevel::Novice => "Novice",
            RatingLevel::Intermediate => "Intermediate",
            RatingLevel::Advanced => "Advanced",
            RatingLevel::Expert => "Expert",
            RatingLevel::Master => "Master",
        }
    }
}

// --- Parsed Game ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn as_str(&self) -> &str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }

    /// Whether the ply at `index` (0-based, White first) belongs to this side.
    pub fn owns_ply(&self, index: usize) -> bool {
        match self {
            Color::White => index % 2 == 0,
            Color::Black => index % 2 == 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultType {
    Win,
    Loss,
    Draw,
}

impl ResultType {
    pub fn as_str(&self) -> &str {
        match self {
            ResultType::Win => "win",
            ResultType::Loss => "loss",
            ResultType::Draw => "draw",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GamePhase {
    Opening,
    Middlegame,
    Endgame,
}

impl GamePhase {
    pub const ALL: [GamePhase; 3] = [GamePhase::Opening, GamePhase::Middlegame, GamePhase::Endgame];

    pub fn as_str(&self) -> &str {
        match self {
            GamePhase::Opening => "opening",
            GamePhase::Middlegame => "middlegame",
            GamePhase::Endgame => "endgame",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Termination {
    Checkmate,
    Resignation,
    Time,
    Stalemate,
    Draw,
    Other,
}

impl Termination {
    pub fn as_str(&self) -> &str {
        match self {
            Termination::Checkmate => "checkmate",
            Termination::Resignation => "resignation",
            Termination::Time => "time",
            Termination::Stalemate => "stalemate",
            Termination::Draw => "draw",
            Termination::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            18..=23 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }

    pub fn hours_label(&self) -> &str {
        match self {
            TimeOfDay::Morning => "6am-12pm",
            TimeOfDay::Afternoon => "12pm-6pm",
            TimeOfDay::Evening => "6pm-12am",
            TimeOfDay::Night => "12am-6am",
        }
    }
}

/// Mean clock reading (seconds) of the subject within each phase.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseTimes {
    pub opening: f64,
    pub middlegame: f64,
    pub endgame: f64,
}

impl PhaseTimes {
    pub fn get(&self, phase: GamePhase) -> f64 {
        match phase {
            GamePhase::Opening => self.opening,
            GamePhase::Middlegame => self.middlegame,
            GamePhase::Endgame => self.endgame,
        }
    }
}

/// A move with anomalous time usage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalMove {
    pub move_number: u32,
    pub time_delta: f64,
    pub clock: f64,
}

/// Clock-derived facts. Only built when the PGN carries `%clk` annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockData {
    pub time_data: Vec<f64>,
    pub final_time: f64,
    pub time_pressure_moves: u32,
    pub avg_time_per_phase: PhaseTimes,
    pub critical_moves: Vec<CriticalMove>,
    pub avg_time_per_move: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeSummary {
    pub trades_initiated: u32,
    pub piece_trades: BTreeMap<char, u32>,
    pub queen_trade: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TacticFlags {
    pub forks: bool,
    pub discovered: bool,
    pub back_rank: bool,
}

/// Structured facts extracted from one game, seen from the subject's side.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedGame {
    pub url: String,
    pub time_control: String,
    pub rated: bool,
    pub date: DateTime<Utc>,

    pub color: Color,
    pub result: String,
    pub result_type: ResultType,
    pub opponent: String,
    pub player_rating: i32,
    pub opponent_rating: i32,

    pub moves: Vec<String>,
    pub total_moves: u32,
    pub end_phase: GamePhase,
    pub opening: String,
    pub opening_moves: String,
    pub termination: Termination,

    pub day_of_week: Weekday,
    pub hour_of_day: u32,
    pub time_of_day: TimeOfDay,

    pub clock: Option<ClockData>,

    pub piece_activity: BTreeMap<char, u32>,
    pub captures_made: u32,
    pub trades: TradeSummary,
    pub tactics: TacticFlags,
}

impl ParsedGame {
    /// Opponent rating minus player rating.
    pub fn rating_diff(&self) -> i32 {
        self.opponent_rating - self.player_rating
    }

    pub fn is_win(&self) -> bool {
        self.result_type == ResultType::Win
    }

    pub fn is_loss(&self) -> bool {
        self.result_type == ResultType::Loss
    }

    pub fn final_time(&self) -> Option<f64> {
        self.clock.as_ref().map(|c| c.final_time)
    }
}
