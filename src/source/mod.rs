//! Where raw game records come from: the chess.com public API or a saved
//! archive on disk.

mod archive_file;
mod chess_com;

pub use archive_file::ArchiveFileSource;
pub use chess_com::ChessComClient;

use anyhow::Result;
use serde_json::Value;

use crate::domain::RatingSnapshot;

/// Supplier of raw chess.com game records and the player's current rating.
#[allow(async_fn_in_trait)]
pub trait GameRecordSource {
    /// Up to `limit` records, newest first. `days == 0` disables the
    /// look-back window.
    async fn fetch_games(&mut self, username: &str, limit: usize, days: u32) -> Result<Vec<Value>>;

    async fn fetch_rating(&mut self, username: &str) -> Result<RatingSnapshot>;
}

fn end_time(record: &Value) -> i64 {
    record.get("end_time").and_then(Value::as_i64).unwrap_or(0)
}

/// The `games` array of an archive document, or a bare array of records.
fn archive_games(document: Value) -> Option<Vec<Value>> {
    match document {
        Value::Array(games) => Some(games),
        Value::Object(mut map) => match map.remove("games") {
            Some(Value::Array(games)) => Some(games),
            _ => None,
        },
        _ => None,
    }
}
