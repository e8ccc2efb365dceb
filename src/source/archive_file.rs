use anyhow::{Context, Result};
use log::info;
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::{archive_games, end_time, GameRecordSource};
use crate::domain::RatingSnapshot;
use crate::errors::{parse_context, with_parse_context};

/// Games saved from a chess.com monthly archive: either `{"games": [...]}` or
/// a bare array of game records.
///
/// The look-back window is not applied to files; the limit is.
pub struct ArchiveFileSource {
    path: PathBuf,
}

impl ArchiveFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// All records, newest first.
    async fn load(&self) -> Result<Vec<Value>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read archive file {}", self.path.display()))?;
        let document: Value = with_parse_context(serde_json::from_str(&text), "archive file")?;

        let mut games = archive_games(document).with_context(|| parse_context("archive file games"))?;
        games.sort_by_key(|g| std::cmp::Reverse(end_time(g)));
        Ok(games)
    }
}

impl GameRecordSource for ArchiveFileSource {
    async fn fetch_games(&mut self, username: &str, limit: usize, _days: u32) -> Result<Vec<Value>> {
        let mut games = self.load().await?;
        games.truncate(limit);

        info!(
            "Loaded {} games for {} from {}",
            games.len(),
            username,
            self.path.display()
        );
        Ok(games)
    }

    /// The subject's rating in their most recent game of the file.
    async fn fetch_rating(&mut self, username: &str) -> Result<RatingSnapshot> {
        let games = self.load().await?;

        let rating = games
            .iter()
            .find_map(|g| subject_rating(g, username))
            .with_context(|| format!("No rated game for {} in {}", username, self.path.display()))?;

        Ok(RatingSnapshot { rating })
    }
}

fn subject_rating(game: &Value, username: &str) -> Option<i32> {
    ["white", "black"].iter().find_map(|side| {
        let side = game.get(*side)?;
        let name = side.get("username")?.as_str()?;
        if !name.eq_ignore_ascii_case(username) {
            return None;
        }
        i32::try_from(side.get("rating")?.as_i64()?).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn record(end_time: i64, white: (&str, i64), black: (&str, i64)) -> Value {
        json!({
            "url": format!("https://www.chess.com/game/live/{}", end_time),
            "end_time": end_time,
            "white": {"username": white.0, "rating": white.1, "result": "win"},
            "black": {"username": black.0, "rating": black.1, "result": "resigned"},
        })
    }

    fn write_temp(name: &str, document: &Value) -> PathBuf {
        let path = std::env::temp_dir().join(format!("chess_insights_{}_{}.json", name, std::process::id()));
        fs::write(&path, serde_json::to_string(document).unwrap()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_wrapped_archive_newest_first_and_limited() {
        let document = json!({"games": [
            record(100, ("alice", 800), ("bob", 790)),
            record(300, ("bob", 795), ("alice", 812)),
            record(200, ("alice", 805), ("carol", 700)),
        ]});
        let path = write_temp("wrapped", &document);
        let mut source = ArchiveFileSource::new(&path);

        let games = source.fetch_games("alice", 2, 30).await.unwrap();
        let times: Vec<i64> = games.iter().map(end_time).collect();
        assert_eq!(times, vec![300, 200]);

        fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_bare_array_and_latest_rating() {
        let document = json!([
            record(100, ("alice", 800), ("bob", 790)),
            record(300, ("bob", 795), ("Alice", 812)),
        ]);
        let path = write_temp("bare", &document);
        let mut source = ArchiveFileSource::new(&path);

        let snapshot = source.fetch_rating("alice").await.unwrap();
        assert_eq!(snapshot.rating, 812);
        assert!(source.fetch_rating("zed").await.is_err());

        fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let mut source = ArchiveFileSource::new("/definitely/not/here.json");
        let err = source.fetch_games("alice", 10, 0).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read archive file"));
    }
}
