use log::warn;
use serde_json::Value;

use super::GameParser;
use crate::domain::{GameCollection, ParseProgress, ParsedGame};

/// A record that did not make it into the parsed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub url: Option<String>,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ParsedBatch {
    pub games: Vec<ParsedGame>,
    pub skipped: Vec<SkippedRecord>,
}

/// Parse every record, skipping the ones that fail.
///
/// `on_progress` runs after each record, parsed or skipped. Records whose URL
/// was already parsed are skipped as duplicates.
pub fn parse_batch<F>(
    parser: &GameParser,
    records: &[Value],
    username: &str,
    mut on_progress: F,
) -> ParsedBatch
where
    F: FnMut(&ParseProgress),
{
    let mut progress = ParseProgress::new(records.len());
    let mut collection = GameCollection::new();
    let mut skipped = Vec::new();

    for (index, raw) in records.iter().enumerate() {
        let url = raw.get("url").and_then(Value::as_str).map(str::to_string);

        let outcome = match parser.parse(raw, username) {
            Ok(game) => {
                let game_url = game.url.clone();
                if collection.add(game) {
                    Ok(())
                } else {
                    Err(format!("duplicate game {}", game_url))
                }
            }
            Err(e) => Err(e.to_string()),
        };

        match outcome {
            Ok(()) => progress.increment_parsed(),
            Err(reason) => {
                warn!("Skipping record {}: {}", index, reason);
                skipped.push(SkippedRecord { index, url, reason });
                progress.increment_skipped();
            }
        }

        on_progress(&progress);
    }

    ParsedBatch {
        games: collection.into_vec(),
        skipped,
    }
}
