use super::models::ParsedGame;
use std::collections::HashSet;

/// Parsed games in arrival order, unique by URL
pub struct GameCollection {
    games: Vec<ParsedGame>,
    seen_urls: HashSet<String>,
}

impl GameCollection {
    pub fn new() -> Self {
        Self {
            games: Vec::new(),
            seen_urls: HashSet::new(),
        }
    }

    /// Returns false when a game with the same URL was already added.
    pub fn add(&mut self, game: ParsedGame) -> bool {
        if !self.seen_urls.insert(game.url.clone()) {
            return false;
        }
        self.games.push(game);
        true
    }

    pub fn into_vec(self) -> Vec<ParsedGame> {
        self.games
    }
}

impl Default for GameCollection {
    fn default() -> Self {
        Self::new()
    }
}
