use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use log::{debug, info, warn};
use serde_json::Value;

use super::{archive_games, end_time, GameRecordSource};
use crate::cache::Cache;
use crate::config::FetcherSettings;
use crate::domain::RatingSnapshot;
use crate::errors::parse_context;
use crate::http::RateLimitedClient;

/// Stats categories consulted for the current rating, in order of preference.
const RATING_CATEGORIES: [&str; 3] = ["chess_rapid", "chess_blitz", "chess_bullet"];

/// chess.com public API client
pub struct ChessComClient {
    client: RateLimitedClient,
    base_url: String,
    cache: Option<Cache>,
}

impl ChessComClient {
    pub fn new(settings: &FetcherSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
        )?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            cache: None,
        })
    }

    /// Serve completed months from `cache` and store freshly downloaded ones.
    pub fn with_cache(mut self, cache: Cache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Monthly archive URLs, oldest first as the API lists them.
    async fn fetch_archive_list(&mut self, username: &str) -> Result<Vec<String>> {
        let url = self.build_archives_url(username);
        let data = self.client.get_json(&url).await?;

        let archives = data
            .get("archives")
            .and_then(Value::as_array)
            .with_context(|| parse_context("archive list"))?
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();

        Ok(archives)
    }

    /// Games of one monthly archive, oldest first.
    async fn fetch_month(&mut self, username: &str, url: &str, now: DateTime<Utc>) -> Result<Vec<Value>> {
        let cacheable_month = archive_month(url).filter(|&(y, m)| Cache::is_cacheable(y, m, now));

        if let (Some(cache), Some((year, month))) = (&self.cache, cacheable_month) {
            match cache.load_archive(username, year, month) {
                Ok(Some(document)) => {
                    if let Some(games) = archive_games(document) {
                        return Ok(games);
                    }
                    warn!("Cached archive {}/{:02} has no games array, refetching", year, month);
                }
                Ok(None) => {}
                Err(e) => warn!("Ignoring unreadable cache entry: {:#}", e),
            }
        }

        let document = self.client.get_json(url).await?;

        if let (Some(cache), Some((year, month))) = (&self.cache, cacheable_month) {
            if let Err(e) = cache.save_archive(username, year, month, &document) {
                warn!("Failed to save archive {}/{:02} to cache: {:#}", year, month, e);
            }
        }

        archive_games(document).with_context(|| parse_context("monthly archive"))
    }

    // --- Helper Methods ---

    fn build_archives_url(&self, username: &str) -> String {
        format!(
            "{}/pub/player/{}/games/archives",
            self.base_url,
            Self::encode_username(username)
        )
    }

    fn build_stats_url(&self, username: &str) -> String {
        format!("{}/pub/player/{}/stats", self.base_url, Self::encode_username(username))
    }

    fn encode_username(username: &str) -> String {
        urlencoding::encode(&username.to_lowercase()).into_owned()
    }
}

impl GameRecordSource for ChessComClient {
    async fn fetch_games(&mut self, username: &str, limit: usize, days: u32) -> Result<Vec<Value>> {
        info!("Fetching up to {} games for {}", limit, username);

        let archives = self.fetch_archive_list(username).await?;
        debug!("{} monthly archives available", archives.len());

        let now = Utc::now();
        let cutoff = (days > 0).then(|| now - Duration::days(days as i64));
        let mut games = Vec::new();

        for url in archives.iter().rev() {
            if games.len() >= limit {
                break;
            }
            if let (Some(cutoff), Some((year, month))) = (cutoff, archive_month(url)) {
                if month_ends_before(year, month, cutoff) {
                    debug!("Archive {} predates the look-back window", url);
                    break;
                }
            }

            let month_games = match self.fetch_month(username, url, now).await {
                Ok(month_games) => month_games,
                Err(e) => {
                    warn!("Skipping archive {}: {:#}", url, e);
                    continue;
                }
            };

            games.extend(
                month_games
                    .into_iter()
                    .rev()
                    .filter(|g| cutoff.is_none_or(|c| end_time(g) >= c.timestamp())),
            );
        }

        games.truncate(limit);
        info!(
            "Fetched {} games for {} ({} requests)",
            games.len(),
            username,
            self.client.requests_sent()
        );
        Ok(games)
    }

    async fn fetch_rating(&mut self, username: &str) -> Result<RatingSnapshot> {
        let url = self.build_stats_url(username);
        let stats = self.client.get_json(&url).await?;

        let rating = rating_from_stats(&stats).with_context(|| parse_context("player stats rating"))?;
        Ok(RatingSnapshot { rating })
    }
}

/// Year and month from an archive URL ending in `/{yyyy}/{mm}`.
fn archive_month(url: &str) -> Option<(i32, u32)> {
    let mut segments = url.trim_end_matches('/').rsplit('/');
    let month = segments.next()?.parse().ok()?;
    let year = segments.next()?.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

/// Whether every game of `year`/`month` ended before `cutoff`.
fn month_ends_before(year: i32, month: u32, cutoff: DateTime<Utc>) -> bool {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|start| Utc.from_utc_datetime(&start) <= cutoff)
        .unwrap_or(false)
}

/// Last rating of the first category present: rapid, then blitz, then bullet.
fn rating_from_stats(stats: &Value) -> Option<i32> {
    let category = RATING_CATEGORIES.iter().find_map(|c| stats.get(*c))?;
    let rating = category.get("last")?.get("rating")?.as_i64()?;
    i32::try_from(rating).ok()
}
