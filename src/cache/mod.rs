use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Utc};
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::cache_context;

/// File-based store of raw monthly game archives.
///
/// A month's archive only stops changing once the month is over, so only
/// archives of earlier months are ever read back.
pub struct Cache {
    raw_dir: PathBuf,
}

impl Cache {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let raw_dir = cache_dir.as_ref().join("raw");

        fs::create_dir_all(&raw_dir).context("Failed to create raw cache directory")?;

        Ok(Self { raw_dir })
    }

    /// Whether the archive for `year`/`month` is complete as of `now`.
    pub fn is_cacheable(year: i32, month: u32, now: DateTime<Utc>) -> bool {
        (year, month) < (now.year(), now.month())
    }

    pub fn load_archive(&self, username: &str, year: i32, month: u32) -> Result<Option<Value>> {
        let key = Self::archive_key(username, year, month);
        let path = self.build_raw_path(&key);

        let data = self
            .read_json_opt(&path)
            .with_context(|| cache_context("load", &key))?;
        if data.is_some() {
            debug!("Loaded archive from cache: {}", path.display());
        }
        Ok(data)
    }

    pub fn save_archive(&self, username: &str, year: i32, month: u32, data: &Value) -> Result<()> {
        let key = Self::archive_key(username, year, month);
        let path = self.build_raw_path(&key);

        self.write_json(&path, data)
            .with_context(|| cache_context("save", &key))?;
        info!("Saved archive to cache: {}", path.display());
        Ok(())
    }

    // --- Helper Methods ---

    fn archive_key(username: &str, year: i32, month: u32) -> String {
        format!("{}_{:04}_{:02}", username.to_lowercase(), year, month)
    }

    fn build_raw_path(&self, key: &str) -> PathBuf {
        self.raw_dir.join(format!("{}.json", key))
    }

    fn write_json(&self, path: &Path, data: &Value) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(path, json).context("Failed to write cache file")?;
        Ok(())
    }

    fn read_json_opt(&self, path: &Path) -> Result<Option<Value>> {
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(path)?;
        let data = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                path,
                json.chars().take(200).collect::<String>()
            )
        })?;
        Ok(Some(data))
    }
}
