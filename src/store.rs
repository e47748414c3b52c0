use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One entry of the input title list. Extra keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TitleEntry {
    pub movie_name: String,
}

/// Scraped metadata for one title, written once and never updated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub url: String,
    pub title: String,
    pub year: String,
    pub duration_minutes: u32,
    pub rating_value: String,
    pub description: String,
    pub budget: String,
    pub gross: String,
    pub directors: Vec<String>,
    /// Parallel to `characters` by index; lengths may differ.
    pub cast: Vec<String>,
    pub characters: Vec<String>,
    pub genres: Vec<String>,
    pub countries: Vec<String>,
}

pub fn load_titles(path: &Path) -> Result<Vec<TitleEntry>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to read title list from {}", path.display()))
}

/// Path of the output file for the title at 1-based `ordinal`.
pub fn record_path(dir: &Path, ordinal: usize) -> PathBuf {
    dir.join(format!("{}.json", ordinal))
}

pub fn save_record(dir: &Path, ordinal: usize, record: &MovieRecord) -> Result<PathBuf> {
    let path = record_path(dir, ordinal);
    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, record)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(path)
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))
}
