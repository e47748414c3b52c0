use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const CONFIG_NAME: &str = "imdb_scraper";
const ENV_PREFIX: &str = "IMDB";

/// What the batch does when one title cannot be scraped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the run with the failing title's error.
    Halt,
    /// Log the failure, write nothing for that title, keep going.
    Skip,
}

impl FailurePolicy {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Halt => "halt",
            Self::Skip => "skip",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Site root that result hrefs are resolved against.
    pub base_url: String,
    /// Find endpoint; query parameters are appended per title.
    pub search_url: String,
    pub user_agent: String,
    pub accept_language: String,
    pub timeout_secs: u64,
    pub concurrency: usize,
    pub on_error: FailurePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://www.imdb.com".to_string(),
            search_url: "https://www.imdb.com/find/".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            accept_language: "en".to_string(),
            timeout_secs: 30,
            concurrency: 1,
            on_error: FailurePolicy::Halt,
        }
    }
}

impl Settings {
    /// Defaults, then `imdb_scraper.toml` (or `file`), then `IMDB_*` env vars.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();
        let builder = Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("search_url", defaults.search_url)?
            .set_default("user_agent", defaults.user_agent)?
            .set_default("accept_language", defaults.accept_language)?
            .set_default("timeout_secs", defaults.timeout_secs as i64)?
            .set_default("concurrency", defaults.concurrency as i64)?
            .set_default("on_error", defaults.on_error.as_str())?;

        let builder = match file {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name(CONFIG_NAME).required(false)),
        };

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        anyhow::ensure!(settings.concurrency > 0, "concurrency must be at least 1");
        Ok(settings)
    }

    /// Command-line flags, the last layer over [`Settings::load`].
    pub fn apply_cli(
        &mut self,
        concurrency: Option<usize>,
        on_error: Option<FailurePolicy>,
    ) -> Result<()> {
        if let Some(concurrency) = concurrency {
            anyhow::ensure!(concurrency > 0, "--concurrency must be at least 1");
            self.concurrency = concurrency;
        }
        if let Some(policy) = on_error {
            self.on_error = policy;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
