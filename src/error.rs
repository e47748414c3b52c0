use thiserror::Error;

/// Failures that can end a single title's scrape.
///
/// "Field not found" is deliberately absent: a missing field is an empty
/// value, never an error.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to fetch {url}: {message}")]
    Transport { url: String, message: String },
    #[error("no detail page found for {0:?}")]
    NotFound(String),
    #[error("invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },
    #[error("unparseable {component} in {raw:?}")]
    Format { component: &'static str, raw: String },
}

impl ScrapeError {
    pub fn transport(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;
