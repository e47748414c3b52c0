use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, ScrapeError};

static DURATION_NOISE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[\s"]"#).unwrap());
static NON_DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9]").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const APOSTROPHE_ENTITIES: &[&str] = &["&#x27;", "&#39;", "&apos;"];

/// Convert a runtime label such as `2h 15m` into minutes.
///
/// A missing `h` or `m` marker counts as zero for that component. Only a
/// marker with a non-numeric value in front of it is an error.
pub fn normalize_duration(raw: &str) -> Result<u32> {
    let duration = DURATION_NOISE_RE.replace_all(raw, "");
    let hour_mark = duration.find('h');

    let hours = match hour_mark {
        Some(h) => parse_component("hours", &duration[..h], raw)?,
        None => 0,
    };

    let minutes = match duration.find('m') {
        Some(m) => {
            let start = hour_mark.map_or(0, |h| h + 1);
            let token = duration.get(start..m).ok_or_else(|| ScrapeError::Format {
                component: "minutes",
                raw: raw.to_string(),
            })?;
            parse_component("minutes", token, raw)?
        }
        None => 0,
    };

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(|| ScrapeError::Format {
            component: "duration",
            raw: raw.to_string(),
        })
}

fn parse_component(component: &'static str, token: &str, raw: &str) -> Result<u32> {
    token.parse::<u32>().map_err(|_| ScrapeError::Format {
        component,
        raw: raw.to_string(),
    })
}

/// Keep only the decimal digits of a money amount (`$1,234` -> `1234`).
pub fn normalize_money(raw: &str) -> String {
    NON_DIGIT_RE.replace_all(raw, "").into_owned()
}

/// Turn escaped apostrophes back into `'`. Other entities pass through.
pub fn unescape_text(raw: &str) -> String {
    APOSTROPHE_ENTITIES
        .iter()
        .fold(raw.to_string(), |text, entity| text.replace(entity, "'"))
}

/// Collapse whitespace runs (including a literal `&nbsp;`) to single spaces.
pub fn clean_text(text: &str) -> String {
    let text = text.replace("&nbsp;", " ");
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}
