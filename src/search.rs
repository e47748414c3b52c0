use reqwest::Url;
use scraper::Html;

use crate::config::Settings;
use crate::error::{Result, ScrapeError};
use crate::parser::extract::spec::SEARCH_RESULT_LINK;
use crate::parser::select::extract_single;

/// Feature-film title search for `title`.
pub fn search_url(settings: &Settings, title: &str) -> Result<Url> {
    Url::parse_with_params(
        &settings.search_url,
        &[("ref_", "nv_sr_fn"), ("q", title), ("s", "tt"), ("ttype", "ft")],
    )
    .map_err(|e| ScrapeError::transport(&settings.search_url, e))
}

/// Canonical detail URL of the first search result.
pub fn resolve_detail_url(settings: &Settings, title: &str, search_html: &str) -> Result<Url> {
    let doc = Html::parse_document(search_html);
    let link = extract_single(&doc, SEARCH_RESULT_LINK)?;
    if link.is_empty() {
        return Err(ScrapeError::NotFound(title.to_string()));
    }

    let href = link
        .attr("href")
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| ScrapeError::NotFound(title.to_string()))?;

    Url::parse(&settings.base_url)
        .and_then(|base| base.join(href))
        .map_err(|_| ScrapeError::NotFound(title.to_string()))
}
