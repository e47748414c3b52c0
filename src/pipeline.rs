use tracing::debug;

use crate::config::Settings;
use crate::error::Result;
use crate::fetcher::Fetch;
use crate::parser;
use crate::search;
use crate::store::MovieRecord;

/// Search for `title`, follow the first result and extract its record.
///
/// Transport, not-found and selector failures end the title; missing
/// fields never do. Parsed trees are dropped before each `.await`.
pub async fn scrape_title(
    fetcher: &dyn Fetch,
    settings: &Settings,
    title: &str,
) -> Result<MovieRecord> {
    let query = search::search_url(settings, title)?;
    debug!(title, url = %query, "search");
    let results = fetcher.fetch(query.as_str()).await?;

    let detail_url = search::resolve_detail_url(settings, title, &results)?;
    debug!(title, url = %detail_url, "resolve");
    let page = fetcher.fetch(detail_url.as_str()).await?;

    debug!(title, "extract");
    let record = parser::process_detail_page(detail_url.as_str(), &page)?;

    debug!(title, "assemble");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use crate::fetcher::testing::StaticFetcher;

    const AVATAR_SEARCH: &str =
        "https://www.imdb.com/find/?ref_=nv_sr_fn&q=Avatar&s=tt&ttype=ft";
    const AVATAR_DETAIL: &str = "https://www.imdb.com/title/tt0499549/?ref_=fn_al_tt_1";

    #[tokio::test]
    async fn search_then_detail() {
        let fetcher = StaticFetcher::default()
            .with_fixture(AVATAR_SEARCH, "search_avatar")
            .with_fixture(AVATAR_DETAIL, "avatar");

        let record = scrape_title(&fetcher, &Settings::default(), "Avatar")
            .await
            .unwrap();

        assert_eq!(record.url, AVATAR_DETAIL);
        assert_eq!(record.title, "Avatar");
        assert_eq!(record.duration_minutes, 162);
        assert_eq!(fetcher.requests(), [AVATAR_SEARCH, AVATAR_DETAIL]);
    }

    #[tokio::test]
    async fn missing_budget_is_not_fatal() {
        let fetcher = StaticFetcher::default()
            .with_fixture(AVATAR_SEARCH, "search_avatar")
            .with_fixture(AVATAR_DETAIL, "avatar_no_budget");

        let record = scrape_title(&fetcher, &Settings::default(), "Avatar")
            .await
            .unwrap();

        assert_eq!(record.budget, "");
        assert_eq!(record.gross, "2923710708");
        assert_eq!(record.rating_value, "7.9");
        assert_eq!(record.genres.len(), 3);
    }

    #[tokio::test]
    async fn empty_search_is_not_found() {
        let fetcher = StaticFetcher::default().with_fixture(AVATAR_SEARCH, "search_empty");

        let err = scrape_title(&fetcher, &Settings::default(), "Avatar")
            .await
            .unwrap_err();

        assert!(matches!(err, ScrapeError::NotFound(_)));
        assert_eq!(fetcher.requests(), [AVATAR_SEARCH]);
    }

    #[tokio::test]
    async fn unreachable_detail_is_transport_error() {
        let fetcher = StaticFetcher::default().with_fixture(AVATAR_SEARCH, "search_avatar");

        let err = scrape_title(&fetcher, &Settings::default(), "Avatar")
            .await
            .unwrap_err();

        assert!(matches!(err, ScrapeError::Transport { url, .. } if url == AVATAR_DETAIL));
    }
}
