pub mod extract;
pub mod normalize;
pub mod select;

use scraper::Html;

use crate::error::Result;
use crate::store::MovieRecord;

/// Parse a detail page and extract its record. The tree never outlives
/// this call.
pub fn process_detail_page(url: &str, html: &str) -> Result<MovieRecord> {
    let doc = Html::parse_document(html);
    extract::extract_record(url, &doc)
}
