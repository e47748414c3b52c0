pub mod spec;

use scraper::Html;
use tracing::warn;

use super::normalize::{normalize_duration, normalize_money, unescape_text};
use super::select::{compile, extract_all, extract_single, last, Node};
use crate::error::Result;
use crate::store::MovieRecord;
use spec::*;

/// Typed output of one [`FieldSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Minutes(u32),
    List(Vec<String>),
}

/// Run every detail-page field against `doc`.
///
/// A field that cannot be located keeps its default; only an invalid
/// selector aborts the record.
pub fn extract_record(url: &str, doc: &Html) -> Result<MovieRecord> {
    let mut record = MovieRecord {
        url: url.to_string(),
        ..Default::default()
    };
    for field in DETAIL_FIELDS {
        let value = apply(doc, field)?;
        if !assign(&mut record, field, value) {
            warn!(field = field.name, "no record slot for field");
        }
    }
    Ok(record)
}

/// Select the nodes `field` names and run its normalizer over them.
pub fn apply(doc: &Html, field: &FieldSpec) -> Result<FieldValue> {
    let nodes = select(doc, field)?;
    Ok(match field.arity {
        Arity::First | Arity::Last => {
            let raw = nodes.first().map(Node::text).unwrap_or_default();
            normalize_field(field, &raw)
        }
        Arity::All | Arity::Nested { .. } => FieldValue::List(
            nodes
                .iter()
                .map(|node| match normalize_field(field, &node.text()) {
                    FieldValue::Text(text) => text,
                    FieldValue::Minutes(minutes) => minutes.to_string(),
                    FieldValue::List(items) => items.join(", "),
                })
                .collect(),
        ),
    })
}

/// Apply the field's normalizer to one raw text.
///
/// An unparseable runtime is logged and becomes 0 minutes.
pub fn normalize_field(field: &FieldSpec, raw: &str) -> FieldValue {
    match field.normalizer {
        Normalizer::Text => FieldValue::Text(unescape_text(raw)),
        Normalizer::Money => FieldValue::Text(normalize_money(raw)),
        Normalizer::Duration => match normalize_duration(raw) {
            Ok(minutes) => FieldValue::Minutes(minutes),
            Err(e) => {
                warn!(field = field.name, raw, "{}, using 0", e);
                FieldValue::Minutes(0)
            }
        },
    }
}

/// Compile every selector once so a bad one fails before any fetch.
pub fn validate_selectors() -> Result<()> {
    compile(SEARCH_RESULT_LINK)?;
    for field in DETAIL_FIELDS {
        compile(field.selector)?;
        if let Arity::Nested { item } = field.arity {
            compile(item)?;
        }
    }
    Ok(())
}

fn select<'a>(doc: &'a Html, field: &FieldSpec) -> Result<Vec<Node<'a>>> {
    match field.arity {
        Arity::First => Ok(vec![extract_single(doc, field.selector)?]),
        Arity::Last => Ok(vec![last(&extract_all(doc, field.selector)?)]),
        Arity::All => extract_all(doc, field.selector),
        Arity::Nested { item } => extract_single(doc, field.selector)?.select_all(item),
    }
}

/// Store `value` in the record slot named by `field`. Returns false when
/// the name and value shape match no slot.
fn assign(record: &mut MovieRecord, field: &FieldSpec, value: FieldValue) -> bool {
    use FieldValue::*;

    match (field.name, value) {
        ("title", Text(v)) => record.title = v,
        ("year", Text(v)) => record.year = v,
        ("duration", Minutes(v)) => record.duration_minutes = v,
        ("ratingValue", Text(v)) => record.rating_value = v,
        ("description", Text(v)) => record.description = v,
        ("budget", Text(v)) => record.budget = v,
        ("gross", Text(v)) => record.gross = v,
        ("directors", List(v)) => record.directors = v,
        ("cast", List(v)) => record.cast = v,
        ("characters", List(v)) => record.characters = v,
        ("genres", List(v)) => record.genres = v,
        ("countries", List(v)) => record.countries = v,
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.imdb.com/title/tt0499549/?ref_=fn_al_tt_1";

    fn doc(fixture: &str) -> Html {
        let html = std::fs::read_to_string(format!("tests/fixtures/{}.html", fixture)).unwrap();
        Html::parse_document(&html)
    }

    fn record(fixture: &str) -> MovieRecord {
        extract_record(URL, &doc(fixture)).unwrap()
    }

    #[test]
    fn avatar_scalars() {
        let r = record("avatar");
        assert_eq!(r.url, URL);
        assert_eq!(r.title, "Avatar");
        assert_eq!(r.year, "2009");
        assert_eq!(r.duration_minutes, 162);
        assert_eq!(r.rating_value, "7.9");
        assert_eq!(r.budget, "237000000");
        assert_eq!(r.gross, "2923710708");
        assert!(r.description.starts_with("A paraplegic Marine"));
        assert!(r.description.ends_with("It's Jake's choice."));
    }

    #[test]
    fn avatar_lists() {
        let r = record("avatar");
        assert_eq!(r.directors, ["James Cameron"]);
        assert_eq!(r.cast, ["Sam Worthington", "Zoe Saldana", "Sigourney Weaver"]);
        assert_eq!(r.characters, ["Jake Sully", "Neytiri", "Dr. Grace Augustine"]);
        assert_eq!(r.genres, ["Action", "Adventure", "Fantasy"]);
        assert_eq!(r.countries, ["United States", "United Kingdom"]);
    }

    #[test]
    fn missing_budget_keeps_other_fields() {
        let r = record("avatar_no_budget");
        assert_eq!(r.budget, "");
        assert_eq!(r.gross, "2923710708");
        assert_eq!(r.title, "Avatar");
        assert_eq!(r.duration_minutes, 162);
        assert_eq!(r.cast.len(), 3);
        assert_eq!(r.countries.len(), 2);
    }

    #[test]
    fn runtime_is_last_fact_without_certificate() {
        let r = record("avatar_no_certificate");
        assert_eq!(r.year, "2009");
        assert_eq!(r.duration_minutes, 162);
    }

    #[test]
    fn empty_document_gives_defaults() {
        let r = extract_record(URL, &Html::parse_document("<html><body></body></html>")).unwrap();
        assert_eq!(
            r,
            MovieRecord {
                url: URL.to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn unparseable_runtime_degrades_to_zero() {
        let html = r#"
            <ul class="ipc-inline-list ipc-inline-list--show-dividers sc-d8941411-2 cdJsTz baseAlt">
                <li>2021</li><li>?h 10m</li>
            </ul>
            <span data-testid="hero__primary-text">Dune</span>
        "#;
        let r = extract_record(URL, &Html::parse_document(html)).unwrap();
        assert_eq!(r.duration_minutes, 0);
        assert_eq!(r.year, "2021");
        assert_eq!(r.title, "Dune");
    }

    #[test]
    fn cast_and_characters_are_not_realigned() {
        let html = r#"
            <a data-testid="title-cast-item__actor">Actor One</a>
            <a data-testid="cast-item-characters-link">Role One</a>
            <a data-testid="title-cast-item__actor">Actor Two</a>
        "#;
        let r = extract_record(URL, &Html::parse_document(html)).unwrap();
        assert_eq!(r.cast, ["Actor One", "Actor Two"]);
        assert_eq!(r.characters, ["Role One"]);
    }

    #[test]
    fn duration_field_yields_minutes() {
        assert_eq!(apply(&doc("avatar"), &DURATION).unwrap(), FieldValue::Minutes(162));
    }

    #[test]
    fn money_and_list_fields_are_normalized() {
        let avatar = doc("avatar");
        assert_eq!(
            apply(&avatar, &BUDGET).unwrap(),
            FieldValue::Text("237000000".to_string())
        );
        assert_eq!(
            apply(&avatar, &DIRECTORS).unwrap(),
            FieldValue::List(vec!["James Cameron".to_string()])
        );
    }

    #[test]
    fn every_normalizer_produces_a_value() {
        assert_eq!(normalize_field(&DURATION, "1h 5m"), FieldValue::Minutes(65));
        assert_eq!(normalize_field(&DURATION, "?h"), FieldValue::Minutes(0));
        assert_eq!(
            normalize_field(&GROSS, "$1,000"),
            FieldValue::Text("1000".to_string())
        );
        assert_eq!(
            normalize_field(&TITLE, "Schindler&#39;s List"),
            FieldValue::Text("Schindler's List".to_string())
        );
    }

    #[test]
    fn every_detail_field_has_a_record_slot() {
        let avatar = doc("avatar");
        let mut r = MovieRecord::default();
        for field in DETAIL_FIELDS {
            let value = apply(&avatar, field).unwrap();
            assert!(assign(&mut r, field, value), "{} was not stored", field.name);
        }
        assert_eq!(r.duration_minutes, 162);
        assert_eq!(r.countries, ["United States", "United Kingdom"]);
    }

    #[test]
    fn mismatched_value_is_not_stored() {
        let mut r = MovieRecord::default();
        assert!(!assign(&mut r, &DURATION, FieldValue::Text("162".to_string())));
        assert_eq!(r.duration_minutes, 0);
    }

    #[test]
    fn all_selectors_compile() {
        validate_selectors().unwrap();
    }
}
