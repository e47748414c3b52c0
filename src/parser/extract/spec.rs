/// How many nodes a field reads from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    First,
    /// Final match. Used where optional entries are injected ahead of the
    /// one we want, e.g. a rating classification before the runtime.
    Last,
    All,
    /// First container match, then every `item` inside it.
    Nested { item: &'static str },
}

/// Post-processing applied to each extracted text. Every string field is
/// at least unescaped, so there is no pass-through variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    Duration,
    Money,
    Text,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub selector: &'static str,
    pub arity: Arity,
    pub normalizer: Normalizer,
}

const fn field(
    name: &'static str,
    selector: &'static str,
    arity: Arity,
    normalizer: Normalizer,
) -> FieldSpec {
    FieldSpec {
        name,
        selector,
        arity,
        normalizer,
    }
}

pub const SEARCH_RESULT_LINK: &str = r#"ul a[class="ipc-metadata-list-summary-item__t"]"#;

const FACTS_LIST: &str =
    r#"ul[class="ipc-inline-list ipc-inline-list--show-dividers sc-d8941411-2 cdJsTz baseAlt"] > li"#;

pub const TITLE: FieldSpec = field(
    "title",
    r#"span[data-testid="hero__primary-text"]"#,
    Arity::First,
    Normalizer::Text,
);
pub const YEAR: FieldSpec = field("year", FACTS_LIST, Arity::First, Normalizer::Text);
pub const DURATION: FieldSpec = field("duration", FACTS_LIST, Arity::Last, Normalizer::Duration);
pub const RATING: FieldSpec = field(
    "ratingValue",
    r#"div[data-testid="hero-rating-bar__aggregate-rating__score"] > span"#,
    Arity::First,
    Normalizer::Text,
);
pub const DESCRIPTION: FieldSpec = field(
    "description",
    r#"span[data-testid="plot-xl"]"#,
    Arity::First,
    Normalizer::Text,
);
pub const BUDGET: FieldSpec = field(
    "budget",
    r#"li[data-testid="title-boxoffice-budget"] > div span"#,
    Arity::First,
    Normalizer::Money,
);
pub const GROSS: FieldSpec = field(
    "gross",
    r#"li[data-testid="title-boxoffice-cumulativeworldwidegross"] span[class="ipc-metadata-list-item__list-content-item"]"#,
    Arity::First,
    Normalizer::Money,
);
pub const DIRECTORS: FieldSpec = field(
    "directors",
    r#"section li[data-testid="title-pc-principal-credit"] ul"#,
    Arity::Nested { item: "li" },
    Normalizer::Text,
);
pub const CAST: FieldSpec = field(
    "cast",
    r#"a[data-testid="title-cast-item__actor"]"#,
    Arity::All,
    Normalizer::Text,
);
pub const CHARACTERS: FieldSpec = field(
    "characters",
    r#"a[data-testid="cast-item-characters-link"]"#,
    Arity::All,
    Normalizer::Text,
);
pub const GENRES: FieldSpec = field(
    "genres",
    r#"div[data-testid="genres"] span"#,
    Arity::All,
    Normalizer::Text,
);
pub const COUNTRIES: FieldSpec = field(
    "countries",
    r#"li[data-testid="title-details-origin"] ul > li"#,
    Arity::All,
    Normalizer::Text,
);

pub const DETAIL_FIELDS: &[FieldSpec] = &[
    TITLE,
    YEAR,
    DURATION,
    RATING,
    DESCRIPTION,
    BUDGET,
    GROSS,
    DIRECTORS,
    CAST,
    CHARACTERS,
    GENRES,
    COUNTRIES,
];
