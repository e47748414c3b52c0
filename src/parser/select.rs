use scraper::{ElementRef, Html, Selector};

use super::normalize::clean_text;
use crate::error::{Result, ScrapeError};

/// A selector match, or the empty sentinel returned when nothing matched.
///
/// The sentinel behaves like an element with no text and no attributes,
/// so callers can read optional fields without branching on absence.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Element(ElementRef<'a>),
    Empty,
}

impl<'a> Node<'a> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    /// Descendant text with whitespace collapsed. Empty for the sentinel.
    pub fn text(&self) -> String {
        match self {
            Node::Element(el) => clean_text(&el.text().collect::<String>()),
            Node::Empty => String::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        match self {
            Node::Element(el) => el.value().attr(name),
            Node::Empty => None,
        }
    }

    /// Every match of `path` below this node, in document order.
    pub fn select_all(&self, path: &str) -> Result<Vec<Node<'a>>> {
        let selector = compile(path)?;
        Ok(match self {
            Node::Element(el) => el.select(&selector).map(Node::Element).collect(),
            Node::Empty => Vec::new(),
        })
    }
}

pub fn compile(path: &str) -> Result<Selector> {
    Selector::parse(path).map_err(|e| ScrapeError::Selector {
        selector: path.to_string(),
        message: e.to_string(),
    })
}

/// First match of `path`, or [`Node::Empty`] when nothing matches.
pub fn extract_single<'a>(doc: &'a Html, path: &str) -> Result<Node<'a>> {
    let selector = compile(path)?;
    Ok(doc
        .select(&selector)
        .next()
        .map(Node::Element)
        .unwrap_or(Node::Empty))
}

/// All matches of `path` in document order; empty when nothing matches.
pub fn extract_all<'a>(doc: &'a Html, path: &str) -> Result<Vec<Node<'a>>> {
    let selector = compile(path)?;
    Ok(doc.select(&selector).map(Node::Element).collect())
}

/// Final element of a match list, or the sentinel for an empty list.
pub fn last<'a>(nodes: &[Node<'a>]) -> Node<'a> {
    nodes.last().copied().unwrap_or(Node::Empty)
}
