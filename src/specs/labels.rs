// src/specs/labels.rs
//! Label resolver: find the value a page shows next to a human-readable
//! label, without relying on tags, classes or key/value containers.
//!
//! Probes, first non-empty wins:
//! 1. anchor = first visible text node containing the label; take its
//!    parent element. No anchor, no value.
//! 2. text of the parent's next element sibling;
//! 3. parent text split on `|`, segment after the first label segment
//!    that has a successor;
//! 4. same split one level up (the grandparent).
//!
//! Probe order was tuned against the live site; if it starts returning
//! neighbouring fields, check here first.

use regex::{Regex, RegexBuilder};
use scraper::ElementRef;

use crate::config::consts::SEGMENT_DELIM;
use crate::core::html::{Document, element_text, next_element_sibling, parent_element};
use crate::core::sanitize::{normalize_ws, split_segments};
use crate::error::Result;

/// A label as it appears in visible text. Matched case-insensitively as a
/// literal substring (regex metacharacters in the text are escaped).
#[derive(Clone, Debug)]
pub struct Label {
    text: String,
    re: Regex,
}

impl Label {
    pub fn new(text: &str) -> Result<Self> {
        let re = RegexBuilder::new(&regex::escape(text))
            .case_insensitive(true)
            .build()?;
        Ok(Self { text: text.to_string(), re })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn matches(&self, s: &str) -> bool {
        self.re.is_match(s)
    }
}

/// Synonyms for one field, in priority order.
#[derive(Clone, Debug)]
pub struct LabelSet {
    labels: Vec<Label>,
}

impl LabelSet {
    pub fn new(texts: &[&str]) -> Result<Self> {
        let labels = texts.iter().map(|t| Label::new(t)).collect::<Result<Vec<_>>>()?;
        Ok(Self { labels })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Resolve one label. `None` is the only not-found signal; `Some` is never
/// empty.
pub fn resolve(doc: &Document, label: &Label) -> Option<String> {
    let parent = doc.first_text_parent(|t| label.matches(t))?;

    sibling_probe(parent)
        .or_else(|| split_probe(parent, label))
        .or_else(|| parent_element(parent).and_then(|grand| split_probe(grand, label)))
}

/// First synonym that resolves wins.
pub fn resolve_any(doc: &Document, labels: &LabelSet) -> Option<String> {
    labels.iter().find_map(|label| resolve(doc, label))
}

fn sibling_probe(el: ElementRef<'_>) -> Option<String> {
    let sib = next_element_sibling(el)?;
    non_empty(normalize_ws(&element_text(sib, " ")))
}

fn split_probe(el: ElementRef<'_>, label: &Label) -> Option<String> {
    let text = normalize_ws(&element_text(el, &SEGMENT_DELIM.to_string()));
    split_segments(&text, SEGMENT_DELIM)
        .windows(2)
        .find(|pair| label.matches(pair[0]))
        .map(|pair| pair[1].to_string())
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// Seam between the lot extractor and label resolution.
pub trait FieldResolver {
    fn resolve(&self, doc: &Document, labels: &LabelSet) -> Result<Option<String>>;
}

/// The layered resolver above. Never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct LabelResolver;

impl FieldResolver for LabelResolver {
    fn resolve(&self, doc: &Document, labels: &LabelSet) -> Result<Option<String>> {
        Ok(resolve_any(doc, labels))
    }
}
