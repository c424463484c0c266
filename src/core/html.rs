// src/core/html.rs
//! Parsed page snapshot and the handful of tree queries the extractors need.
//!
//! Text queries only see *visible* text: contents of `script`, `style`,
//! `noscript` and `template` are skipped everywhere.

use scraper::{ElementRef, Html, Node, Selector};

use crate::error::{Error, Result};

const INVISIBLE: &[&str] = &["script", "style", "noscript", "template"];

/// One page's markup, parsed once, read many times.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(markup: &str) -> Self {
        Self { html: Html::parse_document(markup) }
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Element owning the first visible text node (document order) that
    /// satisfies `pred`.
    pub fn first_text_parent<F>(&self, pred: F) -> Option<ElementRef<'_>>
    where
        F: Fn(&str) -> bool,
    {
        self.html
            .tree
            .root()
            .descendants()
            .find(|node| match node.value() {
                Node::Text(t) => pred(&**t) && !node.ancestors().any(|a| is_invisible(a.value())),
                _ => false,
            })
            .and_then(|node| node.parent())
            .and_then(ElementRef::wrap)
    }

    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    /// `href` of every `<a>` in document order (empty values skipped).
    pub fn hrefs(&self) -> impl Iterator<Item = &str> {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(|node| match node.value() {
                Node::Element(e) if e.name() == "a" => e.attr("href"),
                _ => None,
            })
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }
}

pub fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| Error::Selector(css.to_string()))
}

/// Visible text under `el`: each text node trimmed, empties dropped,
/// joined with `sep`.
pub fn element_text(el: ElementRef<'_>, sep: &str) -> String {
    let mut parts = Vec::new();
    collect_text(el, &mut parts);
    parts.join(sep)
}

/// Next sibling that is an element (text and comments skipped).
pub fn next_element_sibling(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

pub fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

fn collect_text<'a>(el: ElementRef<'a>, out: &mut Vec<&'a str>) {
    for child in el.children() {
        match child.value() {
            Node::Text(t) => {
                let s = t.trim();
                if !s.is_empty() { out.push(s); }
            }
            node if is_invisible(node) => {}
            Node::Element(_) => {
                if let Some(inner) = ElementRef::wrap(child) {
                    collect_text(inner, out);
                }
            }
            _ => {}
        }
    }
}

fn is_invisible(node: &Node) -> bool {
    matches!(node, Node::Element(e) if INVISIBLE.contains(&e.name()))
}
