// src/specs/lot.rs
//! Lot page extractor: one detail-page snapshot in, one `LotRecord` out.
//!
//! Every field is independent. A field that cannot be resolved, or whose
//! resolver fails, is left empty and logged; the record is still built.

use std::collections::BTreeSet;

use scraper::Selector;

use crate::config::consts::{
    DEFAULT_STATUS, DESCRIPTION_MAX_CHARS, DESCRIPTION_SELECTOR, DOC_EXTENSIONS, ELLIPSIS,
    TITLE_SELECTOR,
};
use crate::core::html::{Document, element_text, parse_selector};
use crate::core::net::{abs_url, lot_id_from_url, parse_url};
use crate::core::sanitize::{normalize_ws, truncate_chars};
use crate::error::Result;
use crate::specs::fields::{Field, FieldLabels, LotRecord};
use crate::specs::labels::{FieldResolver, LabelResolver, LabelSet};

/// Minimum digit run accepted as an on-page lot number.
const LOT_NUMBER_MIN_DIGITS: usize = 3;

pub struct LotExtractor<R = LabelResolver> {
    labels: FieldLabels,
    resolver: R,
    title: Selector,
    description: Selector,
}

impl LotExtractor<LabelResolver> {
    /// Standard labels, layered label resolver.
    pub fn new() -> Result<Self> {
        Self::with_resolver(FieldLabels::standard()?, LabelResolver)
    }
}

impl<R: FieldResolver> LotExtractor<R> {
    pub fn with_resolver(labels: FieldLabels, resolver: R) -> Result<Self> {
        Ok(Self {
            labels,
            resolver,
            title: parse_selector(TITLE_SELECTOR)?,
            description: parse_selector(DESCRIPTION_SELECTOR)?,
        })
    }

    pub fn extract(&self, doc: &Document, url: &str) -> LotRecord {
        let labels = &self.labels;
        let field = |f: Field, set: &LabelSet| self.field(doc, url, f, set);

        // URL id is the stable fallback; a real on-page number overrides it.
        let lot_number = field(Field::LotNumber, &labels.lot_number)
            .and_then(|v| digit_run(&v, LOT_NUMBER_MIN_DIGITS))
            .or_else(|| lot_id_from_url(url));

        let title = self.block_text(doc, &self.title);
        let description = self
            .block_text(doc, &self.description)
            .or_else(|| title.clone())
            .map(|d| truncate_chars(&d, DESCRIPTION_MAX_CHARS, ELLIPSIS));

        let debtor = debtor_info(
            field(Field::Debtor, &labels.debtor_name),
            field(Field::Debtor, &labels.debtor_inn),
        );

        let record = LotRecord {
            lot_number,
            title,
            address: field(Field::Address, &labels.address),
            start_price: field(Field::StartPrice, &labels.start_price),
            bid_step: field(Field::BidStep, &labels.bid_step),
            deposit: field(Field::Deposit, &labels.deposit),
            applications_from: field(Field::ApplicationsFrom, &labels.applications_from),
            applications_to: field(Field::ApplicationsTo, &labels.applications_to),
            status: field(Field::Status, &labels.status).or_else(|| Some(s!(DEFAULT_STATUS))),
            debtor,
            documents: document_links(doc, url),
            description,
            url: s!(url),
        };

        logf!("  -> lot_number = {}", record.lot_number.as_deref().unwrap_or("(empty)"));
        record
    }

    fn field(&self, doc: &Document, url: &str, f: Field, set: &LabelSet) -> Option<String> {
        match self.resolver.resolve(doc, set) {
            Ok(v) => v.map(|s| normalize_ws(&s)).filter(|s| !s.is_empty()),
            Err(e) => {
                logw!("{url}: {} left empty: {e}", f.header());
                None
            }
        }
    }

    fn block_text(&self, doc: &Document, sel: &Selector) -> Option<String> {
        doc.select_first(sel)
            .map(|el| normalize_ws(&element_text(el, " ")))
            .filter(|t| !t.is_empty())
    }
}

/// First run of at least `min` ASCII digits.
pub fn digit_run(s: &str, min: usize) -> Option<String> {
    s.split(|c: char| !c.is_ascii_digit())
        .find(|run| run.len() >= min)
        .map(str::to_string)
}

/// `"name (ИНН: inn)"`, either part alone, or nothing.
pub fn debtor_info(name: Option<String>, inn: Option<String>) -> Option<String> {
    match (name, inn) {
        (Some(name), Some(inn)) => Some(format!("{name} (ИНН: {inn})")),
        (Some(name), None) => Some(name),
        (None, Some(inn)) => Some(format!("ИНН: {inn}")),
        (None, None) => None,
    }
}

/// Absolute URLs of linked documents (path ends in a known extension),
/// sorted, deduplicated, newline-joined.
pub fn document_links(doc: &Document, page_url: &str) -> Option<String> {
    let base = parse_url(page_url).ok();

    let links: BTreeSet<String> = doc
        .hrefs()
        .filter_map(|href| match &base {
            Some(base) => abs_url(base, href),
            None => url::Url::parse(href).ok(),
        })
        .filter(|u| {
            let path = u.path().to_ascii_lowercase();
            DOC_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
        })
        .map(String::from)
        .collect();

    if links.is_empty() {
        None
    } else {
        Some(links.into_iter().collect::<Vec<_>>().join("\n"))
    }
}
