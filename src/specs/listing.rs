// src/specs/listing.rs
//! Link collector: walk listing pages 1..=N and gather lot detail URLs.

use std::collections::HashSet;

use url::Url;

use crate::config::consts::{DETAIL_MARKER, LINK_DENYLIST};
use crate::config::options::CrawlOptions;
use crate::core::html::Document;
use crate::core::net::{abs_url, listing_url};
use crate::error::Result;
use crate::session::{BrowserSession, StopFlag};

/// Discovery-ordered URLs, unique by exact string.
#[derive(Clone, Debug, Default)]
pub struct LinkSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unless already present. Returns whether it was new.
    pub fn push(&mut self, url: String) -> bool {
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.order.push(url);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

/// Raw href points at a lot page and not at a denylisted section.
pub fn is_detail_href(href: &str) -> bool {
    href.contains(DETAIL_MARKER) && !LINK_DENYLIST.iter().any(|deny| href.contains(deny))
}

/// Add the detail links of one listing page. Returns how many were new.
pub fn collect_detail_links(doc: &Document, page_url: &Url, links: &mut LinkSet) -> usize {
    let mut added = 0;
    for url in doc
        .hrefs()
        .filter(|href| is_detail_href(href))
        .filter_map(|href| abs_url(page_url, href))
    {
        if links.push(url.into()) {
            added += 1;
        }
    }
    added
}

/// Paginate the listing through `session`. A page that fails to load is
/// logged and skipped; fatal session errors and a raised `stop` end the walk.
pub fn collect_links<S>(session: &mut S, opts: &CrawlOptions, stop: &StopFlag) -> Result<LinkSet>
where
    S: BrowserSession + ?Sized,
{
    let mut links = LinkSet::new();

    for page in 1..=opts.pages {
        stop.check()?;
        let url = listing_url(&opts.base_url, &opts.listing_path, page)?;
        logf!("--- Listing page {page} ---");

        let doc = match session.load(url.as_str(), opts.listing_settle) {
            Ok(doc) => doc,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                loge!("Listing page {page} skipped: {e}");
                continue;
            }
        };

        let added = collect_detail_links(&doc, &url, &mut links);
        logf!("Listing page {page}: {added} new links, {} total", links.len());
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::net::parse_url;

    fn page_url() -> Url {
        parse_url("https://bankrotbaza.ru/c/flats?page=1").unwrap()
    }

    #[test]
    fn link_set_dedups_and_keeps_order() {
        let mut s = LinkSet::new();
        assert!(s.push(s!("b")));
        assert!(s.push(s!("a")));
        assert!(!s.push(s!("b")));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec!["b", "a"]);
        assert!(s.contains("a"));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn denylist_and_marker() {
        assert!(is_detail_href("/lot/1"));
        assert!(!is_detail_href("/c/flats"));
        assert!(!is_detail_href("/lot/1/map"));
        assert!(!is_detail_href("/login?next=/lot/1"));
        assert!(!is_detail_href("/nedvizhimost/lot/5"));
        assert!(!is_detail_href("/user/favorites/lot/7"));
    }

    #[test]
    fn collects_absolute_unique_links() {
        let doc = Document::parse(
            r#"<a href="/lot/1">1</a><a href="https://bankrotbaza.ru/lot/2">2</a>
               <a href="/lot/1">again</a><a href="/about">x</a><a href="/register">r</a>"#,
        );
        let mut links = LinkSet::new();
        assert_eq!(collect_detail_links(&doc, &page_url(), &mut links), 2);
        assert_eq!(
            links.into_vec(),
            vec!["https://bankrotbaza.ru/lot/1", "https://bankrotbaza.ru/lot/2"]
        );
    }

    #[test]
    fn same_link_on_two_pages_is_kept_once() {
        let p1 = Document::parse(r#"<a href="/lot/1">1</a><a href="/lot/2">2</a>"#);
        let p2 = Document::parse(r#"<a href="/lot/2">2</a><a href="/lot/3">3</a>"#);
        let mut links = LinkSet::new();
        collect_detail_links(&p1, &page_url(), &mut links);
        assert_eq!(collect_detail_links(&p2, &page_url(), &mut links), 1);
        assert_eq!(links.len(), 3);
    }

    struct Unreachable {
        navigations: usize,
    }

    impl BrowserSession for Unreachable {
        fn navigate(&mut self, _url: &str) -> Result<()> {
            self.navigations += 1;
            Ok(())
        }
        fn page_markup(&self) -> Result<String> {
            Ok(s!())
        }
        fn close(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn raised_stop_ends_pagination_before_any_request() {
        let stop = StopFlag::new();
        stop.raise();
        let mut session = Unreachable { navigations: 0 };
        let opts = CrawlOptions::default().without_waits();

        let res = collect_links(&mut session, &opts, &stop);
        assert!(matches!(res, Err(crate::error::Error::Interrupted)));
        assert_eq!(session.navigations, 0);
    }
}
