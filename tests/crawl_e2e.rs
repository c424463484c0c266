// tests/crawl_e2e.rs
use std::collections::HashMap;
use std::fs;

use lot_scrape::config::options::{CrawlOptions, ExportFormat, ExportOptions};
use lot_scrape::error::{Error, Result};
use lot_scrape::file::DelimitedReport;
use lot_scrape::scrape::Crawler;
use lot_scrape::session::BrowserSession;
use lot_scrape::specs::lot::LotExtractor;

const BASE: &str = "https://bankrotbaza.ru";

/// Serves canned pages by URL; anything unknown is a 404.
#[derive(Default)]
struct CannedSite {
    pages: HashMap<String, String>,
    current: Option<String>,
    closed: bool,
}

impl CannedSite {
    fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }
}

impl BrowserSession for CannedSite {
    fn navigate(&mut self, url: &str) -> Result<()> {
        if self.closed {
            return Err(Error::SessionClosed);
        }
        match self.pages.get(url) {
            Some(body) => {
                self.current = Some(body.clone());
                Ok(())
            }
            None => {
                self.current = None;
                Err(Error::Status { url: url.to_string(), status: 404 })
            }
        }
    }

    fn page_markup(&self) -> Result<String> {
        self.current.clone().ok_or(Error::NoPage)
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

fn lot(price: &str, extra: &str) -> String {
    format!(
        r#"<html><body><h1>Квартира</h1>
        <div class="lot-description">Однокомнатная | этаж 3</div>
        <ul><li>Адрес | г. Казань, ул. Баумана, 5</li></ul>
        <div><span>Начальная цена</span><span>{price}</span></div>
        {extra}
        </body></html>"#
    )
}

#[test]
fn crawl_writes_one_row_per_reachable_lot() {
    let site = CannedSite::default()
        .page(
            &format!("{BASE}/c/flats?page=1"),
            r#"<a href="/lot/111">a</a><a href="/lot/222">b</a><a href="/login">in</a>"#,
        )
        .page(
            &format!("{BASE}/c/flats?page=2"),
            r#"<a href="/lot/222">b</a><a href="https://bankrotbaza.ru/lot/333">c</a>"#,
        )
        .page(
            &format!("{BASE}/lot/111"),
            &lot("500 000 ₽", r#"<a href="/files/111.pdf">pdf</a>"#),
        )
        .page(&format!("{BASE}/lot/333"), &lot("750 000 ₽", ""));
    // /lot/222 is missing from the site: it fails with a 404 and is skipped.

    let dir = tempfile::tempdir().unwrap();
    let export = ExportOptions {
        format: ExportFormat::Csv,
        out_dir: dir.path().to_path_buf(),
        file_stem: "lots".into(),
    };
    let opts = CrawlOptions {
        base_url: BASE.into(),
        listing_path: "/c/flats".into(),
        pages: 3,
        ..CrawlOptions::default()
    }
    .without_waits();

    let mut crawler =
        Crawler::new(site, LotExtractor::new().unwrap(), DelimitedReport::new(export), opts);
    let summary = crawler.run(None).unwrap();

    assert_eq!(summary.links, 3);
    assert_eq!(summary.records, 2);
    assert_eq!(summary.failed, 1);
    assert!(crawler.session().closed);

    let path = summary.report.unwrap();
    assert!(path.starts_with(dir.path()));
    let text = fs::read_to_string(&path).unwrap();
    let rows: Vec<&str> = text.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);

    assert!(rows[0].starts_with("111,Квартира,\"г. Казань, ул. Баумана, 5\",500 000 ₽,"));
    assert!(rows[0].contains(",Торги объявлены,"));
    assert!(rows[0].contains(",https://bankrotbaza.ru/files/111.pdf,"));
    assert!(rows[0].ends_with(",https://bankrotbaza.ru/lot/111"));

    assert!(rows[1].starts_with("333,Квартира,"));
    assert!(rows[1].ends_with(",https://bankrotbaza.ru/lot/333"));
}

#[test]
fn crawl_without_lots_leaves_no_file() {
    let site = CannedSite::default().page(&format!("{BASE}/c/flats?page=1"), "<p>Нет лотов</p>");

    let dir = tempfile::tempdir().unwrap();
    let export = ExportOptions { out_dir: dir.path().join("out"), ..ExportOptions::default() };
    let opts = CrawlOptions {
        base_url: BASE.into(),
        listing_path: "/c/flats".into(),
        pages: 1,
        ..CrawlOptions::default()
    }
    .without_waits();

    let mut crawler =
        Crawler::new(site, LotExtractor::new().unwrap(), DelimitedReport::new(export), opts);
    let summary = crawler.run(None).unwrap();

    assert_eq!(summary.records, 0);
    assert_eq!(summary.report, None);
    assert!(!dir.path().join("out").exists());
    assert!(crawler.session().closed);
}
