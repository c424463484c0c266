// src/scrape/mod.rs
mod crawl;
pub use crawl::{CrawlResult, CrawlSummary, Crawler};
