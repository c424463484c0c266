// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub crawl: CrawlOptions,
    pub export: ExportOptions,
    /// Persisted login state (cookie header + run lock).
    pub profile_dir: PathBuf,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            crawl: CrawlOptions::default(),
            export: ExportOptions::default(),
            profile_dir: PathBuf::from(DEFAULT_PROFILE_DIR),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrawlOptions {
    pub base_url: String,
    pub listing_path: String,
    /// Listing pages 1..=pages are scanned for lot links.
    pub pages: u32,
    pub listing_settle: Duration,
    pub lot_settle: Duration,
    /// Extra pause after a lot whose start price did not resolve.
    pub empty_price_pause: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            listing_path: s!(LISTING_PATH),
            pages: DEFAULT_PAGES,
            listing_settle: Duration::from_millis(LISTING_SETTLE_MS),
            lot_settle: Duration::from_millis(LOT_SETTLE_MS),
            empty_price_pause: Duration::from_millis(EMPTY_PRICE_PAUSE_MS),
        }
    }
}

impl CrawlOptions {
    /// Same crawl, no settle or mitigation pauses.
    pub fn without_waits(mut self) -> Self {
        self.listing_settle = Duration::ZERO;
        self.lot_settle = Duration::ZERO;
        self.empty_price_pause = Duration::ZERO;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_dir: PathBuf,
    /// File name without timestamp or extension.
    pub file_stem: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: s!(DEFAULT_REPORT_STEM),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_waits_zeroes_every_pause() {
        let o = CrawlOptions::default().without_waits();
        assert_eq!(o.listing_settle, Duration::ZERO);
        assert_eq!(o.lot_settle, Duration::ZERO);
        assert_eq!(o.empty_price_pause, Duration::ZERO);
        assert_eq!(o.pages, DEFAULT_PAGES);
    }

    #[test]
    fn format_drives_extension_and_separator() {
        assert_eq!(ExportFormat::Csv.ext(), "csv");
        assert_eq!(ExportFormat::Tsv.delim(), '\t');
    }
}
