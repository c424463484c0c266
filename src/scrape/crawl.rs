// src/scrape/crawl.rs
//! Crawl orchestrator: listing → lot pages → report.
//!
//! Strictly sequential. Each lot is isolated: an error (or a panic inside
//! extraction) costs that lot only. Fatal session errors and interrupts
//! stop the run, after the lots collected so far are reported.
//! The session is closed on every exit path.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use crate::config::options::CrawlOptions;
use crate::error::{Error, Result};
use crate::progress::{NullProgress, Progress};
use crate::report::ReportWriter;
use crate::session::{BrowserSession, SessionGuard, StopFlag};
use crate::specs::fields::LotRecord;
use crate::specs::labels::{FieldResolver, LabelResolver};
use crate::specs::listing::collect_links;
use crate::specs::lot::LotExtractor;

/// Records of one run, in link-discovery order. Append-only.
#[derive(Debug, Default)]
pub struct CrawlResult {
    records: Vec<LotRecord>,
}

impl CrawlResult {
    fn push(&mut self, record: LotRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[LotRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Unique lot links discovered.
    pub links: usize,
    pub records: usize,
    pub failed: usize,
    /// `None` when nothing was collected.
    pub report: Option<PathBuf>,
}

pub struct Crawler<S, W, R = LabelResolver> {
    session: S,
    extractor: LotExtractor<R>,
    report: W,
    opts: CrawlOptions,
    stop: StopFlag,
}

impl<S, W, R> Crawler<S, W, R>
where
    S: BrowserSession,
    W: ReportWriter,
    R: FieldResolver,
{
    pub fn new(session: S, extractor: LotExtractor<R>, report: W, opts: CrawlOptions) -> Self {
        Self { session, extractor, report, opts, stop: StopFlag::new() }
    }

    /// Check `stop` between pages; raising it ends the run cleanly.
    pub fn with_stop(mut self, stop: StopFlag) -> Self {
        self.stop = stop;
        self
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn report_writer(&self) -> &W {
        &self.report
    }

    /// Crawl listing pages, then every lot. A `Crawler` runs once: the
    /// session is closed when `run` returns, so a second call fails with
    /// `SessionClosed`.
    ///
    /// On a fatal error or interrupt the lots collected so far are still
    /// handed to the report writer, then the error is returned.
    pub fn run(&mut self, progress: Option<&mut dyn Progress>) -> Result<CrawlSummary> {
        let mut null = NullProgress;
        let progress: &mut dyn Progress = match progress {
            Some(p) => p,
            None => &mut null,
        };

        let mut session = SessionGuard::new(&mut self.session);

        let links = match collect_links(&mut *session, &self.opts, &self.stop) {
            Ok(links) => links,
            Err(e) => {
                loge!("Link collection stopped: {e}");
                progress.finish();
                return Err(e);
            }
        };
        let total = links.len();
        logf!("Total lots found: {total}");
        progress.begin(total);

        let mut result = CrawlResult::default();
        let mut failed = 0usize;
        let mut abort: Option<Error> = None;

        for (i, link) in links.iter().enumerate() {
            let index = i + 1;
            if let Err(e) = self.stop.check() {
                logw!("Interrupted after {} of {total} lots", index - 1);
                abort = Some(e);
                break;
            }
            logf!("Processing: {link}");

            match scrape_lot(&mut *session, &self.extractor, link, self.opts.lot_settle) {
                Ok(record) => {
                    let no_price = record.start_price.is_none();
                    result.push(record);
                    logf!("[{index}/{total}] OK");
                    progress.item_done(index, link);

                    if no_price {
                        pause_after_empty_price(link, self.opts.empty_price_pause);
                    }
                }
                Err(e) if e.is_fatal() => {
                    loge!("Session failed at {link}: {e}");
                    abort = Some(e);
                    break;
                }
                Err(e) => {
                    failed += 1;
                    loge!("Lot {link} failed: {e}");
                    progress.item_failed(index, link, &e.to_string());
                }
            }
        }
        progress.finish();

        let report = if result.is_empty() {
            logf!("No lots collected; no report written");
            None
        } else {
            match self.report.write(result.records()) {
                Ok(path) => {
                    logf!("Report written: {} ({} lots)", path.display(), result.len());
                    progress.log(&format!("Report: {}", path.display()));
                    Some(path)
                }
                // Keep the error that stopped the run.
                Err(e) if abort.is_some() => {
                    loge!("Report not written: {e}");
                    None
                }
                Err(e) => return Err(e),
            }
        };

        if let Some(e) = abort {
            return Err(e);
        }
        Ok(CrawlSummary { links: total, records: result.len(), failed, report })
    }
}

fn scrape_lot<S, R>(
    session: &mut S,
    extractor: &LotExtractor<R>,
    url: &str,
    settle: Duration,
) -> Result<LotRecord>
where
    S: BrowserSession + ?Sized,
    R: FieldResolver,
{
    let doc = session.load(url, settle)?;
    catch_unwind(AssertUnwindSafe(|| extractor.extract(&doc, url))).map_err(|payload| {
        Error::Extract { url: url.to_string(), reason: panic_message(payload.as_ref()) }
    })
}

fn pause_after_empty_price(url: &str, pause: Duration) {
    if pause.is_zero() {
        return;
    }
    logd!("{url}: no start price; pausing {pause:?} before the next lot");
    thread::sleep(pause);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| s!("panic during extraction"))
}
