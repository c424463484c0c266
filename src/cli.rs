// src/cli.rs
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, bail};

use crate::config::consts::STORE_DIR;
use crate::config::options::{AppOptions, ExportFormat};
use crate::core::net::HttpSession;
use crate::file::DelimitedReport;
use crate::progress::Progress;
use crate::scrape::Crawler;
use crate::session::{Profile, StopFlag};
use crate::specs::lot::LotExtractor;

#[derive(Parser)]
#[command(name = "lot_scrape")]
#[command(about = "Collect bankruptcy-auction lots into a CSV/TSV report")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan listing pages, visit every lot, write the report
    Crawl(CrawlArgs),

    /// Save a Cookie header from a signed-in browser into the profile
    Login {
        #[arg(long, default_value = crate::config::consts::DEFAULT_PROFILE_DIR)]
        profile: PathBuf,
    },
}

#[derive(Args)]
struct CrawlArgs {
    /// Listing pages to scan, starting at 1
    #[arg(long)]
    pages: Option<u32>,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Output directory
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Report file name, before the timestamp
    #[arg(long)]
    stem: Option<String>,

    #[arg(long)]
    profile: Option<PathBuf>,

    #[arg(long)]
    base_url: Option<String>,

    /// Listing path under the base URL
    #[arg(long)]
    listing: Option<String>,

    /// Skip settle and empty-price pauses
    #[arg(long)]
    no_wait: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Tsv,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Csv => ExportFormat::Csv,
            Format::Tsv => ExportFormat::Tsv,
        }
    }
}

impl CrawlArgs {
    fn into_options(self) -> AppOptions {
        let mut opts = AppOptions::default();
        if let Some(p) = self.pages { opts.crawl.pages = p; }
        if let Some(u) = self.base_url { opts.crawl.base_url = u; }
        if let Some(l) = self.listing { opts.crawl.listing_path = l; }
        if self.no_wait { opts.crawl = opts.crawl.without_waits(); }

        opts.export.format = self.format.into();
        if let Some(o) = self.out { opts.export.out_dir = o; }
        if let Some(s) = self.stem { opts.export.file_stem = s; }
        if let Some(p) = self.profile { opts.profile_dir = p; }
        opts
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::log::init(Path::new(STORE_DIR))?;

    match cli.command {
        Command::Crawl(args) => crawl(args.into_options()),
        Command::Login { profile } => login(profile),
    }
}

fn crawl(opts: AppOptions) -> Result<()> {
    if opts.crawl.pages == 0 {
        bail!("--pages must be at least 1");
    }

    let profile = Profile::acquire(&opts.profile_dir)?;
    if profile.cookie().is_none() {
        logw!("Profile {} has no saved cookie; run `login` first if the site needs it", profile.dir().display());
    }

    let stop = StopFlag::new();
    install_interrupt_handler(stop.clone());

    let session = HttpSession::open(profile)?;
    let extractor = LotExtractor::new()?;
    let report = DelimitedReport::new(opts.export.clone());
    let mut crawler = Crawler::new(session, extractor, report, opts.crawl).with_stop(stop);

    let mut progress = ConsoleProgress::default();
    let summary = crawler.run(Some(&mut progress))?;

    println!(
        "Lots: {} found, {} collected, {} failed",
        summary.links, summary.records, summary.failed
    );
    match summary.report {
        Some(path) => println!("Wrote {}", path.display()),
        None => println!("No lots collected; nothing written"),
    }
    Ok(())
}

/// First Ctrl-C asks the crawl to stop after the current page, so the
/// session and profile lock are released. A second one exits at once.
fn install_interrupt_handler(stop: StopFlag) {
    let installed = ctrlc::set_handler(move || {
        if stop.raise() {
            std::process::exit(130);
        }
        eprintln!("Interrupted; stopping after the current page (Ctrl-C again to force)");
    });
    if let Err(e) = installed {
        logw!("Ctrl-C handler not installed: {e}");
    }
}

fn login(dir: PathBuf) -> Result<()> {
    login_from(&dir, io::stdin().lock())
}

/// The profile is locked only while saving, never while waiting on input.
fn login_from(dir: &Path, mut input: impl BufRead) -> Result<()> {
    // Fail early if a crawl holds the profile.
    drop(Profile::acquire(dir)?);

    println!("Sign in to the site in your browser, then copy the request `Cookie` header.");
    print!("Cookie: ");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let mut profile = Profile::acquire(dir)?;
    if profile.save_cookie(&line)? {
        println!("Saved to {}", profile.dir().display());
    } else {
        println!("Nothing entered; profile unchanged");
    }
    Ok(())
}

#[derive(Default)]
struct ConsoleProgress {
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        println!("Lots to visit: {total}");
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, index: usize, url: &str) {
        println!("[{index}/{}] OK {url}", self.total);
    }

    fn item_failed(&mut self, index: usize, url: &str, err: &str) {
        println!("[{index}/{}] FAILED {url}: {err}", self.total);
    }
}
