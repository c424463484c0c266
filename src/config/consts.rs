// src/config/consts.rs

// Site
pub const BASE_URL: &str = "https://bankrotbaza.ru";
pub const LISTING_PATH: &str = "/c/квартиры";
pub const PAGE_PARAM: &str = "page";
pub const DETAIL_MARKER: &str = "/lot/";
pub const LINK_DENYLIST: &[&str] = &["login", "register", "map", "favorites", "/c/", "nedvizhimost"];
pub const DEFAULT_PAGES: u32 = 10;

// Session
pub const USER_AGENT: &str = concat!("lot_scrape/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_PROFILE_DIR: &str = ".profile";
pub const PROFILE_LOCK: &str = ".lock";
pub const PROFILE_COOKIES: &str = "cookies.txt";

// Waits (client-side rendering settles)
pub const LISTING_SETTLE_MS: u64 = 3_000;
pub const LOT_SETTLE_MS: u64 = 2_000;
pub const EMPTY_PRICE_PAUSE_MS: u64 = 1_500;

// Extraction
pub const SEGMENT_DELIM: char = '|';
pub const DESCRIPTION_SELECTOR: &str = ".lot-description, .lot-card__description";
pub const TITLE_SELECTOR: &str = "h1";
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const ELLIPSIS: &str = "...";
pub const DEFAULT_STATUS: &str = "Торги объявлены";
pub const DOC_EXTENSIONS: &[&str] = &[
    ".pdf", ".zip", ".rar", ".7z", ".doc", ".docx", ".xls", ".xlsx", ".rtf",
];

// Local state
pub const STORE_DIR: &str = ".store";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_REPORT_STEM: &str = "full_bankrot_report";
pub const REPORT_TIMESTAMP: &str = "%Y-%m-%d_%H-%M-%S";
