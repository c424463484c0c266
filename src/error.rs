// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {url} failed: {source}")]
    Navigate {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    #[error("saved cookie is not a valid header value")]
    Cookie,

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("invalid URL `{url}`: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid selector `{0}`")]
    Selector(String),

    #[error("invalid label pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("no page loaded; navigate first")]
    NoPage,

    #[error("browser session is closed")]
    SessionClosed,

    #[error("interrupted")]
    Interrupted,

    #[error("profile {} is in use by another run (remove {} if stale)", .dir.display(), .lock.display())]
    ProfileLocked { dir: PathBuf, lock: PathBuf },

    #[error("extraction failed for {url}: {reason}")]
    Extract { url: String, reason: String },
}

impl Error {
    /// Session-level failures and interrupts end the run; everything else
    /// costs one page.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::SessionClosed | Error::Interrupted | Error::ProfileLocked { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_session_failures_are_fatal() {
        assert!(Error::SessionClosed.is_fatal());
        assert!(Error::Interrupted.is_fatal());
        assert!(Error::ProfileLocked { dir: "p".into(), lock: "p/.lock".into() }.is_fatal());
        assert!(!Error::NoPage.is_fatal());
        assert!(!Error::Status { url: "u".into(), status: 503 }.is_fatal());
        assert!(!Error::Extract { url: "u".into(), reason: "r".into() }.is_fatal());
    }
}
