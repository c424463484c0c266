// src/log.rs
use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[doc(hidden)]
pub use tracing as __tracing;

pub const LOG_FILE: &str = "debug.log";

static INIT: OnceLock<()> = OnceLock::new();

/// Install the global subscriber: compact lines on stderr plus a plain
/// `<dir>/debug.log`. Level comes from `RUST_LOG`, default `info`.
/// Calling it again is a no-op.
pub fn init(dir: &Path) -> crate::error::Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }
    std::fs::create_dir_all(dir)?;

    let appender = Builder::new()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)
        .map_err(std::io::Error::other)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);
    let file_layer = fmt::layer().with_ansi(false).with_writer(appender);

    // Another subscriber may already be installed by an embedder; keep theirs.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    let _ = INIT.set(());
    Ok(())
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::__tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::__tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        $crate::log::__tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::__tracing::error!($($arg)*)
    };
}
