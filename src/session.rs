// src/session.rs
//! Browser-session seam and the persisted profile it runs under.
//!
//! The crawler only ever sees `BrowserSession`: navigate, snapshot the
//! markup, close. `Profile` is the explicit handle for persisted login
//! state; holding one locks its directory for the lifetime of the handle.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::config::consts::{PROFILE_COOKIES, PROFILE_LOCK};
use crate::core::html::Document;
use crate::core::sanitize::normalize_ws;
use crate::error::{Error, Result};

/// Blocking source of page snapshots.
pub trait BrowserSession {
    fn navigate(&mut self, url: &str) -> Result<()>;

    /// Markup of the page loaded by the last successful `navigate`.
    fn page_markup(&self) -> Result<String>;

    /// Release the session. Must be safe to call more than once.
    fn close(&mut self) -> Result<()>;

    /// Navigate, let the page settle, parse the snapshot.
    fn load(&mut self, url: &str, settle: Duration) -> Result<Document> {
        self.navigate(url)?;
        if !settle.is_zero() {
            thread::sleep(settle);
        }
        Ok(Document::parse(&self.page_markup()?))
    }
}

/// Closes the wrapped session when dropped, on every exit path
/// (early return, `?`, unwinding).
pub struct SessionGuard<'a, S: BrowserSession + ?Sized> {
    session: &'a mut S,
}

impl<'a, S: BrowserSession + ?Sized> SessionGuard<'a, S> {
    pub fn new(session: &'a mut S) -> Self {
        Self { session }
    }
}

impl<S: BrowserSession + ?Sized> Deref for SessionGuard<'_, S> {
    type Target = S;
    fn deref(&self) -> &S { self.session }
}

impl<S: BrowserSession + ?Sized> DerefMut for SessionGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S { self.session }
}

impl<S: BrowserSession + ?Sized> Drop for SessionGuard<'_, S> {
    fn drop(&mut self) {
        match self.session.close() {
            Ok(()) => logd!("Session: released"),
            Err(e) => logw!("Session: close failed: {e}"),
        }
    }
}

/// Shared "stop now" flag. Raised from a signal handler, checked by the
/// crawl between pages so cleanup runs on the normal return path.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the flag was already raised.
    pub fn raise(&self) -> bool {
        self.0.swap(true, Ordering::SeqCst)
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// `Err(Interrupted)` once raised.
    pub fn check(&self) -> Result<()> {
        if self.is_raised() { Err(Error::Interrupted) } else { Ok(()) }
    }
}

/// Persisted login state: a directory holding the saved `Cookie` header.
/// Exclusive while held (lock file created on acquire, removed on drop).
#[derive(Debug)]
pub struct Profile {
    dir: PathBuf,
    lock: PathBuf,
    cookie: Option<String>,
}

impl Profile {
    pub fn acquire(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let lock = dir.join(PROFILE_LOCK);
        match OpenOptions::new().write(true).create_new(true).open(&lock) {
            Ok(mut f) => {
                if let Err(e) = writeln!(f, "{}", std::process::id()) {
                    drop(f);
                    let _ = fs::remove_file(&lock);
                    return Err(e.into());
                }
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(Error::ProfileLocked { dir, lock });
            }
            Err(e) => return Err(e.into()),
        }

        // From here on Drop owns the lock.
        let mut profile = Self { dir, lock, cookie: None };
        profile.cookie = profile.read_cookie()?;
        logd!("Profile: acquired {}", profile.dir.display());
        Ok(profile)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    /// Persist a `Cookie` header copied from a signed-in browser.
    /// Blank input is ignored and returns `false`.
    pub fn save_cookie(&mut self, raw: &str) -> Result<bool> {
        let cookie = normalize_ws(raw);
        if cookie.is_empty() {
            return Ok(false);
        }
        fs::write(self.dir.join(PROFILE_COOKIES), &cookie)?;
        self.cookie = Some(cookie);
        Ok(true)
    }

    fn read_cookie(&self) -> Result<Option<String>> {
        match fs::read_to_string(self.dir.join(PROFILE_COOKIES)) {
            Ok(text) => Ok(Some(normalize_ws(&text)).filter(|c| !c.is_empty())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for Profile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.lock) {
            logw!("Profile: could not release {}: {e}", self.lock.display());
        }
    }
}
