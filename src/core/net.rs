// src/core/net.rs
// URL helpers and the blocking HTTP implementation of `BrowserSession`.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use url::Url;

use crate::config::consts::{DETAIL_MARKER, PAGE_PARAM, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};
use crate::session::{BrowserSession, Profile};

pub fn parse_url(s: &str) -> Result<Url> {
    Url::parse(s).map_err(|source| Error::Url { url: s.to_string(), source })
}

/// Resolve `href` against the page it was found on.
/// Returns `None` for hrefs that cannot form a URL.
pub fn abs_url(base: &Url, href: &str) -> Option<Url> {
    base.join(href.trim()).ok()
}

/// `<base><path>?page=<n>`
pub fn listing_url(base: &str, path: &str, page: u32) -> Result<Url> {
    let mut url = parse_url(base)?
        .join(path)
        .map_err(|source| Error::Url { url: path.to_string(), source })?;
    url.query_pairs_mut().append_pair(PAGE_PARAM, &page.to_string());
    Ok(url)
}

/// `.../lot/123456` → `"123456"`; `None` when the URL carries no id.
pub fn lot_id_from_url(url: &str) -> Option<String> {
    let at = url.find(DETAIL_MARKER)? + DETAIL_MARKER.len();
    let id: String = url[at..].chars().take_while(char::is_ascii_digit).collect();
    if id.is_empty() { None } else { Some(id) }
}

struct Loaded {
    url: String,
    body: String,
}

/// Plain HTTP stand-in for a browser: one GET per navigation, cookies
/// kept for the session, saved profile cookie sent on every request.
/// Renders no JavaScript. Holds the profile (and its lock) until closed.
pub struct HttpSession {
    client: Option<Client>,
    profile: Option<Profile>,
    current: Option<Loaded>,
}

impl HttpSession {
    pub fn open(profile: Profile) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = profile.cookie() {
            let value = HeaderValue::from_str(cookie).map_err(|_| Error::Cookie)?;
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(Error::Client)?;

        logd!(profile = %profile.dir().display(), cookie = profile.cookie().is_some(), "HTTP session opened");
        Ok(Self { client: Some(client), profile: Some(profile), current: None })
    }

    /// `None` once closed.
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Final URL of the last successful navigation (after redirects).
    pub fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|p| p.url.as_str())
    }
}

impl BrowserSession for HttpSession {
    fn navigate(&mut self, url: &str) -> Result<()> {
        let client = self.client.as_ref().ok_or(Error::SessionClosed)?;
        self.current = None;

        let resp = client
            .get(url)
            .send()
            .map_err(|source| Error::Navigate { url: url.to_string(), source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status { url: url.to_string(), status: status.as_u16() });
        }

        let final_url = resp.url().to_string();
        let body = resp
            .text()
            .map_err(|source| Error::Navigate { url: url.to_string(), source })?;

        if final_url != url {
            logd!("{url} redirected to {final_url}");
        }
        logd!("GET {url} → {} ({} bytes)", status.as_u16(), body.len());
        self.current = Some(Loaded { url: final_url, body });
        Ok(())
    }

    fn page_markup(&self) -> Result<String> {
        if self.client.is_none() {
            return Err(Error::SessionClosed);
        }
        self.current
            .as_ref()
            .map(|p| p.body.clone())
            .ok_or(Error::NoPage)
    }

    fn close(&mut self) -> Result<()> {
        self.current = None;
        if self.client.take().is_some() {
            logd!("HTTP session closed");
        }
        // Releases the profile lock.
        self.profile = None;
        Ok(())
    }
}
