//! Manifest source resolution.
//!
//! A source is whatever the caller hands us: an `http(s)` URL, a `file://`
//! URI, a bare filesystem path or a bare hostname. Everything is normalized
//! into either a remote manifest URL or a local path before anything is read.
//!
//! Normalization rules:
//! - anything containing `://` that does not already end in `llms.txt` gets
//!   `/llms.txt` appended after trailing slashes are stripped;
//! - an existing filesystem path is read as-is;
//! - a bare host (`docs.example.com`, `localhost:8080/docs`) becomes
//!   `https://<host>/llms.txt`;
//! - anything else is treated as a path.

use reqwest::Client;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

use super::utils::fetch_text;
use crate::error::FetchError;

pub const MANIFEST_FILE: &str = "llms.txt";

const FILE_LIKE_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote(Url),
    Local(PathBuf),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Remote(url) => write!(f, "{url}"),
            Source::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Source {
    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(FetchError::unreadable_because(raw, "empty source"));
        }

        if raw.contains("://") {
            return Self::from_uri(&with_manifest_file(raw));
        }

        if Path::new(raw).exists() {
            return Ok(Source::Local(PathBuf::from(raw)));
        }

        if looks_like_host(raw) {
            let root = format!("https://{}", raw.trim_end_matches('/'));
            return Self::from_uri(&with_manifest_file(&root));
        }

        Ok(Source::Local(PathBuf::from(raw)))
    }

    /// Root given as a hostname, or as an `http://`/`https://` site root.
    pub fn from_hostname(hostname: &str) -> Result<Self, FetchError> {
        let hostname = hostname.trim();
        if hostname.is_empty() {
            return Err(FetchError::unreadable_because(hostname, "empty hostname"));
        }
        let url = if has_http_scheme(hostname) {
            format!("{}/{MANIFEST_FILE}", hostname.trim_end_matches('/'))
        } else {
            format!("https://{}/{MANIFEST_FILE}", hostname.trim_end_matches('/'))
        };
        match Self::from_uri(&url)? {
            remote @ Source::Remote(_) => Ok(remote),
            Source::Local(_) => Err(FetchError::unreadable_because(url, "not a remote location")),
        }
    }

    fn from_uri(uri: &str) -> Result<Self, FetchError> {
        let url = Url::parse(uri)
            .map_err(|e| FetchError::unreadable_because(uri, format!("invalid URL: {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(Source::Remote(url)),
            "file" => {
                let path = url.to_file_path().unwrap_or_else(|()| PathBuf::from(url.path()));
                Ok(Source::Local(path))
            }
            other => Err(FetchError::unreadable_because(
                uri,
                format!("scheme '{other}' is not supported"),
            )),
        }
    }

    pub async fn read(&self, client: &Client, max_response_size: usize) -> Result<String, FetchError> {
        match self {
            Source::Remote(url) => fetch_text(client, url.as_str(), max_response_size).await,
            Source::Local(path) => read_local(path).await,
        }
    }
}

fn has_http_scheme(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn with_manifest_file(uri: &str) -> String {
    if uri.ends_with(MANIFEST_FILE) {
        uri.to_string()
    } else {
        format!("{}/{MANIFEST_FILE}", uri.trim_end_matches('/'))
    }
}

fn looks_like_host(raw: &str) -> bool {
    if raw.contains('\\') || raw.starts_with('.') || raw.starts_with('/') {
        return false;
    }
    let authority = raw.split('/').next().unwrap_or_default();
    let host = match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) => host,
        Some(_) => return false,
        None => authority,
    };
    if host.is_empty()
        || !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    {
        return false;
    }
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    if !host.contains('.') || host.ends_with('.') {
        return false;
    }
    // `notes.txt` with no path is a missing file, not a host
    let is_single_segment = !raw.trim_end_matches('/').contains('/');
    let ext = host.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    !(is_single_segment && FILE_LIKE_EXTENSIONS.contains(&ext.as_str()))
}

async fn read_local(path: &Path) -> Result<String, FetchError> {
    let location = path.display().to_string();
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(FetchError::unreadable(location));
    }
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| FetchError::unreadable_because(location.clone(), e.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|e| FetchError::unreadable_because(location, format!("not valid UTF-8: {e}")))
}
