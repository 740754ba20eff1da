use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::FetchConfig;
use crate::error::{FetchError, ToolError, ToolResult};

pub fn required_str_arg(arguments: &HashMap<String, Value>, key: &str) -> ToolResult<String> {
    arguments
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| ToolError::InvalidArguments(format!("Missing '{key}' parameter")))
}

pub fn required_str_list_arg(
    arguments: &HashMap<String, Value>,
    key: &str,
) -> ToolResult<Vec<String>> {
    let items = arguments
        .get(key)
        .and_then(|v| v.as_array())
        .ok_or_else(|| ToolError::InvalidArguments(format!("Missing '{key}' parameter")))?;
    items
        .iter()
        .map(|v| {
            v.as_str().map(|s| s.to_string()).ok_or_else(|| {
                ToolError::InvalidArguments(format!("'{key}' must be an array of strings"))
            })
        })
        .collect()
}

pub fn build_client(cfg: &FetchConfig) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .user_agent(cfg.user_agent.clone())
        .build()
}

#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub body: String,
    pub content_type: Option<String>,
}

/// GET `url`, failing on non-success status or when the body exceeds
/// `max_response_size` bytes.
pub async fn fetch_with_headers(
    client: &Client,
    url: &str,
    max_response_size: usize,
) -> Result<FetchedResponse, FetchError> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url, &e))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::network(url, format!("HTTP status {status}")));
    }

    if let Some(len) = resp.content_length() {
        if len as usize > max_response_size {
            return Err(FetchError::network(
                url,
                format!("response too large: {len} bytes (max {max_response_size})"),
            ));
        }
    }

    let ct = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let mut total: usize = 0;
    let mut out = Vec::with_capacity(64 * 1024);
    let mut stream = resp.bytes_stream();
    while let Some(chunk_res) = stream.next().await {
        let chunk = chunk_res.map_err(|e| FetchError::from_reqwest(url, &e))?;
        total = total.saturating_add(chunk.len());
        if total > max_response_size {
            return Err(FetchError::network(
                url,
                format!("response exceeded limit ({max_response_size} bytes)"),
            ));
        }
        out.extend_from_slice(&chunk);
    }

    let body = decode_body(&out, ct.as_deref());
    Ok(FetchedResponse { body, content_type: ct })
}

pub async fn fetch_text(
    client: &Client,
    url: &str,
    max_response_size: usize,
) -> Result<String, FetchError> {
    fetch_with_headers(client, url, max_response_size)
        .await
        .map(|r| r.body)
}

/// Decode HTTP response body using charset from Content-Type if available;
/// otherwise use chardetng to guess.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    if let Some(enc) = content_type
        .and_then(parse_charset)
        .and_then(|cs| Encoding::for_label(cs.as_bytes()))
    {
        let (cow, _, _) = enc.decode(bytes);
        return cow.into_owned();
    }
    if std::str::from_utf8(bytes).is_ok() {
        return String::from_utf8_lossy(bytes).into_owned();
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    let (cow, _, _) = enc.decode(bytes);
    cow.into_owned()
}

fn parse_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_ascii_lowercase();
    let pos = lower.find("charset=")?;
    let after = &content_type[pos + 8..];
    let end = after.find(';').unwrap_or(after.len());
    let val = after[..end].trim().trim_matches('"').trim().to_string();
    if val.is_empty() { None } else { Some(val) }
}

/// First `max_chars` characters of `s`. Counts chars, not bytes, and may cut
/// a word in half.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
