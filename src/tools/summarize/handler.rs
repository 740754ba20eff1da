use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use url::Url;

use super::super::handler::{ToolHandler, ToolOutput};
use super::super::utils::{fetch_with_headers, required_str_list_arg, truncate_chars};
use super::content::digest;
use crate::config::{FetchConfig, SummaryConfig};
use crate::error::{FetchError, ToolResult};

pub type SummaryMap = IndexMap<String, Result<String, FetchError>>;

#[derive(Debug, Clone)]
pub struct Summarizer {
    pub client: Client,
    pub max_response_size: usize,
    pub max_chars: usize,
}

impl Summarizer {
    pub fn new(client: Client, fetch: &FetchConfig, summary: &SummaryConfig) -> Self {
        Self {
            client,
            max_response_size: fetch.max_response_size,
            max_chars: summary.max_chars,
        }
    }

    /// Digest every distinct link, one at a time, in first-appearance order.
    /// A failing link only affects its own entry.
    pub async fn summarize(&self, links: &[String]) -> SummaryMap {
        let mut summaries = SummaryMap::with_capacity(links.len());
        for link in links {
            if summaries.contains_key(link) {
                continue;
            }
            let outcome = self.summarize_one(link).await;
            if let Err(err) = &outcome {
                tracing::warn!(url = %link, error = %err, "failed to summarize link");
            }
            summaries.insert(link.clone(), outcome);
        }
        summaries
    }

    pub async fn summarize_one(&self, link: &str) -> Result<String, FetchError> {
        let url = Url::parse(link.trim())
            .map_err(|e| FetchError::unreadable_because(link, format!("invalid URL: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::unreadable_because(
                link,
                format!("only http/https links can be summarized, got '{}'", url.scheme()),
            ));
        }
        let resp = fetch_with_headers(&self.client, url.as_str(), self.max_response_size).await?;
        if let Some(ct) = resp.content_type.as_deref().filter(|ct| !is_textual(ct)) {
            return Err(FetchError::parse(link, format!("not an HTML or text document ({ct})")));
        }
        Ok(digest(&resp.body, self.max_chars))
    }
}

/// Missing content types are given the benefit of the doubt.
fn is_textual(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime.is_empty()
        || mime.starts_with("text/")
        || mime.ends_with("+xml")
        || mime.ends_with("/xml")
        || mime == "application/json"
}

/// Flatten outcomes into the wire shape: digests as-is, failures as
/// `Failed: <reason>`. Both share the same length bound.
pub fn render_summary(summaries: SummaryMap, max_chars: usize) -> IndexMap<String, String> {
    summaries
        .into_iter()
        .map(|(link, outcome)| {
            let text = match outcome {
                Ok(digest) => digest,
                Err(err) => truncate_chars(&format!("Failed: {err}"), max_chars),
            };
            (link, text)
        })
        .collect()
}

pub struct SummarizeLinksHandler {
    pub summarizer: Summarizer,
}

#[async_trait]
impl ToolHandler for SummarizeLinksHandler {
    async fn call(&self, arguments: HashMap<String, Value>) -> ToolResult<ToolOutput> {
        let links = required_str_list_arg(&arguments, "links")?;
        let summaries = self.summarizer.summarize(&links).await;
        let failed = summaries.values().filter(|o| o.is_err()).count();
        tracing::info!(links = summaries.len(), failed, "summarized links");
        Ok(ToolOutput::Map(render_summary(summaries, self.summarizer.max_chars)))
    }
}
