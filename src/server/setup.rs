use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::config::Config;
use crate::tools::list_sources::LEGACY_TOOL_NAME;
use crate::tools::{
    FetchByHostnameHandler, FetchLinksHandler, LinkFetcher, ListSourcesHandler,
    SummarizeLinksHandler, Summarizer, ToolHandler, ToolMeta, ToolsMeta, fetch_by_hostname_meta,
    fetch_links_meta, list_sources_meta, summarize_meta,
};

use super::state::AppState;

/// Every tool the server can expose, in listing order.
fn tool_table(client: &Client, config: &Config) -> Vec<(ToolMeta, Arc<dyn ToolHandler>)> {
    let list_sources: Arc<dyn ToolHandler> =
        Arc::new(ListSourcesHandler::from_config(&config.sources));
    let fetcher = LinkFetcher::new(client.clone(), &config.fetch);
    let summarizer = Summarizer::new(client.clone(), &config.fetch, &config.summary);

    let list_meta = list_sources_meta();
    let legacy_list_meta = list_meta.renamed(LEGACY_TOOL_NAME);

    vec![
        (list_meta, list_sources.clone()),
        (legacy_list_meta, list_sources),
        (
            fetch_links_meta(),
            Arc::new(FetchLinksHandler { fetcher: fetcher.clone() }) as Arc<dyn ToolHandler>,
        ),
        (
            fetch_by_hostname_meta(),
            Arc::new(FetchByHostnameHandler { fetcher }) as Arc<dyn ToolHandler>,
        ),
        (
            summarize_meta(),
            Arc::new(SummarizeLinksHandler { summarizer }) as Arc<dyn ToolHandler>,
        ),
    ]
}

pub fn build_state(client: &Client, config: &Config) -> AppState {
    let mut metas = Vec::new();
    let mut handlers: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();

    for (meta, handler) in tool_table(client, config) {
        if !config.is_enabled(&meta.name) {
            tracing::info!(tool = %meta.name, "tool disabled by config");
            continue;
        }
        handlers.insert(meta.name.clone(), handler);
        metas.push(meta);
    }

    let tools_meta = ToolsMeta(metas);
    tracing::debug!(tools = ?tools_meta.names().collect::<Vec<_>>(), "tool table ready");

    AppState {
        tools_meta,
        handlers,
        concurrency: Arc::new(Semaphore::new(config.server.max_concurrent_calls.max(1))),
    }
}
