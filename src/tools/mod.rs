pub mod fetch_links;
pub mod handler;
pub mod list_sources;
pub mod meta;
pub mod source;
pub mod summarize;
pub mod utils;

pub use fetch_links::{
    FetchByHostnameHandler, FetchLinksHandler, LinkFetcher, LinkFilter, extract_links,
};
pub use handler::{ToolHandler, ToolOutput};
pub use list_sources::{ListSourcesHandler, list_sources};
pub use meta::{ToolInputSchema, ToolMeta, ToolsMeta};
pub use source::Source;
pub use summarize::{SummarizeLinksHandler, Summarizer};

pub use fetch_links::hostname_meta as fetch_by_hostname_meta;
pub use fetch_links::meta as fetch_links_meta;
pub use list_sources::meta as list_sources_meta;
pub use summarize::meta as summarize_meta;
