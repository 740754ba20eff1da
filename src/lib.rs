pub mod config;
pub mod environment;
pub mod error;
pub mod server;
pub mod tools;

pub use config::Config;
pub use error::{FetchError, FetchErrorKind, ToolError, ToolResult};
pub use server::{LlmsTxtServer, build_server};
pub use tools::{
    FetchByHostnameHandler, FetchLinksHandler, LinkFetcher, LinkFilter, ListSourcesHandler, Source,
    SummarizeLinksHandler, Summarizer, ToolHandler, ToolMeta, ToolOutput, ToolsMeta,
};
