pub mod content;
pub mod handler;
pub mod schema;

pub use content::{digest, visible_text};
pub use handler::{SummarizeLinksHandler, Summarizer, render_summary};
pub use schema::{TOOL_NAME, meta};
