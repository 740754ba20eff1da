use std::sync::OnceLock;

use super::super::meta::{ToolInputSchema, ToolMeta};

pub const TOOL_NAME: &str = "summarize_links";

static META: OnceLock<ToolMeta> = OnceLock::new();

pub fn meta() -> ToolMeta {
    META.get_or_init(|| {
        let schema = ToolInputSchema::new(
            "object",
            serde_json::json!({
                "links": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "http(s) links, typically the output of fetch_llms_txt."
                }
            }),
            vec!["links".to_string()],
        );
        ToolMeta::new(
            TOOL_NAME,
            "Summarize Links",
            "Return a 300-character plain-text digest for each link. Links that cannot be \
             fetched map to a 'Failed: ...' message; the other links are still processed.",
            schema,
        )
    })
    .clone()
}
