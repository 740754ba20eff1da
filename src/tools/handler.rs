use async_trait::async_trait;
use indexmap::IndexMap;
use rmcp::model::{CallToolResult, Content};
use serde_json::{Value, json};
use std::collections::HashMap;

use crate::error::ToolResult;

/// Successful payload of a tool call, before it is put on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    List(Vec<String>),
    Map(IndexMap<String, String>),
}

impl ToolOutput {
    pub fn to_value(&self) -> Value {
        match self {
            Self::List(items) => json!(items),
            Self::Map(map) => json!(map),
        }
    }

    /// Lists go out as one text item per entry, maps as a single JSON text.
    /// Structured content must be an object, so lists are wrapped in `result`.
    pub fn into_call_result(self) -> CallToolResult {
        let structured = match &self {
            Self::List(_) => json!({ "result": self.to_value() }),
            Self::Map(_) => self.to_value(),
        };
        let content = match self {
            Self::List(items) => items.into_iter().map(Content::text).collect(),
            Self::Map(_) => vec![Content::text(structured.to_string())],
        };
        let mut result = CallToolResult::success(content);
        result.structured_content = Some(structured);
        result
    }
}

#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, arguments: HashMap<String, Value>) -> ToolResult<ToolOutput>;
}
