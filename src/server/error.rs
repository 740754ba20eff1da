use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Content, ErrorCode};
use serde_json::json;

use crate::error::{FetchError, ToolError};
use crate::tools::ToolOutput;

/// What `fetch_llms_txt` answers when a manifest has no usable lines.
pub const NO_LINKS_PLACEHOLDER: &str = "No valid URLs found in llms.txt.";

pub fn tool_not_found(name: &str) -> ErrorData {
    ErrorData::new(
        ErrorCode::METHOD_NOT_FOUND,
        "Tool not found",
        Some(json!({ "name": name })),
    )
}

/// Decide how a failed tool call reaches the client. Argument problems are
/// protocol errors; fetch failures are tool results flagged `isError`, with
/// the kind and message in structured content. An empty manifest keeps the
/// historical single-entry placeholder. Server faults are internal errors.
pub fn render_tool_error(err: ToolError) -> Result<CallToolResult, ErrorData> {
    match err {
        ToolError::Fetch(FetchError::NoLinksFound { .. }) => {
            Ok(ToolOutput::List(vec![NO_LINKS_PLACEHOLDER.to_string()]).into_call_result())
        }
        ToolError::Fetch(err) => {
            let message = err.to_string();
            let mut result = CallToolResult::error(vec![Content::text(message.clone())]);
            result.structured_content = Some(json!({ "kind": err.kind(), "message": message }));
            Ok(result)
        }
        ToolError::InvalidArguments(msg) => Err(ErrorData::invalid_params(msg, None)),
        ToolError::Internal(msg) => Err(ErrorData::internal_error(msg, None)),
    }
}
