use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, ToolsCapability,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::error::{render_tool_error, tool_not_found};
use super::state::AppState;
use crate::error::ToolError;

pub const SERVER_NAME: &str = "LLMS_Txt_Parser";

pub const INSTRUCTIONS: &str = "Documentation workflow:\n\
1. list_llms_sources: choose a source\n\
2. fetch_llms_txt: get the links listed in its llms.txt\n\
3. summarize_links: quick digest of each link";

/// MCP front of the tool table. Cheap to clone; one per connection.
#[derive(Clone)]
pub struct LlmsTxtServer {
    state: Arc<AppState>,
}

impl LlmsTxtServer {
    pub fn new(state: AppState) -> Self {
        Self { state: Arc::new(state) }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn tools_list(&self) -> ListToolsResult {
        ListToolsResult::with_all_items(self.state.tools_meta.to_tools())
    }

    /// Run one tool by name. Invocations queue on the shared semaphore.
    pub async fn tools_call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ErrorData> {
        let Some(handler) = self.state.handler(name) else {
            tracing::warn!(tool = name, "call to unknown tool");
            return Err(tool_not_found(name));
        };
        let arg_map: HashMap<String, Value> = arguments.unwrap_or_default().into_iter().collect();

        let _permit = match self.state.concurrency.acquire().await {
            Ok(permit) => permit,
            Err(err) => {
                tracing::error!(tool = name, error = %err, "tool call slot unavailable");
                return render_tool_error(ToolError::Internal(format!(
                    "tool calls are not being accepted: {err}"
                )));
            }
        };

        tracing::debug!(tool = name, "tool call");
        match handler.call(arg_map).await {
            Ok(output) => Ok(output.into_call_result()),
            Err(err) => {
                tracing::warn!(tool = name, error = %err, "tool call failed");
                render_tool_error(err)
            }
        }
    }
}

impl ServerHandler for LlmsTxtServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: Some(false) }),
                ..Default::default()
            },
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(self.tools_list())
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.tools_call(&request.name, request.arguments).await
    }
}
