use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::tools::{ToolHandler, ToolsMeta};

/// Tool table shared by every connection. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub tools_meta: ToolsMeta,
    pub handlers: HashMap<String, Arc<dyn ToolHandler>>,
    /// Serializes tool invocations across connections.
    pub concurrency: Arc<Semaphore>,
}

impl AppState {
    pub fn handler(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.handlers.get(name).cloned()
    }
}
