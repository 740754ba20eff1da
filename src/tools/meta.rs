use rmcp::model::{JsonObject, Tool};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInputSchema {
    #[serde(rename = "type")]
    pub type_: String,
    pub properties: Value,
    pub required: Vec<String>,
}

impl ToolInputSchema {
    pub fn new(type_: impl Into<String>, properties: Value, required: Vec<String>) -> Self {
        Self { type_: type_.into(), properties, required }
    }

    /// Schema for a tool that takes no arguments.
    pub fn empty() -> Self {
        Self::new("object", serde_json::json!({}), Vec::new())
    }

    fn to_json_object(&self) -> JsonObject {
        let mut obj = JsonObject::new();
        obj.insert("type".to_string(), Value::String(self.type_.clone()));
        obj.insert("properties".to_string(), self.properties.clone());
        obj.insert(
            "required".to_string(),
            Value::Array(self.required.iter().cloned().map(Value::String).collect()),
        );
        obj
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolMeta {
    pub name: String,
    pub title: String,
    pub description: String,
    pub input_schema: ToolInputSchema,
}

impl ToolMeta {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        input_schema: ToolInputSchema,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: description.into(),
            input_schema,
        }
    }

    /// Same tool under a different name, for clients that still call the old one.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self { name: name.into(), ..self.clone() }
    }

    pub fn to_tool(&self) -> Tool {
        let mut tool = Tool::new(
            self.name.clone(),
            self.description.clone(),
            Arc::new(self.input_schema.to_json_object()),
        );
        tool.title = Some(self.title.clone());
        tool
    }
}

#[derive(Debug, Clone, Default)]
pub struct ToolsMeta(pub Vec<ToolMeta>);

impl ToolsMeta {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|m| m.name.as_str())
    }

    pub fn to_tools(&self) -> Vec<Tool> {
        self.0.iter().map(ToolMeta::to_tool).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_carries_schema_and_title() {
        let meta = ToolMeta::new(
            "fetch_llms_txt",
            "Fetch llms.txt",
            "Reads a manifest",
            ToolInputSchema::new(
                "object",
                serde_json::json!({ "source": { "type": "string" } }),
                vec!["source".to_string()],
            ),
        );
        let tool = meta.to_tool();
        assert_eq!(tool.name, "fetch_llms_txt");
        assert_eq!(tool.title.as_deref(), Some("Fetch llms.txt"));
        assert_eq!(tool.input_schema.get("type"), Some(&serde_json::json!("object")));
        assert_eq!(tool.input_schema.get("required"), Some(&serde_json::json!(["source"])));
    }

    #[test]
    fn renamed_keeps_everything_else() {
        let meta = ToolMeta::new("a", "A", "desc", ToolInputSchema::empty());
        let alias = meta.renamed("b");
        assert_eq!(alias.name, "b");
        assert_eq!(alias.description, "desc");
    }
}
