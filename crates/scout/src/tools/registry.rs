use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

use super::research::{self, EmailParams, ReportParams, SearchParams, SummarizeParams};
use crate::errors::{AgentError, AgentResult};
use crate::models::tool::Tool;

/// Every tool the registry knows about. The string form is the name advertised
/// to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ToolName {
    SearchKnowledgeBase,
    SummarizeText,
    GenerateReport,
    SendEmail,
}

impl ToolName {
    fn description(self) -> &'static str {
        match self {
            ToolName::SearchKnowledgeBase => "Search internal knowledge",
            ToolName::SummarizeText => "Summarize text",
            ToolName::GenerateReport => "Generate a report",
            ToolName::SendEmail => "Send report via email",
        }
    }

    /// (name, description) of each parameter. All parameters are required strings.
    fn parameters(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ToolName::SearchKnowledgeBase => {
                &[("query", "Search query to look up in the knowledge base")]
            }
            ToolName::SummarizeText => &[("text", "Text to summarize")],
            ToolName::GenerateReport => &[
                ("title", "Title of the report"),
                ("summary", "Summary content"),
            ],
            ToolName::SendEmail => &[
                ("recipient", "Recipient email address"),
                ("report", "Report content"),
            ],
        }
    }

    /// The descriptor advertised to the model
    pub fn descriptor(self) -> Tool {
        let parameters = self.parameters();
        let properties: serde_json::Map<String, Value> = parameters
            .iter()
            .map(|(name, description)| {
                (
                    name.to_string(),
                    json!({"type": "string", "description": description}),
                )
            })
            .collect();
        let required: Vec<&str> = parameters.iter().map(|(name, _)| *name).collect();

        Tool::new(
            self.as_ref(),
            self.description(),
            json!({
                "type": "object",
                "properties": properties,
                "required": required,
            }),
        )
    }

    /// Validate the arguments against this tool's parameter struct and run it
    pub fn call(self, arguments: &Value) -> AgentResult<String> {
        match self {
            ToolName::SearchKnowledgeBase => {
                let params: SearchParams = self.parse(arguments)?;
                Ok(research::search_knowledge_base(&params))
            }
            ToolName::SummarizeText => {
                let params: SummarizeParams = self.parse(arguments)?;
                Ok(research::summarize_text(&params))
            }
            ToolName::GenerateReport => {
                let params: ReportParams = self.parse(arguments)?;
                Ok(research::generate_report(&params))
            }
            ToolName::SendEmail => {
                let params: EmailParams = self.parse(arguments)?;
                Ok(research::send_email(&params))
            }
        }
    }

    fn parse<T: DeserializeOwned>(self, arguments: &Value) -> AgentResult<T> {
        if !arguments.is_object() {
            return Err(AgentError::InvalidParameters(format!(
                "arguments for {} must be a JSON object, got: {}",
                self.as_ref(),
                arguments
            )));
        }
        serde_json::from_value(arguments.clone())
            .map_err(|e| AgentError::InvalidParameters(format!("{}: {}", self.as_ref(), e)))
    }
}

/// Fixed mapping from tool name to its typed handler and schema
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: ToolName::iter().map(ToolName::descriptor).collect(),
        }
    }

    /// Look up a tool by the exact name the model used
    pub fn resolve(&self, name: &str) -> AgentResult<ToolName> {
        ToolName::from_str(name).map_err(|_| AgentError::ToolNotFound(name.to_string()))
    }

    /// Descriptors for every tool, always in the same order
    pub fn describe_all(&self) -> &[Tool] {
        &self.tools
    }

    pub fn invoke(&self, name: &str, arguments: &Value) -> AgentResult<String> {
        self.resolve(name)?.call(arguments)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_all_is_stable() {
        let registry = ToolRegistry::new();
        let names: Vec<&str> = registry
            .describe_all()
            .iter()
            .map(|tool| tool.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "search_knowledge_base",
                "summarize_text",
                "generate_report",
                "send_email"
            ]
        );
        assert_eq!(registry.describe_all(), ToolRegistry::new().describe_all());
    }

    #[test]
    fn test_descriptor_schema() {
        let tool = ToolName::GenerateReport.descriptor();
        assert_eq!(tool.description, "Generate a report");
        assert_eq!(tool.input_schema["type"], "object");
        assert_eq!(tool.input_schema["required"], json!(["title", "summary"]));
        assert_eq!(tool.input_schema["properties"]["title"]["type"], "string");
        assert_eq!(tool.input_schema["properties"]["summary"]["type"], "string");
    }

    #[test]
    fn test_resolve() {
        let registry = ToolRegistry::new();
        assert_eq!(
            registry.resolve("summarize_text").unwrap(),
            ToolName::SummarizeText
        );
        assert_eq!(
            registry.resolve("summarized_text").unwrap_err(),
            AgentError::ToolNotFound("summarized_text".to_string())
        );
        assert!(registry.resolve("Search_Knowledge_Base").is_err());
        assert!(registry.resolve("").is_err());
    }

    #[test]
    fn test_every_tool_accepts_its_declared_schema() {
        // Fill every declared property with a string and the call must succeed
        let registry = ToolRegistry::new();
        for tool in registry.describe_all() {
            let arguments: serde_json::Map<String, Value> = tool.input_schema["properties"]
                .as_object()
                .unwrap()
                .keys()
                .map(|key| (key.clone(), json!("some value")))
                .collect();
            let result = registry.invoke(&tool.name, &Value::Object(arguments));
            assert!(result.is_ok(), "{} failed: {:?}", tool.name, result);
        }
    }

    #[test]
    fn test_invoke_search() {
        let registry = ToolRegistry::new();
        let result = registry
            .invoke("search_knowledge_base", &json!({"query": "rag"}))
            .unwrap();
        assert_eq!(result, "RAG stands for Retrieval-Augmented Generation.");
    }

    #[test]
    fn test_invoke_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry
            .invoke("delete_everything", &json!({}))
            .unwrap_err();
        assert!(matches!(err, AgentError::ToolNotFound(name) if name == "delete_everything"));
    }

    #[test]
    fn test_invoke_missing_required_field() {
        let registry = ToolRegistry::new();
        let err = registry
            .invoke("generate_report", &json!({"title": "only a title"}))
            .unwrap_err();
        match err {
            AgentError::InvalidParameters(msg) => {
                assert!(msg.contains("generate_report"));
                assert!(msg.contains("summary"));
            }
            other => panic!("Expected InvalidParameters, got {:?}", other),
        }
    }

    #[test]
    fn test_invoke_type_mismatch() {
        let registry = ToolRegistry::new();
        let err = registry
            .invoke("summarize_text", &json!({"text": 42}))
            .unwrap_err();
        assert!(matches!(err, AgentError::InvalidParameters(_)));
    }

    #[test]
    fn test_invoke_unknown_field() {
        let registry = ToolRegistry::new();
        let err = registry
            .invoke(
                "send_email",
                &json!({"recipient": "a@b.c", "report": "r", "cc": "d@e.f"}),
            )
            .unwrap_err();
        assert!(matches!(err, AgentError::InvalidParameters(_)));
    }

    #[test]
    fn test_invoke_non_object_arguments() {
        let registry = ToolRegistry::new();
        let err = registry
            .invoke("search_knowledge_base", &json!("{not json"))
            .unwrap_err();
        match err {
            AgentError::InvalidParameters(msg) => assert!(msg.contains("must be a JSON object")),
            other => panic!("Expected InvalidParameters, got {:?}", other),
        }
    }
}
