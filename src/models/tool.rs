use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Builder that compiles a tool's name, description and parameter schema
/// into the provider's function descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    /// The name of the tool
    pub name: String,
    /// A description of what the tool does
    pub description: String,
    properties: Map<String, Value>,
}

impl ToolDefinition {
    /// Create a new tool with the given name and description
    pub fn new<N, D>(name: N, description: D) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        ToolDefinition {
            name: name.into(),
            description: description.into(),
            properties: Map::new(),
        }
    }

    /// Register a free-form string parameter, replacing any prior schema
    /// fragment under the same name
    pub fn set_string_parameter<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.properties.insert(name.into(), json!({"type": "string"}));
        self
    }

    /// Register a string parameter restricted to the given values,
    /// replacing any prior schema fragment under the same name
    pub fn set_enum_parameter<S: Into<String>>(&mut self, name: S, values: &[&str]) -> &mut Self {
        self.properties
            .insert(name.into(), json!({"type": "string", "enum": values}));
        self
    }

    /// Compile to the provider's descriptor. Tools with no parameters must
    /// not advertise an empty object schema, so the parameters block is
    /// omitted entirely when nothing was registered.
    pub fn to_spec(&self) -> Value {
        if self.properties.is_empty() {
            return json!({
                "type": "function",
                "function": {
                    "name": self.name,
                    "description": self.description,
                }
            });
        }

        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": {
                    "type": "object",
                    "properties": self.properties,
                }
            }
        })
    }
}

/// A model-requested invocation of a named tool with parsed arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the tool to execute
    pub name: String,
    /// The parsed arguments for the execution
    pub arguments: Value,
}

impl Action {
    pub fn new<S: Into<String>>(name: S, arguments: Value) -> Self {
        Action {
            name: name.into(),
            arguments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_without_parameters() {
        let tool = ToolDefinition::new("search", "Search the web");
        let spec = tool.to_spec();

        assert_eq!(spec["type"], "function");
        assert_eq!(spec["function"]["name"], "search");
        assert_eq!(spec["function"]["description"], "Search the web");
        assert!(spec["function"].get("parameters").is_none());
    }

    #[test]
    fn test_spec_with_string_parameter() {
        let mut tool = ToolDefinition::new("search", "Search the web");
        tool.set_string_parameter("query");
        let spec = tool.to_spec();

        assert_eq!(spec["function"]["parameters"]["type"], "object");
        assert_eq!(
            spec["function"]["parameters"]["properties"]["query"],
            json!({"type": "string"})
        );
    }

    #[test]
    fn test_spec_with_enum_parameter() {
        let mut tool = ToolDefinition::new("translate", "Translate text");
        tool.set_string_parameter("text");
        tool.set_enum_parameter("language", &["en", "zh", "fr"]);
        let spec = tool.to_spec();

        assert_eq!(
            spec["function"]["parameters"]["properties"]["language"],
            json!({"type": "string", "enum": ["en", "zh", "fr"]})
        );
    }

    #[test]
    fn test_parameter_overwrite_is_idempotent() {
        let mut tool = ToolDefinition::new("search", "Search the web");
        tool.set_enum_parameter("query", &["a", "b"]);
        tool.set_string_parameter("query");
        let spec = tool.to_spec();

        assert_eq!(
            spec["function"]["parameters"]["properties"]["query"],
            json!({"type": "string"})
        );
        assert_eq!(
            spec["function"]["parameters"]["properties"]
                .as_object()
                .unwrap()
                .len(),
            1
        );
    }
}
