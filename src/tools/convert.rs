//! JSON ⟷ YAML conversion and JSON formatting
//!
//! Parsing and serialization are delegated to serde_json and serde_yaml; parse failures
//! are reported with the parser's own message.

use tracing::debug;

use crate::core::error::ToolError;
use crate::core::input::Input;
use crate::core::model::{Kind, ResultItem, ResultSet};

/// Conversion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    JsonToYaml,
    YamlToJson,
    FormatJson { minify: bool },
}

impl Conversion {
    fn tool_name(&self) -> &'static str {
        match self {
            Conversion::JsonToYaml => "convert.json-to-yaml",
            Conversion::YamlToJson => "convert.yaml-to-json",
            Conversion::FormatJson { minify: false } => "convert.format-json",
            Conversion::FormatJson { minify: true } => "convert.minify-json",
        }
    }
}

fn parse_json(text: &str) -> Result<serde_json::Value, ToolError> {
    serde_json::from_str(text).map_err(|e| ToolError::JsonParse(e.to_string()))
}

/// Parse JSON and serialize it as YAML
pub fn json_to_yaml(text: &str) -> Result<String, ToolError> {
    let value = parse_json(text)?;
    serde_yaml::to_string(&value).map_err(|e| ToolError::Serialize(e.to_string()))
}

/// Parse YAML and serialize it as pretty JSON (2-space indent)
pub fn yaml_to_json(text: &str) -> Result<String, ToolError> {
    let value: serde_json::Value =
        serde_yaml::from_str(text).map_err(|e| ToolError::YamlParse(e.to_string()))?;
    serde_json::to_string_pretty(&value).map_err(|e| ToolError::Serialize(e.to_string()))
}

/// Re-serialize JSON, pretty or minified
pub fn format_json(text: &str, minify: bool) -> Result<String, ToolError> {
    let value = parse_json(text)?;
    let formatted = if minify {
        serde_json::to_string(&value)
    } else {
        serde_json::to_string_pretty(&value)
    };
    formatted.map_err(|e| ToolError::Serialize(e.to_string()))
}

pub fn convert(text: &str, conversion: Conversion) -> Result<String, ToolError> {
    match conversion {
        Conversion::JsonToYaml => json_to_yaml(text),
        Conversion::YamlToJson => yaml_to_json(text),
        Conversion::FormatJson { minify } => format_json(text, minify),
    }
}

/// Run a convert command. Parse failures become an error item, not an `Err`.
pub fn run_convert(input: &Input, conversion: Conversion) -> ResultSet {
    let tool = conversion.tool_name();
    debug!(tool, bytes = input.text.len(), "converting");

    let item = match convert(&input.text, conversion) {
        Ok(output) => ResultItem::output(Kind::Convert, tool, output),
        Err(err) => {
            debug!(tool, error = %err, "conversion failed");
            ResultItem::from_tool_error(tool, &err)
        }
    };
    ResultSet::single(item.with_input_meta(&input.meta()))
}
