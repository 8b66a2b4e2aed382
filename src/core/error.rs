//! Input-format errors surfaced by the tools
//!
//! Parser messages are carried verbatim; they are not translated or reclassified.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("{0}")]
    JsonParse(String),

    #[error("{0}")]
    YamlParse(String),

    #[error("failed to serialize output: {0}")]
    Serialize(String),

    #[error("invalid base64 input: {0}")]
    Base64Decode(String),

    #[error("invalid percent-encoded input: {0}")]
    UrlDecode(String),

    #[error("unknown hash algorithm: {0} (available: sha1, sha256, sha512, xxh3)")]
    UnknownAlgorithm(String),

    #[error("unknown case style: {0} (available: camel, pascal, snake, kebab, upper, lower, title)")]
    UnknownStyle(String),
}

impl ToolError {
    /// Stable machine-readable code for the error
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::JsonParse(_) => "JSON_PARSE",
            ToolError::YamlParse(_) => "YAML_PARSE",
            ToolError::Serialize(_) => "SERIALIZE",
            ToolError::Base64Decode(_) => "BASE64_DECODE",
            ToolError::UrlDecode(_) => "URL_DECODE",
            ToolError::UnknownAlgorithm(_) => "UNKNOWN_ALGORITHM",
            ToolError::UnknownStyle(_) => "UNKNOWN_STYLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_messages_are_verbatim() {
        let err = ToolError::JsonParse("expected value at line 1 column 1".to_string());
        assert_eq!(err.to_string(), "expected value at line 1 column 1");
        assert_eq!(err.code(), "JSON_PARSE");

        let err = ToolError::YamlParse("did not find expected key".to_string());
        assert_eq!(err.to_string(), "did not find expected key");
        assert_eq!(err.code(), "YAML_PARSE");
    }

    #[test]
    fn test_unknown_name_messages_list_choices() {
        let err = ToolError::UnknownAlgorithm("md4".to_string());
        assert!(err.to_string().contains("md4"));
        assert!(err.to_string().contains("sha256"));

        let err = ToolError::UnknownStyle("screaming".to_string());
        assert!(err.to_string().contains("kebab"));
        assert_eq!(err.code(), "UNKNOWN_STYLE");
    }
}
