//! Unified Result Model
//!
//! Every tool maps its output to this unified Result Model before rendering.

use serde::{Deserialize, Serialize};

use crate::core::error::ToolError;

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Case,
    Digest,
    Convert,
    Uuid,
    Markdown,
    Encode,
    Error,
}

/// Metadata for a result item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    /// Size of the input in bytes (before truncation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_bytes: Option<u64>,

    /// Size of the output in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_bytes: Option<u64>,

    /// Whether the input was truncated before the transform ran
    #[serde(default)]
    pub truncated: bool,

    /// Whether invalid UTF-8 in the input was replaced before the transform ran
    #[serde(default)]
    pub lossy: bool,
}

/// Error information carried by a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&ToolError> for ErrorInfo {
    fn from(err: &ToolError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// The unified result item that all tools must produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// The kind of this result
    pub kind: Kind,

    /// Tool that produced the result, e.g. `case.snake` or `hash.sha256`
    pub tool: String,

    /// Transformed text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Structured payload for tools that emit more than text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Metadata
    pub meta: Meta,

    /// Errors (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorInfo>,
}

impl ResultItem {
    /// Create a result carrying transformed text
    pub fn output(kind: Kind, tool: impl Into<String>, output: impl Into<String>) -> Self {
        let output = output.into();
        Self {
            kind,
            tool: tool.into(),
            meta: Meta {
                output_bytes: Some(output.len() as u64),
                ..Default::default()
            },
            output: Some(output),
            data: None,
            errors: Vec::new(),
        }
    }

    /// Create a new error result
    pub fn error(tool: impl Into<String>, error: ErrorInfo) -> Self {
        Self {
            kind: Kind::Error,
            tool: tool.into(),
            output: None,
            data: None,
            meta: Meta::default(),
            errors: vec![error],
        }
    }

    /// Create an error result from a tool error
    pub fn from_tool_error(tool: impl Into<String>, err: &ToolError) -> Self {
        Self::error(tool, ErrorInfo::from(err))
    }

    /// Merge input metadata (size, truncation, lossy decoding) into this item
    pub fn with_input_meta(mut self, input: &Meta) -> Self {
        self.meta.input_bytes = input.input_bytes;
        self.meta.truncated = input.truncated;
        self.meta.lossy = input.lossy;
        self
    }

    /// Set structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == Kind::Error || !self.errors.is_empty()
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// A result set holding exactly one item
    pub fn single(item: ResultItem) -> Self {
        Self { items: vec![item] }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    /// Whether any item reports an error
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(ResultItem::is_error)
    }

    /// Iterate over every error carried by the set
    pub fn errors(&self) -> impl Iterator<Item = &ErrorInfo> {
        self.items.iter().flat_map(|item| item.errors.iter())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
