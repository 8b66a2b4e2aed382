//! Base64 and URL (percent) encoders

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use crate::core::error::ToolError;
use crate::core::input::Input;
use crate::core::model::{Kind, ResultItem, ResultSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Base64,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

pub fn base64_encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode standard, padded base64. Surrounding whitespace is ignored.
pub fn base64_decode(text: &str) -> Result<String, ToolError> {
    let bytes = STANDARD
        .decode(text.trim())
        .map_err(|e| ToolError::Base64Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ToolError::Base64Decode(e.to_string()))
}

pub fn url_encode(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

pub fn url_decode(text: &str) -> Result<String, ToolError> {
    urlencoding::decode(text)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| ToolError::UrlDecode(e.to_string()))
}

pub fn apply(text: &str, codec: Codec, direction: Direction) -> Result<String, ToolError> {
    match (codec, direction) {
        (Codec::Base64, Direction::Encode) => Ok(base64_encode(text)),
        (Codec::Base64, Direction::Decode) => base64_decode(text),
        (Codec::Url, Direction::Encode) => Ok(url_encode(text)),
        (Codec::Url, Direction::Decode) => url_decode(text),
    }
}

/// Run an encode/decode command. Decode failures become an error item.
pub fn run_codec(input: &Input, codec: Codec, direction: Direction) -> ResultSet {
    let tool = format!(
        "{}.{}",
        match codec {
            Codec::Base64 => "base64",
            Codec::Url => "url",
        },
        match direction {
            Direction::Encode => "encode",
            Direction::Decode => "decode",
        }
    );
    debug!(tool = %tool, bytes = input.text.len(), "encoding");

    let item = match apply(&input.text, codec, direction) {
        Ok(output) => ResultItem::output(Kind::Encode, tool, output),
        Err(err) => ResultItem::from_tool_error(tool, &err),
    };
    ResultSet::single(item.with_input_meta(&input.meta()))
}
