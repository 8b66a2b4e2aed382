//! Markdown previewer
//!
//! A best-effort Markdown to HTML converter built from an ordered chain of regex
//! substitutions. It is NOT CommonMark: every rule runs once over the whole text, in
//! order, and later rules see the output of earlier ones. Nesting, escaping and
//! precedence between rules are not handled.
//!
//! Order:
//! 1. fenced code blocks
//! 2. headers (h6 down to h1)
//! 3. bold
//! 4. italic
//! 5. links
//! 6. inline code
//! 7. list items
//! 8. paragraph wrapping (blank-line separated blocks; `<li>` runs grouped in `<ul>`)

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::core::input::Input;
use crate::core::model::{Kind, ResultItem, ResultSet};

/// One substitution in the chain
struct Rule {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("Invalid markdown rule regex"),
            replacement,
        }
    }
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(
            "code_block",
            r"(?s)```[^\n]*\n?(.*?)```",
            "<pre><code>${1}</code></pre>",
        ),
        Rule::new("h6", r"(?m)^###### (.*)$", "<h6>${1}</h6>"),
        Rule::new("h5", r"(?m)^##### (.*)$", "<h5>${1}</h5>"),
        Rule::new("h4", r"(?m)^#### (.*)$", "<h4>${1}</h4>"),
        Rule::new("h3", r"(?m)^### (.*)$", "<h3>${1}</h3>"),
        Rule::new("h2", r"(?m)^## (.*)$", "<h2>${1}</h2>"),
        Rule::new("h1", r"(?m)^# (.*)$", "<h1>${1}</h1>"),
        Rule::new("bold", r"\*\*(.+?)\*\*", "<strong>${1}</strong>"),
        Rule::new("italic", r"\*([^*\n]+)\*", "<em>${1}</em>"),
        Rule::new(
            "link",
            r"\[([^\]]+)\]\(([^)\s]+)\)",
            r#"<a href="${2}">${1}</a>"#,
        ),
        Rule::new("inline_code", r"`([^`\n]+)`", "<code>${1}</code>"),
        Rule::new("list_item", r"(?m)^[ \t]*[-*+] (.*)$", "<li>${1}</li>"),
    ]
});

/// Blank-line block separator
static BLOCK_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n(?:[ \t]*\n)+").expect("Invalid BLOCK_SEPARATOR regex"));

/// Blocks that already start with a block-level tag are left unwrapped
static BLOCK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<(?:h[1-6]|pre|ul|ol|li|blockquote|p|table|hr)\b")
        .expect("Invalid BLOCK_TAG regex")
});

fn wrap_block(block: &str) -> String {
    let block = block.trim();
    if block.lines().all(|line| line.trim_start().starts_with("<li>")) {
        format!("<ul>\n{}\n</ul>", block)
    } else if BLOCK_TAG.is_match(block) {
        block.to_string()
    } else {
        format!("<p>{}</p>", block)
    }
}

fn wrap_paragraphs(html: &str) -> String {
    BLOCK_SEPARATOR
        .split(html.trim())
        .filter(|block| !block.trim().is_empty())
        .map(wrap_block)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convert Markdown to HTML
pub fn to_html(markdown: &str) -> String {
    // Normalize line endings so `$` in multi-line rules sees plain `\n`
    let mut html = markdown.replace("\r\n", "\n");
    for rule in RULES.iter() {
        html = rule
            .pattern
            .replace_all(&html, rule.replacement)
            .into_owned();
        trace!(rule = rule.name, "applied markdown rule");
    }
    wrap_paragraphs(&html)
}

/// Run the markdown command
pub fn run_markdown(input: &Input) -> ResultSet {
    debug!(bytes = input.text.len(), "rendering markdown");
    ResultSet::single(
        ResultItem::output(Kind::Markdown, "markdown", to_html(&input.text))
            .with_input_meta(&input.meta()),
    )
}
