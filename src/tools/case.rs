//! Case conversion engine
//!
//! Tokenizes input into words with an explicit scan-and-classify loop and re-joins the
//! words under a target convention.
//!
//! Word rules:
//! - any character that is not alphanumeric separates words (`_`, `-`, whitespace,
//!   punctuation); runs of separators collapse and never produce empty words
//! - a lowercase letter followed by an uppercase letter starts a new word (hump)
//! - digits stick to the word they touch
//! - a run of uppercase letters stays one word unless [`AcronymPolicy::Split`] is used
//!
//! Every operation is total: any string, including the empty string, is valid input.

use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::core::error::ToolError;
use crate::core::input::Input;
use crate::core::model::{Kind, ResultItem, ResultSet};

/// Target casing convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStyle {
    Camel,
    Pascal,
    Snake,
    Kebab,
    Upper,
    Lower,
    Title,
}

impl CaseStyle {
    pub const ALL: [CaseStyle; 7] = [
        CaseStyle::Camel,
        CaseStyle::Pascal,
        CaseStyle::Snake,
        CaseStyle::Kebab,
        CaseStyle::Upper,
        CaseStyle::Lower,
        CaseStyle::Title,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CaseStyle::Camel => "camel",
            CaseStyle::Pascal => "pascal",
            CaseStyle::Snake => "snake",
            CaseStyle::Kebab => "kebab",
            CaseStyle::Upper => "upper",
            CaseStyle::Lower => "lower",
            CaseStyle::Title => "title",
        }
    }

    /// What `hello world` looks like in this style
    pub fn example(&self) -> &'static str {
        match self {
            CaseStyle::Camel => "helloWorld",
            CaseStyle::Pascal => "HelloWorld",
            CaseStyle::Snake => "hello_world",
            CaseStyle::Kebab => "hello-world",
            CaseStyle::Upper => "HELLO WORLD",
            CaseStyle::Lower => "hello world",
            CaseStyle::Title => "Hello World",
        }
    }
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CaseStyle {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "camel" | "camelcase" | "camel-case" | "camel_case" => Ok(CaseStyle::Camel),
            "pascal" | "pascalcase" | "pascal-case" | "pascal_case" => Ok(CaseStyle::Pascal),
            "snake" | "snakecase" | "snake-case" | "snake_case" => Ok(CaseStyle::Snake),
            "kebab" | "kebabcase" | "kebab-case" | "kebab_case" => Ok(CaseStyle::Kebab),
            "upper" | "uppercase" | "upper-case" | "upper_case" => Ok(CaseStyle::Upper),
            "lower" | "lowercase" | "lower-case" | "lower_case" => Ok(CaseStyle::Lower),
            "title" | "titlecase" | "title-case" | "title_case" => Ok(CaseStyle::Title),
            _ => Err(ToolError::UnknownStyle(s.to_string())),
        }
    }
}

/// How runs of uppercase letters are tokenized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcronymPolicy {
    /// `HTTPServer` is one word
    #[default]
    Keep,
    /// `HTTPServer` is `HTTP` + `Server`
    Split,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    Digit,
    /// Letters without case (CJK, ...)
    Caseless,
    Separator,
}

fn classify(c: char) -> CharClass {
    if c.is_uppercase() {
        CharClass::Upper
    } else if c.is_lowercase() {
        CharClass::Lower
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        CharClass::Caseless
    } else {
        CharClass::Separator
    }
}

fn is_boundary(
    prev: CharClass,
    current: CharClass,
    next: Option<CharClass>,
    policy: AcronymPolicy,
) -> bool {
    match (prev, current) {
        (CharClass::Lower, CharClass::Upper) => true,
        (CharClass::Upper, CharClass::Upper) => {
            policy == AcronymPolicy::Split && next == Some(CharClass::Lower)
        }
        _ => false,
    }
}

/// Split input into words. Returned words borrow from the input.
pub fn tokenize(input: &str, policy: AcronymPolicy) -> Vec<&str> {
    let chars: Vec<(usize, CharClass)> = input
        .char_indices()
        .map(|(offset, c)| (offset, classify(c)))
        .collect();

    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (pos, &(offset, class)) in chars.iter().enumerate() {
        if class == CharClass::Separator {
            if let Some(s) = start.take() {
                words.push(&input[s..offset]);
            }
            continue;
        }

        let Some(s) = start else {
            start = Some(offset);
            continue;
        };

        // `start` is only set while inside a word, so pos > 0 here
        let prev = chars[pos - 1].1;
        let next = chars.get(pos + 1).map(|&(_, c)| c);
        if is_boundary(prev, class, next, policy) {
            words.push(&input[s..offset]);
            start = Some(offset);
        }
    }

    if let Some(s) = start {
        words.push(&input[s..]);
    }

    words
}

fn lower(word: &str) -> String {
    word.chars().flat_map(char::to_lowercase).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn join_humped(words: &[&str], lower_first: bool) -> String {
    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if i == 0 && lower_first {
                lower(word)
            } else {
                capitalize(word)
            }
        })
        .collect()
}

fn join_lower(words: &[&str], separator: &str) -> String {
    words
        .iter()
        .map(|word| lower(word))
        .collect::<Vec<_>>()
        .join(separator)
}

pub fn to_camel_case(s: &str) -> String {
    camel_with(s, AcronymPolicy::default())
}

pub fn to_pascal_case(s: &str) -> String {
    pascal_with(s, AcronymPolicy::default())
}

pub fn to_snake_case(s: &str) -> String {
    snake_with(s, AcronymPolicy::default())
}

pub fn to_kebab_case(s: &str) -> String {
    kebab_with(s, AcronymPolicy::default())
}

fn camel_with(s: &str, policy: AcronymPolicy) -> String {
    join_humped(&tokenize(s, policy), true)
}

fn pascal_with(s: &str, policy: AcronymPolicy) -> String {
    join_humped(&tokenize(s, policy), false)
}

fn snake_with(s: &str, policy: AcronymPolicy) -> String {
    join_lower(&tokenize(s, policy), "_")
}

fn kebab_with(s: &str, policy: AcronymPolicy) -> String {
    join_lower(&tokenize(s, policy), "-")
}

pub fn to_upper_case(s: &str) -> String {
    s.to_uppercase()
}

pub fn to_lower_case(s: &str) -> String {
    s.to_lowercase()
}

/// Uppercase the first character of each whitespace-delimited run and lowercase the
/// rest. Whitespace is kept verbatim.
pub fn to_title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if c.is_whitespace() {
            out.push(c);
            at_word_start = true;
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}

/// Convert `s` to the given style
pub fn convert(s: &str, style: CaseStyle, policy: AcronymPolicy) -> String {
    match style {
        CaseStyle::Camel => camel_with(s, policy),
        CaseStyle::Pascal => pascal_with(s, policy),
        CaseStyle::Snake => snake_with(s, policy),
        CaseStyle::Kebab => kebab_with(s, policy),
        CaseStyle::Upper => to_upper_case(s),
        CaseStyle::Lower => to_lower_case(s),
        CaseStyle::Title => to_title_case(s),
    }
}

/// Run the case command
pub fn run_case(input: &Input, style: CaseStyle, policy: AcronymPolicy) -> ResultSet {
    debug!(%style, ?policy, bytes = input.text.len(), "converting case");
    let output = convert(&input.text, style, policy);
    ResultSet::single(
        ResultItem::output(Kind::Case, format!("case.{}", style), output)
            .with_input_meta(&input.meta()),
    )
}

/// Run the styles command: one item per style with its `hello world` example
pub fn run_styles() -> ResultSet {
    CaseStyle::ALL
        .iter()
        .map(|style| {
            ResultItem::output(Kind::Case, format!("case.{}", style), style.example())
                .with_data(serde_json::json!({ "style": style.name() }))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hello_world_in_every_style() {
        let s = "hello world";
        assert_eq!(to_camel_case(s), "helloWorld");
        assert_eq!(to_pascal_case(s), "HelloWorld");
        assert_eq!(to_snake_case(s), "hello_world");
        assert_eq!(to_kebab_case(s), "hello-world");
        assert_eq!(to_title_case(s), "Hello World");
        assert_eq!(to_upper_case(s), "HELLO WORLD");
        assert_eq!(to_lower_case("Hello World"), "hello world");
    }

    #[test]
    fn test_style_examples_match_conversions() {
        for style in CaseStyle::ALL {
            assert_eq!(
                convert("hello world", style, AcronymPolicy::Keep),
                style.example(),
                "example for {}",
                style
            );
        }
    }

    #[test]
    fn test_hump_splitting() {
        assert_eq!(to_snake_case("HelloWorld"), "hello_world");
        assert_eq!(to_kebab_case("helloWorldAgain"), "hello-world-again");
        assert_eq!(to_camel_case("HelloWorld"), "helloWorld");
    }

    #[test]
    fn test_existing_separators() {
        assert_eq!(to_pascal_case("already_snake_case"), "AlreadySnakeCase");
        assert_eq!(to_camel_case("kebab-case-input"), "kebabCaseInput");
        assert_eq!(to_snake_case("  lots   of\tspace  "), "lots_of_space");
        assert_eq!(to_kebab_case("--leading and trailing!!"), "leading-and-trailing");
    }

    #[test]
    fn test_mixed_case_words_are_normalized() {
        assert_eq!(to_camel_case("HELLO world"), "helloWorld");
        assert_eq!(to_pascal_case("HELLO WORLD"), "HelloWorld");
        // a lowercase letter before an uppercase one is still a hump
        assert_eq!(to_snake_case("hELLO"), "h_ello");
    }

    #[test]
    fn test_digits_stick_to_words() {
        assert_eq!(to_snake_case("version2 update"), "version2_update");
        assert_eq!(to_snake_case("version2Update"), "version2update");
        assert_eq!(to_camel_case("2nd place"), "2ndPlace");
        assert_eq!(to_snake_case("abc123def"), "abc123def");
    }

    #[test]
    fn test_acronyms_kept_by_default() {
        assert_eq!(to_snake_case("HTTPServer"), "httpserver");
        assert_eq!(to_snake_case("parseHTTPRequest"), "parse_httprequest");
    }

    #[test]
    fn test_acronyms_split_when_requested() {
        let split = AcronymPolicy::Split;
        assert_eq!(convert("HTTPServer", CaseStyle::Snake, split), "http_server");
        assert_eq!(
            convert("parseHTTPRequest", CaseStyle::Kebab, split),
            "parse-http-request"
        );
        assert_eq!(convert("userID", CaseStyle::Snake, split), "user_id");
        assert_eq!(convert("HTTPServer", CaseStyle::Pascal, split), "HttpServer");
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("fooBar_baz-QUX 42", AcronymPolicy::Keep),
            vec!["foo", "Bar", "baz", "QUX", "42"]
        );
        assert!(tokenize("", AcronymPolicy::Keep).is_empty());
        assert!(tokenize(" _-.. ", AcronymPolicy::Keep).is_empty());
    }

    #[test]
    fn test_unicode_letters() {
        assert_eq!(to_snake_case("ÉtéChaud"), "été_chaud");
        assert_eq!(to_camel_case("日本 語"), "日本語");
    }

    #[test]
    fn test_title_case_preserves_spacing_and_punctuation() {
        assert_eq!(to_title_case("  hELLO,   wORLD!  "), "  Hello,   World!  ");
        assert_eq!(to_title_case("hello-world foo_bar"), "Hello-world Foo_bar");
        assert_eq!(to_title_case("a\nb\tc"), "A\nB\tC");
    }

    #[test]
    fn test_empty_input_everywhere() {
        for style in CaseStyle::ALL {
            assert_eq!(convert("", style, AcronymPolicy::Keep), "");
            assert_eq!(convert("", style, AcronymPolicy::Split), "");
        }
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("camelCase".parse::<CaseStyle>().unwrap(), CaseStyle::Camel);
        assert_eq!("snake_case".parse::<CaseStyle>().unwrap(), CaseStyle::Snake);
        assert_eq!("KEBAB".parse::<CaseStyle>().unwrap(), CaseStyle::Kebab);
        assert_eq!("title-case".parse::<CaseStyle>().unwrap(), CaseStyle::Title);
        let err = "screaming".parse::<CaseStyle>().unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_STYLE");
    }

    #[test]
    fn test_run_case_result() {
        let input = Input::from_text("hello world", 1024);
        let set = run_case(&input, CaseStyle::Kebab, AcronymPolicy::Keep);
        assert_eq!(set.len(), 1);
        assert_eq!(set.items[0].tool, "case.kebab");
        assert_eq!(set.items[0].output.as_deref(), Some("hello-world"));
        assert_eq!(set.items[0].meta.input_bytes, Some(11));
    }

    #[test]
    fn test_run_styles_lists_all() {
        let set = run_styles();
        assert_eq!(set.len(), CaseStyle::ALL.len());
        assert_eq!(set.items[0].tool, "case.camel");
    }

    proptest! {
        #[test]
        fn upper_of_lower_is_upper(s in "[ -~]{0,40}") {
            prop_assert_eq!(to_upper_case(&to_lower_case(&s)), to_upper_case(&s));
        }

        #[test]
        fn folding_is_idempotent(s in "[ -~]{0,40}") {
            let upper = to_upper_case(&s);
            let lower = to_lower_case(&s);
            prop_assert_eq!(to_upper_case(&upper), upper);
            prop_assert_eq!(to_lower_case(&lower), lower);
        }

        #[test]
        fn pascal_and_camel_differ_only_in_first_char(s in "[ -~]{0,40}") {
            let camel = to_camel_case(&s);
            let pascal = to_pascal_case(&s);
            let mut camel_chars = camel.chars();
            let mut pascal_chars = pascal.chars();
            match (camel_chars.next(), pascal_chars.next()) {
                (Some(c), Some(p)) => {
                    prop_assert_eq!(c.to_ascii_uppercase(), p);
                    prop_assert_eq!(camel_chars.as_str(), pascal_chars.as_str());
                }
                (None, None) => {}
                other => prop_assert!(false, "length mismatch: {:?}", other),
            }
        }

        #[test]
        fn snake_and_kebab_share_tokens(s in "[A-Za-z0-9 .,!?]{0,40}") {
            prop_assert_eq!(to_snake_case(&s).replace('_', "-"), to_kebab_case(&s));
        }

        #[test]
        fn snake_output_is_a_fixed_point(s in "[A-Za-z0-9 _-]{0,40}") {
            let once = to_snake_case(&s);
            prop_assert_eq!(to_snake_case(&once), once.clone());
        }
    }
}
