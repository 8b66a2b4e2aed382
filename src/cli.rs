//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;

use crate::core::input::{read_input, Input, InputSource, DEFAULT_MAX_INPUT_BYTES};
use crate::core::model::{ResultItem, ResultSet};
use crate::core::render::{OutputFormat, RenderConfig, Renderer};
use crate::tools::case::{AcronymPolicy, CaseStyle};
use crate::tools::convert::Conversion;
use crate::tools::encode::{Codec, Direction};

/// Exit code used when a tool reports an input-format error
const EXIT_INPUT_ERROR: u8 = 2;

/// devkit - small developer utilities on the command line.
#[derive(Parser, Debug)]
#[command(name = "devkit")]
#[command(
    author,
    version,
    about,
    long_about = r#"devkit bundles small text utilities behind one command.

Every command prints a ResultSet in the selected format (default: jsonl).

Output formats:
- jsonl: one JSON object per line (best for piping into tools)
- json: a single JSON array
- md: human-friendly Markdown
- raw: the transformed text only

Input is taken from the TEXT argument, from --file, or from stdin.

Examples:
    devkit case snake "HelloWorld"
    echo "hello world" | devkit --format raw case camel
    devkit hash --algorithm sha256 ""
    devkit convert json-to-yaml --file package.json
    devkit uuid --count 5
"#
)]
pub struct Cli {
    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        env = "DEVKIT_FORMAT",
        value_name = "FORMAT",
        long_help = "Select the output format for ResultSet.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw (transformed text only; errors go to stderr)"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Maximum input size in bytes; larger input is truncated.
    #[arg(
        long,
        global = true,
        env = "DEVKIT_MAX_BYTES",
        default_value_t = DEFAULT_MAX_INPUT_BYTES,
        value_name = "BYTES",
        long_help = "Maximum input size in bytes.\n\n\
Larger input is truncated at a UTF-8 character boundary and the result meta\n\
marks it as truncated."
    )]
    pub max_bytes: usize,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where a text command reads its input
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Input text. Reads stdin when neither TEXT nor --file is given.
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Read input from a file instead.
    #[arg(long, value_name = "PATH", conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    fn read(self, max_bytes: usize) -> Result<Input> {
        let source = InputSource::from_args(self.text, self.file);
        read_input(&source, max_bytes)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert text between casing conventions.
    #[command(long_about = "Convert text to camelCase, PascalCase, snake_case, kebab-case,\n\
UPPER CASE, lower case or Title Case.\n\n\
Words are split on any non-alphanumeric character and on lowercase-to-uppercase\n\
humps. Runs of capitals (acronyms) stay one word unless --split-acronyms is given.\n\n\
Examples:\n\
  devkit case snake \"HelloWorld\"\n\
  devkit case pascal \"already_snake_case\"\n\
  devkit case kebab --split-acronyms \"HTTPServer\"\n")]
    Case {
        /// Target style (camel, pascal, snake, kebab, upper, lower, title).
        #[arg(value_name = "STYLE")]
        style: String,

        /// Split acronym runs: `HTTPServer` becomes `http_server`.
        #[arg(long)]
        split_acronyms: bool,

        #[command(flatten)]
        input: InputArgs,
    },

    /// List the supported case styles.
    Styles,

    /// Compute SHA-1/SHA-256/SHA-512 digests.
    #[command(long_about = "Hash the UTF-8 bytes of the input and print lowercase hex digests.\n\n\
By default SHA-1, SHA-256 and SHA-512 are computed. Use --algorithm (repeatable)\n\
to select specific algorithms, including the non-cryptographic xxh3.\n\n\
Examples:\n\
  devkit hash \"hello\"\n\
  devkit hash -a sha256 --file archive.tar\n")]
    Hash {
        /// Algorithm to compute (sha1, sha256, sha512, xxh3). Repeatable.
        #[arg(short = 'a', long = "algorithm", value_name = "ALG")]
        algorithms: Vec<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Convert between JSON and YAML, or reformat JSON.
    Convert {
        #[command(subcommand)]
        action: ConvertCommands,
    },

    /// Generate random (v4) UUIDs.
    Uuid {
        /// Number of UUIDs to generate.
        #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=10_000))]
        count: u32,

        /// Uppercase hex digits.
        #[arg(long)]
        upper: bool,
    },

    /// Render Markdown to HTML (best effort, not CommonMark).
    Markdown {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Base64 encode or decode (standard alphabet, padded).
    Base64 {
        #[command(subcommand)]
        action: CodecCommands,
    },

    /// URL (percent) encode or decode.
    Url {
        #[command(subcommand)]
        action: CodecCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConvertCommands {
    /// Parse JSON and print it as YAML.
    JsonToYaml {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Parse YAML and print it as pretty JSON.
    YamlToJson {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Pretty-print (or minify) JSON.
    FormatJson {
        /// Print compact JSON instead.
        #[arg(long)]
        minify: bool,

        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum CodecCommands {
    /// Encode the input.
    Encode {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Decode the input.
    Decode {
        #[command(flatten)]
        input: InputArgs,
    },
}

impl CodecCommands {
    fn split(self) -> (Direction, InputArgs) {
        match self {
            CodecCommands::Encode { input } => (Direction::Encode, input),
            CodecCommands::Decode { input } => (Direction::Decode, input),
        }
    }
}

fn run_codec(codec: Codec, action: CodecCommands, max_bytes: usize) -> Result<ResultSet> {
    let (direction, input) = action.split();
    let input = input.read(max_bytes)?;
    Ok(crate::tools::encode::run_codec(&input, codec, direction))
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<ExitCode> {
    // Parse output format
    let format: OutputFormat = cli.format.parse().unwrap_or_else(|err| {
        warn!("{}; falling back to jsonl", err);
        OutputFormat::default()
    });
    let render_config = RenderConfig::with_pretty(format, cli.pretty);
    let max_bytes = cli.max_bytes;

    let result_set = match cli.command {
        Commands::Case {
            style,
            split_acronyms,
            input,
        } => match style.parse::<CaseStyle>() {
            Ok(style) => {
                let policy = if split_acronyms {
                    AcronymPolicy::Split
                } else {
                    AcronymPolicy::Keep
                };
                crate::tools::case::run_case(&input.read(max_bytes)?, style, policy)
            }
            Err(err) => ResultSet::single(ResultItem::from_tool_error("case", &err)),
        },

        Commands::Styles => crate::tools::case::run_styles(),

        Commands::Hash { algorithms, input } => {
            match crate::tools::hash::parse_algorithms(&algorithms) {
                Ok(algorithms) => {
                    crate::tools::hash::run_hash(&input.read(max_bytes)?, &algorithms)?
                }
                Err(err) => ResultSet::single(ResultItem::from_tool_error("hash", &err)),
            }
        }

        Commands::Convert { action } => {
            let (conversion, input) = match action {
                ConvertCommands::JsonToYaml { input } => (Conversion::JsonToYaml, input),
                ConvertCommands::YamlToJson { input } => (Conversion::YamlToJson, input),
                ConvertCommands::FormatJson { minify, input } => {
                    (Conversion::FormatJson { minify }, input)
                }
            };
            crate::tools::convert::run_convert(&input.read(max_bytes)?, conversion)
        }

        Commands::Uuid { count, upper } => crate::tools::uuidgen::run_uuid(count as usize, upper),

        Commands::Markdown { input } => {
            crate::tools::markdown::run_markdown(&input.read(max_bytes)?)
        }

        Commands::Base64 { action } => run_codec(Codec::Base64, action, max_bytes)?,

        Commands::Url { action } => run_codec(Codec::Url, action, max_bytes)?,
    };

    let renderer = Renderer::with_config(render_config);
    renderer
        .render_to(&result_set, std::io::stdout().lock())
        .context("Failed to write output")?;

    if !result_set.has_errors() {
        return Ok(ExitCode::SUCCESS);
    }

    // Raw output carries no error records, so surface them on stderr
    if render_config.format == OutputFormat::Raw {
        for error in result_set.errors() {
            eprintln!("error[{}]: {}", error.code, error.message);
        }
    }
    Ok(ExitCode::from(EXIT_INPUT_ERROR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::hash::Algorithm;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_case_command() {
        let cli = Cli::try_parse_from(["devkit", "case", "snake_case", "Hello World"]).unwrap();
        match cli.command {
            Commands::Case {
                style,
                split_acronyms,
                input,
            } => {
                assert_eq!(style.parse::<CaseStyle>().unwrap(), CaseStyle::Snake);
                assert!(!split_acronyms);
                assert_eq!(input.text.as_deref(), Some("Hello World"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_style_reaches_run() {
        // Reported as a result item, not as a usage error
        let cli = Cli::try_parse_from(["devkit", "case", "screaming", "x"]).unwrap();
        match cli.command {
            Commands::Case { style, .. } => assert!(style.parse::<CaseStyle>().is_err()),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_hash_algorithms() {
        let cli =
            Cli::try_parse_from(["devkit", "hash", "-a", "sha-256", "--algorithm", "xxh3", "x"])
                .unwrap();
        match cli.command {
            Commands::Hash { algorithms, .. } => {
                assert_eq!(
                    crate::tools::hash::parse_algorithms(&algorithms).unwrap(),
                    vec![Algorithm::Sha256, Algorithm::Xxh3]
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_text_and_file_conflict() {
        let result =
            Cli::try_parse_from(["devkit", "markdown", "# hi", "--file", "README.md"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["devkit", "uuid", "-n", "3", "--format", "raw", "-vv"])
            .unwrap();
        assert_eq!(cli.format, "raw");
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Uuid { count: 3, upper: false }));
    }

    #[test]
    fn test_uuid_count_must_be_positive() {
        assert!(Cli::try_parse_from(["devkit", "uuid", "--count", "0"]).is_err());
    }
}
