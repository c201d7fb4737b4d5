//! primwrap CLI tool for applying value wrapper operations from the shell.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::PathBuf;

use primitive_wrappers::{Integer, JsonOptions, Text, Value};

#[derive(Debug, Parser)]
#[command(name = "primwrap")]
#[command(about = "Immutable text, integer and JSON value operations", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Text operations (case conversion, markup, inspection)
    Text(TextCommand),
    /// Integer operations
    Int(IntCommand),
    /// JSON operations
    Json(JsonCommand),
}

/// Apply one text operation to INPUT, or to stdin when omitted
#[derive(Debug, Parser)]
struct TextCommand {
    /// Operation to apply
    op: TextOp,

    /// Input text (defaults to stdin)
    input: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TextOp {
    /// helloWorld -> hello_world
    Snake,
    /// hello_world -> helloWorld
    Camel,
    /// helloWorld -> hello-world
    Kebab,
    Lower,
    Upper,
    Reverse,
    Capitalize,
    /// Number of characters
    Length,
    /// Detected encoding name
    Encoding,
    /// Exit status 1 unless the input is snake case
    IsSnake,
    /// One word per line
    Words,
    /// Remove tags and comments
    StripMarkup,
    /// Escape markup special characters
    EscapeMarkup,
}

#[derive(Debug, Parser)]
struct IntCommand {
    #[command(subcommand)]
    command: IntSubcommand,
}

#[derive(Debug, Subcommand)]
enum IntSubcommand {
    /// Prefix VALUE with ZEROES zero digits
    Pad {
        #[arg(allow_hyphen_values = true)]
        value: Integer,
        zeroes: i64,
    },
}

#[derive(Debug, Parser)]
struct JsonCommand {
    #[command(subcommand)]
    command: JsonSubcommand,
}

#[derive(Debug, Subcommand)]
enum JsonSubcommand {
    /// Decode a JSON document and encode it again
    Format(FormatJson),
}

/// Decode a JSON document and encode it again
#[derive(Debug, Parser)]
struct FormatJson {
    /// Input file (defaults to stdin)
    file: Option<PathBuf>,

    /// Indent output
    #[arg(long)]
    pretty: bool,

    /// Maximum nesting depth (default: 512)
    #[arg(long, default_value = "512")]
    depth: usize,
}

/// Output of a text operation: lines to print and whether it succeeded.
#[derive(Debug, PartialEq)]
struct TextOutput {
    lines: Vec<String>,
    success: bool,
}

impl TextOutput {
    fn line(s: impl Into<String>) -> Self {
        TextOutput {
            lines: vec![s.into()],
            success: true,
        }
    }
}

fn apply_text_op(op: TextOp, text: &Text) -> Result<TextOutput> {
    let transformed = match op {
        TextOp::Snake => text.to_snake_case(),
        TextOp::Camel => text.to_camel_case(),
        TextOp::Kebab => text.to_kebab_case(),
        TextOp::Lower => text.to_lower(),
        TextOp::Upper => text.to_upper(),
        TextOp::Reverse => text.reverse(),
        TextOp::Capitalize => text.capitalize(),
        TextOp::StripMarkup => text.strip_markup(),
        TextOp::EscapeMarkup => text.escape_for_markup(),
        TextOp::Length => return Ok(TextOutput::line(text.length().to_string())),
        TextOp::Encoding => return Ok(TextOutput::line(text.detect_encoding()?.name())),
        TextOp::IsSnake => {
            let success = text.is_snake_case();
            return Ok(TextOutput {
                lines: vec![success.to_string()],
                success,
            });
        }
        TextOp::Words => {
            return Ok(TextOutput {
                lines: text.words().map(|w| w.to_string()).collect(),
                success: true,
            })
        }
    };
    Ok(TextOutput::line(transformed.to_string()))
}

/// Read all of stdin, dropping one trailing line break.
fn read_stdin() -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buf)
        .context("Failed to read stdin")?;
    if buf.ends_with(b"\n") {
        buf.pop();
        if buf.ends_with(b"\r") {
            buf.pop();
        }
    }
    Ok(buf)
}

fn format_json(json: &str, options: &JsonOptions) -> Result<String> {
    let value = Value::from_json_with(json, options)?;
    Ok(value.to_json_with(options)?)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Text(args) => {
            let text = match args.input {
                Some(input) => Text::from(input),
                None => Text::from(read_stdin()?),
            };
            log::debug!("applying {:?} to {} bytes", args.op, text.byte_len());

            let output = apply_text_op(args.op, &text)?;
            for line in &output.lines {
                println!("{}", line);
            }
            if !output.success {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Int(int_cmd) => match int_cmd.command {
            IntSubcommand::Pad { value, zeroes } => {
                println!("{}", value.add_leading_zeroes(zeroes)?);
                Ok(())
            }
        },
        Command::Json(json_cmd) => match json_cmd.command {
            JsonSubcommand::Format(args) => {
                let json = match &args.file {
                    Some(path) => std::fs::read_to_string(path)
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                    None => String::from_utf8(read_stdin()?).context("stdin is not UTF-8")?,
                };
                let options = JsonOptions::compact()
                    .with_pretty(args.pretty)
                    .with_depth(args.depth);
                log::debug!("formatting {} bytes with {:?}", json.len(), options);

                println!("{}", format_json(&json, &options)?);
                Ok(())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(op: TextOp, input: &str) -> Vec<String> {
        apply_text_op(op, &Text::from(input)).unwrap().lines
    }

    #[test]
    fn test_case_ops() {
        assert_eq!(run(TextOp::Snake, "helloWorld"), ["hello_world"]);
        assert_eq!(run(TextOp::Camel, "hello_world"), ["helloWorld"]);
        assert_eq!(run(TextOp::Kebab, "Hello World"), ["hello-world"]);
        assert_eq!(run(TextOp::Upper, "abc"), ["ABC"]);
    }

    #[test]
    fn test_inspection_ops() {
        assert_eq!(run(TextOp::Length, "日本語"), ["3"]);
        assert_eq!(run(TextOp::Encoding, "plain"), ["ASCII"]);
        assert_eq!(run(TextOp::Words, "one, two"), ["one", "two"]);
        assert!(apply_text_op(TextOp::Encoding, &Text::from(vec![0xFF])).is_err());
    }

    #[test]
    fn test_is_snake_sets_status() {
        assert!(apply_text_op(TextOp::IsSnake, &Text::from("a_b")).unwrap().success);
        assert!(!apply_text_op(TextOp::IsSnake, &Text::from("aB")).unwrap().success);
    }

    #[test]
    fn test_markup_ops() {
        assert_eq!(run(TextOp::StripMarkup, "<b>bold</b>"), ["bold"]);
        assert_eq!(run(TextOp::EscapeMarkup, "a<b"), ["a&lt;b"]);
    }

    #[test]
    fn test_format_json() {
        let compact = JsonOptions::compact();
        assert_eq!(format_json(r#"{ "a" : [1, 2] }"#, &compact).unwrap(), r#"{"a":[1,2]}"#);
        assert!(format_json("[[1]]", &compact.with_depth(1)).is_err());
        assert!(format_json("null", &compact).is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["primwrap", "-v", "int", "pad", "-5", "2"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Int(IntCommand {
                command: IntSubcommand::Pad { value, zeroes },
            }) => {
                assert_eq!(value, Integer::new(-5));
                assert_eq!(zeroes, 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["primwrap", "text", "is-snake", "a_b"]).unwrap();
        assert!(matches!(cli.command, Command::Text(TextCommand { op: TextOp::IsSnake, .. })));
    }
}
