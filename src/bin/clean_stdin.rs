//! Simple CLI that reads pasted HTML from stdin and writes the cleaned
//! result to stdout.
//!
//! Input may be raw clipboard `text/html` data (any charset, Windows
//! `CF_HTML` included).

use clap::{ArgAction, Parser};
use rs_cleanpaste::{clean_bytes_with_options, Error, Options};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI flags
#[allow(clippy::struct_excessive_bools)]
#[derive(Parser)]
#[command(author, version, about = "Clean Google Docs paste markup from stdin")]
struct Cli {
    /// Print the plain-text rendering instead of HTML
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "json")]
    text: bool,

    /// Print `{ "html": ..., "text": ... }` as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Start from the extended preset (headings, block quotes, collapsing, decoding)
    #[arg(long, action = ArgAction::SetTrue)]
    extended: bool,

    /// Remove line breaks that only space out paragraphs
    #[arg(long = "collapse-breaks", action = ArgAction::SetTrue)]
    collapse_breaks: bool,

    /// Decode common entities in the HTML output
    #[arg(long = "decode-entities", action = ArgAction::SetTrue)]
    decode_entities: bool,

    /// JSON options file; flags are applied on top of it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct Output<'a> {
    html: &'a str,
    text: &'a str,
}

impl Cli {
    fn options(&self) -> Result<Options, String> {
        let mut options = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
                Options::from_json(&json).map_err(|e| e.to_string())?
            }
            None if self.extended => Options::extended(),
            None => Options::default(),
        };
        if self.config.is_some() && self.extended {
            options.allowed_tags = Options::extended().allowed_tags;
            options.collapse_paragraph_breaks = true;
            options.decode_entities = true;
        }
        options.collapse_paragraph_breaks |= self.collapse_breaks;
        options.decode_entities |= self.decode_entities;
        Ok(options)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let options = match cli.options() {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let mut input = Vec::new();
    if io::stdin().read_to_end(&mut input).is_err() {
        eprintln!("Failed to read from stdin");
        return ExitCode::FAILURE;
    }

    let result = match clean_bytes_with_options(&input, &options) {
        Ok(result) => result,
        Err(Error::EmptyInput) => {
            eprintln!("Please paste some content first!");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        let output = Output {
            html: &result.html,
            text: &result.text,
        };
        println!("{}", serde_json::to_string(&output).unwrap_or_default());
    } else if cli.text {
        println!("{}", result.text);
    } else {
        println!("{}", result.html);
    }
    ExitCode::SUCCESS
}
