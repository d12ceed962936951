//! Reads an HTML document from stdin and prints its `ArticleResult` as JSON.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use readable_article::{parse_bytes_to_json, EngineInput, Options};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "extract_stdin")]
#[command(about = "Extract a readable article from HTML on stdin")]
#[command(version)]
struct Cli {
    /// Add data-content-digest attributes to plain_content
    #[arg(long)]
    digests: bool,

    /// Add data-node-index attributes to plain_content and text blocks
    #[arg(long)]
    indexes: bool,

    /// Delegate extraction to the Readability engine
    #[arg(long)]
    readability: bool,

    /// Hand the engine the cleaned document instead of the raw input
    #[arg(long, requires = "readability")]
    cleaned_input: bool,

    /// Engine timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    timeout: u64,

    /// Source URL of the document
    #[arg(long)]
    url: Option<String>,

    /// Read HTML from this file instead of stdin
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let html = match read_input(cli.input.as_ref()) {
        Ok(html) => html,
        Err(err) => {
            tracing::error!(%err, "failed to read input");
            return ExitCode::FAILURE;
        }
    };

    let options = Options {
        content_digests: cli.digests,
        node_indexes: cli.indexes,
        use_readability: cli.readability,
        engine_input: if cli.cleaned_input {
            EngineInput::Cleaned
        } else {
            EngineInput::Raw
        },
        engine_timeout: Duration::from_secs(cli.timeout),
        url: cli.url,
        ..Options::default()
    };

    let json = parse_bytes_to_json(&html, &options).and_then(|result| {
        if cli.pretty {
            result.to_json_pretty()
        } else {
            result.to_json()
        }
    });

    match json {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "extraction failed");
            ExitCode::FAILURE
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> io::Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path),
        None => {
            let mut html = Vec::new();
            io::stdin().read_to_end(&mut html)?;
            Ok(html)
        }
    }
}
