//! `gcjson` CLI — parse, inspect, and re-serialize JSON from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Canonical compact dump (stdin → stdout)
//! echo '{ "name" : "Alice" }' | gcjson dump
//!
//! # Pretty-print from file to file
//! gcjson dump --pretty -i data.json -o out.json
//!
//! # Syntax check with a wider diagnostic window
//! gcjson check --context 20 -i data.json
//!
//! # Select a node: numeric segments index arrays, others look up keys
//! gcjson get users.0.name -i data.json
//!
//! # Root type, size, and node count
//! gcjson stats -i data.json
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gcjson_core::Json;
use std::io::{self, Read};
use tracing::{debug, info, Level};

#[derive(Parser)]
#[command(name = "gcjson", version, about = "Exception-free JSON DOM toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and print the compact serialization
    Dump {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Re-render the output with indentation
        #[arg(long)]
        pretty: bool,
        /// Bytes of input shown on each side of a syntax error
        #[arg(long, default_value_t = 10)]
        context: usize,
    },
    /// Parse only and report whether the input is well-formed
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Bytes of input shown on each side of a syntax error
        #[arg(long, default_value_t = 10)]
        context: usize,
    },
    /// Print the node at a dot-separated path
    Get {
        /// Path such as `users.0.name`
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Bytes of input shown on each side of a syntax error
        #[arg(long, default_value_t = 10)]
        context: usize,
    },
    /// Show root type, root size, and total node count
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Dump {
            input,
            output,
            pretty,
            context,
        } => {
            let text = read_input(input.as_deref())?;
            let doc = parse_document(&text, context)?;
            let mut rendered = doc.dump();
            if pretty {
                let value: serde_json::Value = serde_json::from_str(&rendered)
                    .context("Document cannot be pretty-printed (unescaped string content?)")?;
                rendered = serde_json::to_string_pretty(&value)?;
            }
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Check { input, context } => {
            let text = read_input(input.as_deref())?;
            parse_document(&text, context)?;
            println!("ok");
        }
        Commands::Get {
            path,
            input,
            context,
        } => {
            let text = read_input(input.as_deref())?;
            let mut doc = parse_document(&text, context)?;
            let node = select(&mut doc, &path)?;
            println!("{}", node.dump());
        }
        Commands::Stats { input } => {
            let text = read_input(input.as_deref())?;
            let doc = parse_document(&text, 10)?;
            println!("Type:   {}", doc.kind());
            println!("Size:   {}", doc.size());
            println!("Nodes:  {}", doc.count_nodes());
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// Parse `text`, turning a syntax error into a message with its context window.
fn parse_document(text: &str, context: usize) -> Result<Json> {
    let mut diagnostic = None;
    let doc = Json::parse(text, |parser| {
        diagnostic = Some(format!(
            "{} (at byte {}, near `{}`)",
            parser.error_string(),
            parser.position(),
            parser.error_surroundings(context)
        ));
    });
    if let Some(message) = diagnostic {
        bail!("Failed to parse JSON: {message}");
    }
    info!(kind = %doc.kind(), size = doc.size(), "parsed document");
    Ok(doc)
}

/// Walk `path` with the chaining accessors, stopping at the first sticky error.
fn select<'a>(doc: &'a mut Json, path: &str) -> Result<&'a mut Json> {
    let mut node = doc;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        node = match segment.parse::<usize>() {
            Ok(index) => node.get(index),
            Err(_) => node.get(segment),
        };
        debug!(segment, kind = %node.kind(), "path step");
        if let Some(err) = node.last_error() {
            bail!("Cannot resolve `{segment}` in `{path}`: {err}");
        }
    }
    Ok(node)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
