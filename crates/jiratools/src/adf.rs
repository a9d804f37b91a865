//! Command-line access to the ADF converter

use std::io::Read;
use std::path::PathBuf;

use jiratools_core::adf;
use serde_json::Value;

use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Parser)]
#[command(name = "adf")]
#[command(about = "Convert between Atlassian Document Format and Markdown / plain text")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Render an ADF value (document, node or legacy string) as Markdown
    #[clap(name = "render")]
    Render(InputOptions),

    /// Extract the plain text of an ADF value
    #[clap(name = "text")]
    Text(InputOptions),

    /// Build an ADF document from plain text
    #[clap(name = "from-text")]
    FromText(InputOptions),

    /// Print the canonical ADF document for any accepted input shape
    #[clap(name = "normalize")]
    Normalize(InputOptions),
}

#[derive(Debug, Clone, clap::Args)]
pub struct InputOptions {
    /// Input file. Reads stdin when omitted
    pub path: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed JSON
    #[arg(long)]
    pub compact: bool,
}

/// Module entry point
pub fn run(app: App, global: crate::Global) -> Result<()> {
    let (options, output) = match &app.command {
        Commands::Render(options) => (options, render_input(&read_input(options)?)),
        Commands::Text(options) => (options, text_input(&read_input(options)?)),
        Commands::FromText(options) => (options, from_text_input(&read_input(options)?)),
        Commands::Normalize(options) => (options, normalize_input(&read_input(options)?)),
    };

    if global.verbose {
        eprintln!("Produced {} bytes", output.as_ref().map_or(0, Output::len));
    }

    match output {
        Some(Output::Text(text)) => print!("{text}"),
        Some(Output::Json(value)) => {
            let rendered = if options.compact {
                serde_json::to_string(&value)?
            } else {
                serde_json::to_string_pretty(&value)?
            };
            println!("{rendered}");
        }
        None => log::warn!("input contains no document content"),
    }

    Ok(())
}

#[derive(Debug, PartialEq)]
enum Output {
    Text(String),
    Json(Value),
}

impl Output {
    fn len(&self) -> usize {
        match self {
            Output::Text(text) => text.len(),
            Output::Json(value) => value.to_string().len(),
        }
    }
}

fn read_input(options: &InputOptions) -> Result<String> {
    match &options.path {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Input that is not valid JSON is treated as a legacy plain-text value.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn render_input(raw: &str) -> Option<Output> {
    Some(Output::Text(adf::render(Some(&parse_value(raw)))))
}

fn text_input(raw: &str) -> Option<Output> {
    Some(Output::Text(adf::extract_plain_text(Some(&parse_value(
        raw,
    )))))
}

fn from_text_input(raw: &str) -> Option<Output> {
    adf::text_to_document(raw).map(|document| Output::Json(document.to_value()))
}

fn normalize_input(raw: &str) -> Option<Output> {
    adf::normalize(Some(&parse_value(raw))).map(|document| Output::Json(document.to_value()))
}
