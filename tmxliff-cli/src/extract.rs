use std::fs::File;
use std::io::Write;

use clap::ValueEnum;
use tmxliff::{Codec, ExtractOptions};
use tmxliff_cli::input::{read_document, resolve_format};

use crate::view::print_view;

/// How extracted units are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputStyle {
    Json,
    Text,
}

/// Run the extract command: read a document and output its units.
pub fn run_extract_command(
    input: String,
    format: String,
    with_tags: bool,
    style: OutputStyle,
    output: Option<String>,
    full: bool,
) {
    let raw = read_document(&input).unwrap_or_else(|e| exit_with(&e));
    let format = resolve_format(&format, &raw).unwrap_or_else(|e| exit_with(&e));

    let units = Codec::with_format(&raw, format)
        .with_options(ExtractOptions::new().with_inline_tags(with_tags))
        .units()
        .unwrap_or_else(|e| exit_with(&format!("Error reading {}: {}", input, e)));
    tracing::info!(units = units.len(), %format, "extracted {}", input);

    if style == OutputStyle::Text {
        print_view(&units, full);
        return;
    }

    let json = serde_json::to_string_pretty(&units)
        .unwrap_or_else(|e| exit_with(&format!("Error serializing to JSON: {}", e)));
    match output {
        Some(output_path) => {
            if let Err(e) = File::create(&output_path).and_then(|mut f| f.write_all(json.as_bytes()))
            {
                exit_with(&format!("Error writing to {}: {}", output_path, e));
            }
            tracing::info!("units written to {}", output_path);
        }
        None => println!("{}", json),
    }
}

pub(crate) fn exit_with(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}
