mod extract;
mod replace;
mod view;

use clap::{Parser, Subcommand};
use tmxliff::{Codec, FormatType};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::extract::{OutputStyle, exit_with, run_extract_command};
use crate::replace::run_replace_command;
use tmxliff_cli::input::{read_document, resolve_format};
use tmxliff_cli::validation::{validate_file_path, validate_format_name, validate_output_path};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Detect whether a file is XLIFF or TMX.
    Detect {
        /// The input file to inspect
        #[arg(short, long)]
        input: String,
    },

    /// Extract translation units.
    Extract {
        /// The input file to process
        #[arg(short, long)]
        input: String,

        /// Document format: xliff, tmx or auto
        #[arg(short, long, default_value = "auto")]
        format: String,

        /// Keep inline tags in source and target
        #[arg(long)]
        with_tags: bool,

        /// Output style
        #[arg(long, value_enum, default_value = "json")]
        style: OutputStyle,

        /// Write JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Display full text without truncation in the text view
        #[arg(long)]
        full: bool,
    },

    /// Check that a file parses and count its units.
    Validate {
        /// The input file to validate
        #[arg(short, long)]
        input: String,

        /// Document format: xliff, tmx or auto
        #[arg(short, long, default_value = "auto")]
        format: String,
    },

    /// Write translations from a JSON entry list back into a file.
    Replace {
        /// The document to patch
        #[arg(short, long)]
        input: String,

        /// JSON array of `{segNumber, unitId, aiResult, mtResult}` entries
        #[arg(short, long)]
        entries: String,

        /// Document format: xliff, tmx or auto
        #[arg(short, long, default_value = "auto")]
        format: String,

        /// Where to write the patched document (defaults to the input file)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tmxliff={log_level},tmxliff_cli={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match args.commands {
        Commands::Detect { input } => {
            check(validate_file_path(&input));
            let raw = read_document(&input).unwrap_or_else(|e| exit_with(&e));
            let format = tmxliff::detect_format(&raw);
            match Codec::with_format(&raw, format).dialect() {
                Some(dialect) => println!("{}", dialect),
                None => {
                    println!("{}", FormatType::Unrecognized);
                    std::process::exit(1);
                }
            }
        }
        Commands::Extract {
            input,
            format,
            with_tags,
            style,
            output,
            full,
        } => {
            check(validate_file_path(&input));
            check(validate_format_name(&format));
            if let Some(ref output) = output {
                check(validate_output_path(output));
            }
            run_extract_command(input, format, with_tags, style, output, full);
        }
        Commands::Validate { input, format } => {
            check(validate_file_path(&input));
            check(validate_format_name(&format));
            let raw = read_document(&input).unwrap_or_else(|e| exit_with(&e));
            let format = resolve_format(&format, &raw).unwrap_or_else(|e| exit_with(&e));
            let report = Codec::with_format(&raw, format).validate();
            println!(
                "{}",
                serde_json::to_string_pretty(&report)
                    .unwrap_or_else(|e| exit_with(&format!("Error serializing to JSON: {}", e)))
            );
            if !report.valid {
                std::process::exit(1);
            }
        }
        Commands::Replace {
            input,
            entries,
            format,
            output,
        } => {
            check(validate_file_path(&input));
            check(validate_file_path(&entries));
            check(validate_format_name(&format));
            if let Some(ref output) = output {
                check(validate_output_path(output));
            }
            run_replace_command(input, entries, format, output);
        }
    }
}

fn check(result: Result<(), String>) {
    if let Err(e) = result {
        exit_with(&e);
    }
}
