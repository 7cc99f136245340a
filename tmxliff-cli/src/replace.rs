use tmxliff::Codec;

use crate::extract::exit_with;
use tmxliff_cli::input::{read_document, read_entries, resolve_format};

/// Run the replace command: patch translations from a JSON entry list into a
/// document and write the result.
pub fn run_replace_command(input: String, entries: String, format: String, output: Option<String>) {
    let raw = read_document(&input).unwrap_or_else(|e| exit_with(&e));
    let format = resolve_format(&format, &raw).unwrap_or_else(|e| exit_with(&e));
    let entries = read_entries(&entries).unwrap_or_else(|e| exit_with(&e));

    let result = Codec::with_format(&raw, format)
        .apply_replacements(&entries)
        .unwrap_or_else(|e| exit_with(&e.to_string()));

    let output_path = output.unwrap_or(input);
    if let Err(e) = std::fs::write(&output_path, &result.patched_text) {
        exit_with(&format!("Error writing to {}: {}", output_path, e));
    }
    tracing::info!(
        applied = result.applied_count,
        entries = entries.len(),
        "patched {}",
        output_path
    );
    println!(
        "Applied {} of {} replacement(s) to {}",
        result.applied_count,
        entries.len(),
        output_path
    );
}
