use std::{fs::File, io::Read, str::FromStr};

use tmxliff::{FormatType, ReplacementEntry, detect_format};

/// Reads a document, honouring a UTF-8 or UTF-16 byte order mark.
///
/// TMX exports from desktop CAT tools are frequently UTF-16 with a BOM; files
/// without one are read as UTF-8.
pub fn read_document(path: &str) -> Result<String, String> {
    let file = File::open(path).map_err(|e| format!("Error reading {}: {}", path, e))?;
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .build(file);

    let mut decoded = String::new();
    decoder
        .read_to_string(&mut decoded)
        .map_err(|e| format!("Error decoding {}: {}", path, e))?;
    tracing::debug!(path, bytes = decoded.len(), "read document");
    Ok(decoded)
}

/// Resolves a `--format` value against the document text.
///
/// `auto` detects the format and fails when no signature is found.
pub fn resolve_format(name: &str, raw: &str) -> Result<FormatType, String> {
    if name.trim().eq_ignore_ascii_case("auto") {
        return match detect_format(raw) {
            FormatType::Unrecognized => {
                Err("Could not detect the document format (expected XLIFF or TMX)".to_string())
            }
            format => Ok(format),
        };
    }
    FormatType::from_str(name).map_err(|e| format!("{}. Supported formats: xliff, tmx, auto", e))
}

/// Reads a JSON array of replacement entries.
pub fn read_entries(path: &str) -> Result<Vec<ReplacementEntry>, String> {
    let json = read_document(path)?;
    serde_json::from_str(&json)
        .map_err(|e| format!("Error parsing replacement entries in {}: {}", path, e))
}
