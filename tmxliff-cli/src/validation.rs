use std::path::Path;

/// Validate file path exists and is readable
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate output directory exists or can be created
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if let Some(parent) = path_obj.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return Err(format!("Cannot create output directory: {}", e));
            }
        }
    }

    Ok(())
}

/// Validate a `--format` value
pub fn validate_format_name(format: &str) -> Result<(), String> {
    match format.trim().to_lowercase().as_str() {
        "" => Err("Format cannot be empty".to_string()),
        "xliff" | "xlf" | "xlif" | "tmx" | "auto" => Ok(()),
        _ => Err(format!(
            "Unsupported format: {}. Supported formats: xliff, tmx, auto",
            format
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_file_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.xlf");
        std::fs::write(&file, "<xliff/>").unwrap();

        assert!(validate_file_path(file.to_str().unwrap()).is_ok());
        assert!(
            validate_file_path(dir.path().to_str().unwrap())
                .unwrap_err()
                .contains("not a file")
        );
        assert!(
            validate_file_path("missing.xlf")
                .unwrap_err()
                .contains("does not exist")
        );
    }

    #[test]
    fn test_validate_output_path_creates_parent() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("nested/out.xlf");
        assert!(validate_output_path(output.to_str().unwrap()).is_ok());
        assert!(dir.path().join("nested").is_dir());
        assert!(validate_output_path("out.xlf").is_ok());
    }

    #[test]
    fn test_validate_format_name() {
        assert!(validate_format_name("XLIFF").is_ok());
        assert!(validate_format_name("auto").is_ok());
        assert!(validate_format_name("").is_err());
        assert!(validate_format_name("csv").is_err());
    }
}
