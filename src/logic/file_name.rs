//! Save-name validation

use super::errors::PickerError;

/// Check a file name typed into the save prompt.
///
/// The name must be non-blank, must not contain a path separator, and when
/// an extension filter is active must end with one of its suffixes.
/// Returns the trimmed name.
pub fn validate_save_name(name: &str, filter: &[String]) -> Result<String, PickerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PickerError::InvalidFileName {
            reason: "file name is empty".to_string(),
        });
    }
    if name == "." || name == ".." || name.contains('/') || name.contains('\0') {
        return Err(PickerError::InvalidFileName {
            reason: format!("'{}' is not a plain file name", name),
        });
    }
    if !filter.is_empty() && !filter.iter().any(|suffix| name.ends_with(suffix.as_str())) {
        return Err(PickerError::InvalidFileName {
            reason: format!("'{}' must end with {}", name, filter.join(", ")),
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            validate_save_name("   ", &[]),
            Err(PickerError::InvalidFileName { .. })
        ));
    }

    #[test]
    fn test_extension_mismatch_rejected() {
        let filter = vec![".csv".to_string()];
        let err = validate_save_name("export.txt", &filter).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid file name: 'export.txt' must end with .csv"
        );
    }

    #[test]
    fn test_separator_rejected() {
        assert!(validate_save_name("../x.csv", &[]).is_err());
        assert!(validate_save_name("..", &[]).is_err());
    }

    #[test]
    fn test_valid_name_trimmed() {
        let filter = vec![".csv".to_string(), ".txt".to_string()];
        assert_eq!(validate_save_name(" notes.txt ", &filter).unwrap(), "notes.txt");
    }
}
