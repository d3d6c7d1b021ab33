//! System picker
//!
//! Delegates a pick to an external dialog program instead of the built-in
//! browser. Any zenity-compatible program works: it is told what to pick on
//! the command line and prints the chosen path on stdout.

use std::io;
use std::path::PathBuf;
use std::process::Command;

use crate::log_debug;
use crate::logic::errors::PickerError;
use crate::storage::Locator;

/// MIME type that makes CSV files selectable where `text/plain` and
/// `text/csv` leave them greyed out
pub const CSV_MIME: &str = "text/comma-separated-values";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    /// Choose a folder
    FolderTree,
    /// Open an existing document
    GetDocument,
    /// Choose where a new document goes
    CreateDocument,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerRequest {
    pub kind: PickerKind,
    pub mime_types: Vec<String>,
    /// Glob patterns offered as the file filter, e.g. `*.csv`
    pub patterns: Vec<String>,
    pub suggested_name: Option<String>,
    pub start_dir: Option<PathBuf>,
    pub title: Option<String>,
}

impl PickerRequest {
    pub fn new(kind: PickerKind) -> Self {
        Self {
            kind,
            mime_types: Vec::new(),
            patterns: Vec::new(),
            suggested_name: None,
            start_dir: None,
            title: None,
        }
    }

    pub fn with_mime_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.mime_types = types.into_iter().map(|t| normalize_mime(t.as_ref())).collect();
        self.mime_types.dedup();
        self
    }

    /// Derive glob patterns from name suffixes such as `.csv`
    pub fn with_extensions(mut self, extensions: &[String]) -> Self {
        self.patterns = extensions
            .iter()
            .map(|ext| {
                if ext.starts_with('.') {
                    format!("*{}", ext)
                } else {
                    format!("*.{}", ext)
                }
            })
            .collect();
        self
    }

    pub fn with_suggested_name(mut self, name: Option<String>) -> Self {
        self.suggested_name = name;
        self
    }

    pub fn with_start_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.start_dir = dir;
        self
    }
}

/// Replace MIME types that hide CSV files in document pickers
pub fn normalize_mime(mime: &str) -> String {
    match mime {
        "text/plain" | "text/csv" => CSV_MIME.to_string(),
        other => other.to_string(),
    }
}

/// What the system picker returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerResult {
    Picked(Locator),
    Cancelled,
}

pub trait PlatformPicker {
    fn launch(&self, request: &PickerRequest) -> Result<PickerResult, PickerError>;
}

/// Runs a zenity-compatible dialog program
#[derive(Debug, Clone)]
pub struct CommandPicker {
    program: String,
}

impl CommandPicker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Command-line arguments for `request`
    pub fn args(&self, request: &PickerRequest) -> Vec<String> {
        let mut args = vec!["--file-selection".to_string()];

        match request.kind {
            PickerKind::FolderTree => args.push("--directory".to_string()),
            PickerKind::GetDocument => {}
            PickerKind::CreateDocument => {
                args.push("--save".to_string());
                args.push("--confirm-overwrite".to_string());
            }
        }

        if let Some(title) = &request.title {
            args.push(format!("--title={}", title));
        }

        // --filename takes a directory (trailing slash) or a full path
        let mut filename = request
            .start_dir
            .as_ref()
            .map(|dir| format!("{}/", dir.to_string_lossy().trim_end_matches('/')))
            .unwrap_or_default();
        if request.kind == PickerKind::CreateDocument {
            if let Some(name) = &request.suggested_name {
                filename.push_str(name);
            }
        }
        if !filename.is_empty() {
            args.push(format!("--filename={}", filename));
        }

        if request.kind != PickerKind::FolderTree {
            if !request.patterns.is_empty() {
                args.push(format!("--file-filter={}", request.patterns.join(" ")));
            }
            if !request.mime_types.is_empty() {
                args.push(format!(
                    "--file-filter={} | {}",
                    request.mime_types.join(", "),
                    mime_globs(&request.mime_types)
                ));
            }
        }

        args
    }
}

/// Glob patterns for the MIME types a picker knows how to widen
fn mime_globs(mime_types: &[String]) -> String {
    let globs: Vec<&str> = mime_types
        .iter()
        .map(|mime| match mime.as_str() {
            CSV_MIME => "*.csv *.txt",
            _ => "*",
        })
        .collect();
    globs.join(" ")
}

impl PlatformPicker for CommandPicker {
    fn launch(&self, request: &PickerRequest) -> Result<PickerResult, PickerError> {
        let args = self.args(request);
        log_debug(&format!("picker: {} {:?}", self.program, args));

        let output = Command::new(&self.program).args(&args).output().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                PickerError::PickerUnavailable {
                    program: self.program.clone(),
                }
            } else {
                PickerError::PickerFailed {
                    program: self.program.clone(),
                    reason: e.to_string(),
                }
            }
        })?;

        match output.status.code() {
            Some(0) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let chosen = stdout.lines().next().unwrap_or("").trim();
                if chosen.is_empty() {
                    return Ok(PickerResult::Cancelled);
                }
                Ok(PickerResult::Picked(Locator::Path(PathBuf::from(chosen))))
            }
            Some(1) => Ok(PickerResult::Cancelled),
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(PickerError::PickerFailed {
                    program: self.program.clone(),
                    reason: format!("{} {}", output.status, stderr.trim()).trim().to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_mime() {
        assert_eq!(normalize_mime("text/plain"), CSV_MIME);
        assert_eq!(normalize_mime("text/csv"), CSV_MIME);
        assert_eq!(normalize_mime("application/pdf"), "application/pdf");
    }

    #[test]
    fn test_mime_types_deduplicated() {
        let request = PickerRequest::new(PickerKind::GetDocument)
            .with_mime_types(["text/plain", "text/csv"]);
        assert_eq!(request.mime_types, vec![CSV_MIME.to_string()]);
    }

    #[test]
    fn test_folder_tree_args() {
        let picker = CommandPicker::new("zenity");
        let request = PickerRequest::new(PickerKind::FolderTree)
            .with_start_dir(Some(PathBuf::from("/home/me/")));
        assert_eq!(
            picker.args(&request),
            vec!["--file-selection", "--directory", "--filename=/home/me/"]
        );
    }

    #[test]
    fn test_create_document_args() {
        let picker = CommandPicker::new("zenity");
        let request = PickerRequest::new(PickerKind::CreateDocument)
            .with_extensions(&[".csv".to_string()])
            .with_suggested_name(Some("export.csv".to_string()))
            .with_start_dir(Some(PathBuf::from("/tmp")));
        let args = picker.args(&request);
        assert!(args.contains(&"--save".to_string()));
        assert!(args.contains(&"--filename=/tmp/export.csv".to_string()));
        assert!(args.contains(&"--file-filter=*.csv".to_string()));
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let picker = CommandPicker::new("filepick-no-such-picker-program");
        let err = picker
            .launch(&PickerRequest::new(PickerKind::GetDocument))
            .unwrap_err();
        assert!(matches!(err, PickerError::PickerUnavailable { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_one_is_cancel() {
        // `false` ignores its arguments and exits with 1
        let picker = CommandPicker::new("false");
        let result = picker
            .launch(&PickerRequest::new(PickerKind::FolderTree))
            .unwrap();
        assert_eq!(result, PickerResult::Cancelled);
    }
}
