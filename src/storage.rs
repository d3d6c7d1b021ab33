//! Storage access
//!
//! The directory source the listing reads from, and the opaque locator
//! handed back to callers on selection.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One raw child of a directory, before filtering and sorting
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawEntry {
    /// Base name (no parent path)
    pub name: String,
    /// Full path
    pub path: PathBuf,
    pub is_dir: bool,
    /// File size in bytes; `None` for directories or when metadata was not requested
    pub size: Option<u64>,
    /// Last modified time; `None` when metadata was not requested
    pub modified: Option<SystemTime>,
}

/// Read access to a storage tree.
///
/// Implementations must be shareable with the background listing worker.
pub trait DirectorySource: Send + Sync {
    /// List the children of `dir`. Size and modification time are only
    /// filled in when `with_metadata` is set.
    fn read_dir_with(&self, dir: &Path, with_metadata: bool) -> io::Result<Vec<RawEntry>>;

    /// Whether `path` exists and is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether the current user can create files inside `dir`
    fn is_writable(&self, dir: &Path) -> bool;

    /// Create an empty file named `name` inside `dir`, returning its path
    fn create_file(&self, dir: &Path, name: &str) -> io::Result<PathBuf>;

    fn read_dir(&self, dir: &Path) -> io::Result<Vec<RawEntry>> {
        self.read_dir_with(dir, false)
    }
}

/// `std::fs` backed storage
#[derive(Clone, Copy, Debug, Default)]
pub struct StdStorage;

impl DirectorySource for StdStorage {
    fn read_dir_with(&self, dir: &Path, with_metadata: bool) -> io::Result<Vec<RawEntry>> {
        let mut out = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            // Entries vanishing mid-listing are skipped, not fatal
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };
            let path = entry.path();
            // Only symlinks need a stat; they are followed so a linked
            // directory is browsable
            let is_dir = match entry.file_type() {
                Ok(ft) if ft.is_symlink() => path.is_dir(),
                Ok(ft) => ft.is_dir(),
                Err(_) => continue,
            };
            let name = entry.file_name().to_string_lossy().to_string();

            let (size, modified) = if with_metadata {
                match entry.metadata() {
                    Ok(meta) => (
                        if is_dir { None } else { Some(meta.len()) },
                        meta.modified().ok(),
                    ),
                    Err(_) => (None, None),
                }
            } else {
                (None, None)
            };

            out.push(RawEntry {
                name,
                path,
                is_dir,
                size,
                modified,
            });
        }
        Ok(out)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_writable(&self, dir: &Path) -> bool {
        is_path_writable(dir)
    }

    fn create_file(&self, dir: &Path, name: &str) -> io::Result<PathBuf> {
        let path = dir.join(name);
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        Ok(path)
    }
}

#[cfg(unix)]
pub(crate) fn is_path_writable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = match CString::new(path.as_os_str().as_bytes()) {
        Ok(p) => p,
        Err(_) => return false,
    };
    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}

#[cfg(not(unix))]
pub(crate) fn is_path_writable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}

/// Opaque reference to a storage location handed back to the caller
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Locator {
    Path(PathBuf),
    Uri(String),
}

impl Locator {
    /// Render as a `file://` URI (plain URIs are returned as-is)
    pub fn to_uri(&self) -> String {
        match self {
            Locator::Uri(uri) => uri.clone(),
            Locator::Path(path) => {
                let raw = path.to_string_lossy();
                let encoded: Vec<String> = raw
                    .split('/')
                    .map(|part| urlencoding::encode(part).into_owned())
                    .collect();
                format!("file://{}", encoded.join("/"))
            }
        }
    }

    /// Parse a locator from its stored string form.
    ///
    /// `file://` URIs decode to paths, anything else with a scheme stays a URI,
    /// bare strings are treated as paths.
    pub fn parse(value: &str) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        if let Some(rest) = value.strip_prefix("file://") {
            let decoded = urlencoding::decode(rest).ok()?;
            return Some(Locator::Path(PathBuf::from(decoded.into_owned())));
        }
        if value.contains("://") {
            return Some(Locator::Uri(value.to_string()));
        }
        Some(Locator::Path(PathBuf::from(value)))
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Locator::Path(path) => Some(path),
            Locator::Uri(_) => None,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Path(path) => write!(f, "{}", path.display()),
            Locator::Uri(uri) => write!(f, "{}", uri),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_uri_encodes_spaces() {
        let loc = Locator::Path(PathBuf::from("/home/me/My Docs/a#1.txt"));
        assert_eq!(loc.to_uri(), "file:///home/me/My%20Docs/a%231.txt");
    }

    #[test]
    fn test_locator_parse_file_uri() {
        let loc = Locator::parse("file:///home/me/My%20Docs").unwrap();
        assert_eq!(loc, Locator::Path(PathBuf::from("/home/me/My Docs")));
    }

    #[test]
    fn test_locator_parse_other_schemes_and_bare_paths() {
        assert_eq!(
            Locator::parse("content://tree/primary"),
            Some(Locator::Uri("content://tree/primary".to_string()))
        );
        assert_eq!(
            Locator::parse("/tmp/x"),
            Some(Locator::Path(PathBuf::from("/tmp/x")))
        );
        assert_eq!(Locator::parse(""), None);
    }

    #[test]
    fn test_std_storage_skips_metadata_unless_requested() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"hello").unwrap();

        let plain = StdStorage.read_dir(dir.path()).unwrap();
        assert_eq!(plain.len(), 1);
        assert_eq!(plain[0].size, None);
        assert_eq!(plain[0].modified, None);

        let full = StdStorage.read_dir_with(dir.path(), true).unwrap();
        assert_eq!(full[0].size, Some(5));
        assert!(full[0].modified.is_some());
    }

    #[test]
    fn test_std_storage_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = StdStorage.create_file(dir.path(), "new.csv").unwrap();
        assert!(path.exists());
        assert!(StdStorage.is_writable(dir.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_std_storage_follows_directory_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("real")).unwrap();
        std::fs::write(dir.path().join("file.txt"), b"x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("linked")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("file.txt"), dir.path().join("alias.txt"))
            .unwrap();

        let mut raw = StdStorage.read_dir(dir.path()).unwrap();
        raw.sort_by(|a, b| a.name.cmp(&b.name));
        let kinds: Vec<(&str, bool)> = raw.iter().map(|r| (r.name.as_str(), r.is_dir)).collect();

        assert_eq!(
            kinds,
            vec![
                ("alias.txt", false),
                ("file.txt", false),
                ("linked", true),
                ("real", true)
            ]
        );
    }

    #[test]
    fn test_read_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(StdStorage.read_dir(&dir.path().join("missing")).is_err());
    }
}
