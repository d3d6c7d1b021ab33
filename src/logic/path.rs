//! Path Utilities
//!
//! Relates concrete directories to the session's storage roots.

use std::path::{Component, Path, PathBuf};

use super::mount::MountPoint;

/// The deepest storage root containing `path`
pub fn root_for<'a>(path: &Path, roots: &'a [MountPoint]) -> Option<&'a MountPoint> {
    roots
        .iter()
        .filter(|m| path.starts_with(&m.root))
        .max_by_key(|m| m.root.components().count())
}

/// Parent of `path` without leaving its storage root.
///
/// `None` means the root view: `path` is a root, or lies outside every root.
pub fn parent_within_roots(path: &Path, roots: &[MountPoint]) -> Option<PathBuf> {
    let root = root_for(path, roots)?;
    if path == root.root {
        return None;
    }
    path.parent()
        .filter(|parent| parent.starts_with(&root.root))
        .map(Path::to_path_buf)
}

/// Names of the directories between `root` (exclusive) and `path` (inclusive)
///
/// # Example
/// ```
/// use std::path::Path;
/// use filepick::logic::path::segments_from_root;
///
/// let names = segments_from_root(Path::new("/media/usb"), Path::new("/media/usb/docs/2024"));
/// assert_eq!(names, vec!["docs".to_string(), "2024".to_string()]);
/// ```
pub fn segments_from_root(root: &Path, path: &Path) -> Vec<String> {
    match path.strip_prefix(root) {
        Ok(rest) => rest
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Breadcrumb tag string for a path
pub fn path_tag(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
