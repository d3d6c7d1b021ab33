//! Directory listing
//!
//! Turns one folder's raw children into the ordered, filtered rows the
//! picker shows. Reading is the only side effect.

use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use super::errors::PickerError;
use super::formatting::entry_metadata;
use super::sorting::{compare_entries, compare_partition};
use crate::model::types::{DirectoryEntry, EntryKind, IconKind};
use crate::storage::{DirectorySource, Locator, RawEntry};
use crate::SortMode;

/// Caller-supplied row ordering, applied within each partition
pub type EntryComparator = Arc<dyn Fn(&DirectoryEntry, &DirectoryEntry) -> Ordering + Send + Sync>;

/// How one folder is listed
#[derive(Clone, Default)]
pub struct ListingOptions {
    /// Allowed name suffixes (case-sensitive). Empty means everything.
    pub extension_filter: Vec<String>,
    /// Suffix -> icon name. The first registered matching suffix wins.
    pub icon_map: IndexMap<String, String>,
    /// Compute the size/date column (costs a stat per entry)
    pub include_metadata: bool,
    /// List sub-directories (directories first); files only when off
    pub explore: bool,
    pub sort_mode: SortMode,
    pub reverse: bool,
    /// Overrides `sort_mode`/`reverse` when set
    pub comparator: Option<EntryComparator>,
}

impl fmt::Debug for ListingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListingOptions")
            .field("extension_filter", &self.extension_filter)
            .field("icon_map", &self.icon_map)
            .field("include_metadata", &self.include_metadata)
            .field("explore", &self.explore)
            .field("sort_mode", &self.sort_mode)
            .field("reverse", &self.reverse)
            .field("comparator", &self.comparator.as_ref().map(|_| "<custom>"))
            .finish()
    }
}

/// Whether a child survives the extension filter. Directories always do.
pub fn passes_filter(name: &str, is_dir: bool, filter: &[String]) -> bool {
    if is_dir || filter.is_empty() {
        return true;
    }
    filter.iter().any(|suffix| name.ends_with(suffix.as_str()))
}

/// Icon for a file name: the first registered suffix that matches, else the default
pub fn resolve_icon(name: &str, icon_map: &IndexMap<String, String>) -> IconKind {
    icon_map
        .iter()
        .find(|(suffix, _)| name.ends_with(suffix.as_str()))
        .map(|(_, icon)| IconKind::Custom(icon.clone()))
        .unwrap_or(IconKind::File)
}

/// Stable sort: partition first, then the caller's comparator or the sort mode
pub fn sort_entries(entries: &mut [DirectoryEntry], options: &ListingOptions) {
    match &options.comparator {
        Some(cmp) => entries.sort_by(|a, b| compare_partition(a, b).then_with(|| cmp(a, b))),
        None => {
            entries.sort_by(|a, b| compare_entries(a, b, options.sort_mode, options.reverse))
        }
    }
}

/// Add one row to an existing listing and re-sort the whole list
pub fn insert_entry(entries: &mut Vec<DirectoryEntry>, entry: DirectoryEntry, options: &ListingOptions) {
    entries.push(entry);
    sort_entries(entries, options);
}

/// Convert a raw child into a row (no filtering)
pub fn to_entry(raw: RawEntry, options: &ListingOptions) -> DirectoryEntry {
    let (kind, icon) = if raw.is_dir {
        (EntryKind::Directory, IconKind::Folder)
    } else {
        (EntryKind::File, resolve_icon(&raw.name, &options.icon_map))
    };
    let metadata = if options.include_metadata {
        entry_metadata(raw.size, raw.modified)
    } else {
        None
    };

    DirectoryEntry {
        title: raw.name,
        kind,
        icon,
        metadata,
        size: raw.size,
        modified: raw.modified,
        locator: Locator::Path(raw.path),
    }
}

/// Filter, convert and sort raw children
pub fn build_listing(raw: Vec<RawEntry>, options: &ListingOptions) -> Vec<DirectoryEntry> {
    let mut entries: Vec<DirectoryEntry> = raw
        .into_iter()
        .filter(|r| options.explore || !r.is_dir)
        .filter(|r| passes_filter(&r.name, r.is_dir, &options.extension_filter))
        .map(|r| to_entry(r, options))
        .collect();
    sort_entries(&mut entries, options);
    entries
}

/// Read `dir` from `source` and produce its ordered rows
pub fn list_directory(
    source: &dyn DirectorySource,
    dir: &Path,
    options: &ListingOptions,
) -> Result<Vec<DirectoryEntry>, PickerError> {
    let raw = source
        .read_dir_with(dir, options.include_metadata)
        .map_err(|e| PickerError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

    crate::log_debug(&format!(
        "list_directory: {} -> {} raw entries",
        dir.display(),
        raw.len()
    ));

    Ok(build_listing(raw, options))
}
