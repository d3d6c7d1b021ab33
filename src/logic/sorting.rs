//! Sorting comparison logic
//!
//! Pure functions for ordering listing rows across sort modes.

use crate::model::types::{DirectoryEntry, EntryKind};
use crate::SortMode;
use std::cmp::Ordering;

/// Partition rank: ".." first, then directories, then files
fn kind_rank(kind: EntryKind) -> u8 {
    match kind {
        EntryKind::ParentLink => 0,
        EntryKind::Directory => 1,
        EntryKind::File => 2,
    }
}

/// Case-insensitive title comparison
pub fn compare_titles(a: &DirectoryEntry, b: &DirectoryEntry) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
}

/// Compare two rows by partition only (parent link, directories, files)
pub fn compare_partition(a: &DirectoryEntry, b: &DirectoryEntry) -> Ordering {
    kind_rank(a.kind).cmp(&kind_rank(b.kind))
}

/// Compare two listing rows according to the given sort mode
///
/// # Sort Rules
/// - ".." always first, then directories, then files
/// - Within a partition, apply the sort mode
/// - Case-insensitive name tie-breaking for LastModified and FileSize
/// - `reverse` flips the within-partition order only
pub fn compare_entries(
    a: &DirectoryEntry,
    b: &DirectoryEntry,
    sort_mode: SortMode,
    reverse: bool,
) -> Ordering {
    let partition = compare_partition(a, b);
    if partition != Ordering::Equal {
        return partition;
    }

    let result = match sort_mode {
        SortMode::Alphabetical => compare_titles(a, b),
        SortMode::LastModified => {
            // Newest first
            b.modified
                .cmp(&a.modified)
                .then_with(|| compare_titles(a, b))
        }
        SortMode::FileSize => {
            // Largest first
            b.size.cmp(&a.size).then_with(|| compare_titles(a, b))
        }
    };

    if reverse {
        result.reverse()
    } else {
        result
    }
}
