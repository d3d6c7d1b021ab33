//! Tests for listing real directories
//!
//! Builds small trees in a temp dir and lists them through `StdStorage`:
//!
//! ```text
//! tmp/
//!   Photos/
//!   archive/
//!   budget.csv     (12 bytes)
//!   report.txt     (3 bytes)
//!   Zeta.CSV
//! ```

use filepick::logic::errors::PickerError;
use filepick::logic::listing::{list_directory, ListingOptions};
use filepick::model::{DirectoryEntry, EntryKind, IconKind};
use filepick::storage::{DirectorySource, Locator, StdStorage};
use filepick::SortMode;
use std::fs;
use tempfile::TempDir;

/// Helper: create the sample tree
fn sample_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("Photos")).unwrap();
    fs::create_dir(dir.path().join("archive")).unwrap();
    fs::write(dir.path().join("budget.csv"), b"a,b\n1,2\n3,4\n").unwrap();
    fs::write(dir.path().join("report.txt"), b"abc").unwrap();
    fs::write(dir.path().join("Zeta.CSV"), b"").unwrap();
    dir
}

fn explore() -> ListingOptions {
    ListingOptions {
        explore: true,
        ..Default::default()
    }
}

fn titles(entries: &[DirectoryEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.title.as_str()).collect()
}

#[test]
fn test_directories_listed_before_files() {
    let tree = sample_tree();

    let entries = list_directory(&StdStorage, tree.path(), &explore()).unwrap();

    assert_eq!(
        titles(&entries),
        vec!["archive", "Photos", "budget.csv", "report.txt", "Zeta.CSV"]
    );
    assert_eq!(entries[0].kind, EntryKind::Directory);
    assert_eq!(entries[2].kind, EntryKind::File);
}

#[test]
fn test_extension_filter_is_case_sensitive_and_keeps_directories() {
    let tree = sample_tree();
    let options = ListingOptions {
        extension_filter: vec![".csv".to_string()],
        ..explore()
    };

    let entries = list_directory(&StdStorage, tree.path(), &options).unwrap();

    assert_eq!(titles(&entries), vec!["archive", "Photos", "budget.csv"]);
}

#[test]
fn test_without_explore_only_files_are_listed() {
    let tree = sample_tree();

    let entries = list_directory(&StdStorage, tree.path(), &ListingOptions::default()).unwrap();

    assert!(entries.iter().all(|e| e.kind == EntryKind::File));
    assert_eq!(entries.len(), 3);
}

#[test]
fn test_size_sort_puts_largest_file_first() {
    let tree = sample_tree();
    let options = ListingOptions {
        include_metadata: true,
        sort_mode: SortMode::FileSize,
        ..explore()
    };

    let entries = list_directory(&StdStorage, tree.path(), &options).unwrap();
    let files: Vec<&str> = entries
        .iter()
        .filter(|e| e.kind == EntryKind::File)
        .map(|e| e.title.as_str())
        .collect();

    assert_eq!(files, vec!["budget.csv", "report.txt", "Zeta.CSV"]);
}

#[test]
fn test_metadata_column_only_when_requested() {
    let tree = sample_tree();

    let plain = list_directory(&StdStorage, tree.path(), &explore()).unwrap();
    assert!(plain.iter().all(|e| e.metadata.is_none()));

    let options = ListingOptions {
        include_metadata: true,
        ..explore()
    };
    let detailed = list_directory(&StdStorage, tree.path(), &options).unwrap();
    let report = detailed.iter().find(|e| e.title == "report.txt").unwrap();
    assert_eq!(report.size, Some(3));
    assert!(report.metadata.as_deref().unwrap().starts_with("3 b"));
}

#[test]
fn test_icon_map_first_matching_suffix_wins() {
    let tree = sample_tree();
    let mut options = explore();
    options.icon_map.insert(".csv".to_string(), "table".to_string());
    options.icon_map.insert("budget.csv".to_string(), "money".to_string());

    let entries = list_directory(&StdStorage, tree.path(), &options).unwrap();
    let budget = entries.iter().find(|e| e.title == "budget.csv").unwrap();
    let report = entries.iter().find(|e| e.title == "report.txt").unwrap();

    assert_eq!(budget.icon, IconKind::Custom("table".to_string()));
    assert_eq!(report.icon, IconKind::File);
}

#[test]
fn test_entries_carry_full_path_locators() {
    let tree = sample_tree();

    let entries = list_directory(&StdStorage, tree.path(), &explore()).unwrap();
    let report = entries.iter().find(|e| e.title == "report.txt").unwrap();

    assert_eq!(report.locator, Locator::Path(tree.path().join("report.txt")));
}

#[test]
fn test_missing_directory_is_a_read_error() {
    let tree = sample_tree();
    let missing = tree.path().join("nope");

    let err = list_directory(&StdStorage, &missing, &explore()).unwrap_err();

    match err {
        PickerError::DirectoryRead { path, .. } => assert_eq!(path, missing),
        other => panic!("expected DirectoryRead, got {:?}", other),
    }
}

#[test]
fn test_create_file_does_not_truncate_existing() {
    let tree = sample_tree();

    let path = StdStorage.create_file(tree.path(), "report.txt").unwrap();

    assert_eq!(path, tree.path().join("report.txt"));
    assert_eq!(fs::read(&path).unwrap(), b"abc");
}

#[test]
fn test_text_filter_without_explore_lists_single_report() {
    let tmp = TempDir::new().unwrap();
    let docs = tmp.path().join("docs");
    fs::create_dir_all(docs.join("Archive")).unwrap();
    fs::write(docs.join("report.txt"), b"r").unwrap();
    fs::write(docs.join("image.png"), b"p").unwrap();
    let options = ListingOptions {
        extension_filter: vec![".txt".to_string()],
        explore: false,
        ..Default::default()
    };

    let entries = list_directory(&StdStorage, &docs, &options).unwrap();

    assert_eq!(titles(&entries), vec!["report.txt"]);
}

#[test]
fn test_sorting_twice_changes_nothing() {
    let tree = sample_tree();
    let options = ListingOptions {
        include_metadata: true,
        sort_mode: SortMode::LastModified,
        ..explore()
    };

    let mut entries = list_directory(&StdStorage, tree.path(), &options).unwrap();
    let once = entries.clone();
    filepick::logic::listing::sort_entries(&mut entries, &options);

    assert_eq!(entries, once);
}
