//! Shared types for the Model
//!
//! These types are used across the listing, the session and the UI and
//! represent the picker's fundamental domain concepts.

use serde::Deserialize;
use std::time::SystemTime;

use crate::storage::Locator;

/// What the picker session is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectMode {
    /// Pick an existing file
    #[default]
    OpenFile,
    /// Name a new file inside a chosen folder
    SaveFile,
    /// Pick a folder
    ChooseFolder,
}

impl SelectMode {
    pub fn title(&self) -> &str {
        match self {
            SelectMode::OpenFile => "Open file",
            SelectMode::SaveFile => "Save file",
            SelectMode::ChooseFolder => "Choose folder",
        }
    }
}

/// Kind of row shown in a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    /// The synthetic ".." row
    ParentLink,
}

/// Icon resolved for a listing row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconKind {
    Folder,
    /// Default file icon
    File,
    /// Icon name registered in the extension -> icon map
    Custom(String),
    Parent,
}

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// File or folder name
    pub title: String,
    pub kind: EntryKind,
    pub icon: IconKind,
    /// Human-readable size + modified date, only when metadata was requested
    pub metadata: Option<String>,
    pub size: Option<u64>,
    pub modified: Option<SystemTime>,
    /// Underlying storage location
    pub locator: Locator,
}

impl DirectoryEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_parent_link(&self) -> bool {
        self.kind == EntryKind::ParentLink
    }
}

/// Final result delivered to whoever opened the picker.
///
/// Exactly one variant: a value, a cancellation or an error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    Picked(Locator),
    PickedWithName(Locator, String),
    Cancelled,
    Failed(String),
}
