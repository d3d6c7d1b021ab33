//! Terminal file and folder picker
//!
//! Exposes the navigation core (listing, breadcrumbs, session) and the
//! services the binary drives it with.

pub mod config;
pub mod logic;
pub mod model;
pub mod services;
pub mod settings;
pub mod storage;

use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for debug mode, set once from `--debug`
pub static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

/// Append a timestamped line to the debug log (no-op unless debug mode is on)
pub fn log_debug(msg: &str) {
    if !DEBUG_MODE.load(Ordering::Relaxed) {
        return;
    }

    use std::fs::OpenOptions;
    use std::io::Write;
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(debug_log_path())
    {
        let now = chrono::Local::now().format("%H:%M:%S%.3f");
        let _ = writeln!(file, "[{}] {}", now, msg);
    }
}

/// Platform-specific debug log path
pub fn debug_log_path() -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push("filepick-debug.log");
    path
}

/// Sort mode for directory listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Alphabetical, // Case-insensitive A-Z
    LastModified, // Newest first
    FileSize,     // Largest first
}

impl SortMode {
    pub fn as_str(&self) -> &str {
        match self {
            SortMode::Alphabetical => "A-Z",
            SortMode::LastModified => "Timestamp",
            SortMode::FileSize => "Size",
        }
    }

    /// Next mode in the cycle used by the sort hotkey
    pub fn next(self) -> Self {
        match self {
            SortMode::Alphabetical => SortMode::LastModified,
            SortMode::LastModified => SortMode::FileSize,
            SortMode::FileSize => SortMode::Alphabetical,
        }
    }
}
