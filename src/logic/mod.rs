//! Business Logic
//!
//! Pure picker logic that can be unit tested without a terminal:
//! - errors: Picker error taxonomy and message formatting
//! - file_name: Save-name validation
//! - formatting: Size and date columns
//! - listing: Filtering, icon resolution and sorting of one folder
//! - mount: Storage root detection and de-duplication
//! - path: Relating directories to storage roots
//! - selection: Cursor movement in the listing
//! - sorting: Row comparison per sort mode

pub mod errors;
pub mod file_name;
pub mod formatting;
pub mod listing;
pub mod mount;
pub mod path;
pub mod selection;
pub mod sorting;
