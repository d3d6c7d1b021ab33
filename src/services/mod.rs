//! Background and external services
//!
//! - listing: Directory reads off the UI thread
//! - picker: Delegation to an external file dialog program

pub mod listing;
pub mod picker;

pub use listing::{ListingResponse, ListingWorker};
pub use picker::{CommandPicker, PickerKind, PickerRequest, PickerResult, PlatformPicker};
