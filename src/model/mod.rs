//! Picker Model
//!
//! State of one picker dialog, split in two:
//!
//! - **PickerSession**: directory, listing, breadcrumb trail, selection and
//!   the commit/cancel rules. Talks to storage.
//! - **Model**: pure, cloneable screen state (cursor, focus, prompts, toast)
//!   composed of **NavigationModel** and **UiModel**.

pub mod breadcrumb;
pub mod navigation;
pub mod session;
pub mod types;
pub mod ui;

pub use breadcrumb::{BreadcrumbTrail, NavigationDecision, PathSegment, SegmentTag};
pub use navigation::{Focus, NavigationModel};
pub use session::{EntryAction, ListingJob, NavTarget, PickerSession, SessionOptions};
pub use types::*;
pub use ui::UiModel;

/// Root screen model
#[derive(Clone, Debug)]
pub struct Model {
    pub navigation: NavigationModel,
    pub ui: UiModel,
}

impl Model {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            navigation: NavigationModel::new(),
            ui: UiModel::new(vim_mode),
        }
    }

    /// Highlighted row of `entries`, if the cursor is on one
    pub fn highlighted<'a>(&self, entries: &'a [DirectoryEntry]) -> Option<&'a DirectoryEntry> {
        self.navigation.cursor.and_then(|i| entries.get(i))
    }

    pub fn has_modal(&self) -> bool {
        self.ui.has_modal()
    }

    pub fn show_toast(&mut self, message: String) {
        self.ui.show_toast(message);
    }
}
