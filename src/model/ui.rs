//! UI Model
//!
//! Preferences, prompts and transient messages of the picker screen.

use std::time::Instant;

use super::types::PickerOutcome;
use crate::SortMode;

/// How long a toast stays on screen
pub const TOAST_MILLIS: u128 = 1500;

/// Text typed into the save-name prompt
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamePrompt {
    pub input: String,
}

#[derive(Clone, Debug)]
pub struct UiModel {
    // ============================================
    // PREFERENCES
    // ============================================
    pub sort_mode: SortMode,
    pub sort_reverse: bool,
    pub vim_mode: bool,

    /// Pending 'g' of a vim 'gg'
    pub pending_g: bool,

    // ============================================
    // DIALOGS
    // ============================================
    /// Save-name prompt, open while the user types a file name
    pub name_prompt: Option<NamePrompt>,

    /// One-time explanation shown before the system folder chooser opens
    pub rationale: bool,

    /// Help overlay
    pub show_help: bool,

    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    // ============================================
    // STATE
    // ============================================
    /// A background listing is in flight
    pub loading: bool,

    /// Set once the dialog has produced a result
    pub outcome: Option<PickerOutcome>,
}

impl UiModel {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            sort_mode: SortMode::Alphabetical,
            sort_reverse: false,
            vim_mode,
            pending_g: false,
            name_prompt: None,
            rationale: false,
            show_help: false,
            toast_message: None,
            loading: false,
            outcome: None,
        }
    }

    pub fn has_modal(&self) -> bool {
        self.name_prompt.is_some() || self.rationale || self.show_help
    }

    pub fn close_all_modals(&mut self) {
        self.name_prompt = None;
        self.rationale = false;
        self.show_help = false;
    }

    pub fn open_name_prompt(&mut self, suggested: Option<&str>) {
        self.name_prompt = Some(NamePrompt {
            input: suggested.unwrap_or_default().to_string(),
        });
    }

    pub fn should_quit(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now()));
    }

    pub fn should_dismiss_toast(&self) -> bool {
        match &self.toast_message {
            Some((_, timestamp)) => timestamp.elapsed().as_millis() >= TOAST_MILLIS,
            None => false,
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}
