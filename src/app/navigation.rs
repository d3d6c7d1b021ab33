//! Navigation orchestration methods
//!
//! Directory changes go through the background worker: the session prepares
//! a job, the worker lists it, and the response is applied when it arrives.

use crate::App;
use filepick::log_debug;
use filepick::logic::selection;
use filepick::model::{EntryAction, EntryKind, Focus, NavTarget};
use filepick::services::ListingResponse;

/// Rows moved by PgUp/PgDn
pub(crate) const PAGE_SIZE: usize = 20;

impl App {
    /// Ask the worker to list `target`, superseding any pending listing
    pub(crate) fn open_target(&mut self, target: NavTarget) {
        let job = self.session.prepare_navigation(target);
        self.worker.request(job);
        self.model.ui.loading = true;
    }

    pub(crate) fn handle_listing_response(&mut self, response: ListingResponse) {
        if !self.worker.is_current(&response) {
            log_debug(&format!(
                "DEBUG [Listing]: dropping stale gen={}",
                response.generation
            ));
            return;
        }
        self.model.ui.loading = false;

        match self
            .session
            .complete_navigation(response.target, response.entries)
        {
            Ok(()) => {
                let entries = self.session.entries();
                self.model.navigation.reset_for_listing(entries.len());
                if let Some(title) = self.focus_after_listing.take() {
                    if let Some(idx) = entries.iter().position(|e| e.title == title) {
                        self.model.navigation.cursor = Some(idx);
                    }
                }
            }
            Err(e) => {
                self.focus_after_listing = None;
                self.show_error(e.into());
            }
        }
    }

    /// Enter/Right on the highlighted row
    pub(crate) fn activate_highlighted(&mut self) {
        let entry = match self.model.highlighted(self.session.entries()) {
            Some(entry) => entry.clone(),
            None => return,
        };

        if entry.kind == EntryKind::File {
            match self.session.select_entry(&entry) {
                Ok(EntryAction::Selected) => {}
                Ok(_) => self
                    .model
                    .show_toast("Folders only in this mode".to_string()),
                Err(e) => self.show_error(e.into()),
            }
            return;
        }

        if entry.kind == EntryKind::ParentLink {
            self.go_parent();
            return;
        }

        match self.session.entry_target(&entry) {
            Some(target) => self.open_target(target),
            None => self
                .model
                .show_toast("Browsing sub-folders is disabled".to_string()),
        }
    }

    /// Left/Backspace: list the parent and keep the cursor on the folder we left
    pub(crate) fn go_parent(&mut self) {
        let target = match self.session.parent_target() {
            Some(target) => target,
            None => return,
        };
        let to_roots = target == NavTarget::Root;
        let focus = self.session.current_dir().and_then(|dir| {
            if to_roots {
                self.session
                    .roots()
                    .roots()
                    .iter()
                    .find(|r| r.root == dir)
                    .map(|r| r.title.clone())
            } else {
                dir.file_name().map(|n| n.to_string_lossy().into_owned())
            }
        });
        self.focus_after_listing = focus;
        self.open_target(target);
    }

    /// Enter on the highlighted breadcrumb segment
    pub(crate) fn select_highlighted_segment(&mut self) {
        let tag = match self
            .session
            .trail()
            .segments()
            .get(self.model.navigation.segment_cursor)
        {
            Some(segment) => segment.tag.clone(),
            None => return,
        };
        self.open_target(NavTarget::from_tag(&tag));
    }

    pub(crate) fn toggle_focus(&mut self) {
        match self.model.navigation.focus {
            Focus::List => {
                let len = self.session.trail().len();
                self.model.navigation.focus_breadcrumb(len);
            }
            Focus::Breadcrumb => self.model.navigation.focus = Focus::List,
        }
    }

    pub(crate) fn move_segment_cursor(&mut self, delta: isize) {
        let len = self.session.trail().len();
        if len == 0 {
            return;
        }
        let current = self.model.navigation.segment_cursor as isize;
        self.model.navigation.segment_cursor = (current + delta).clamp(0, len as isize - 1) as usize;
    }

    pub(crate) fn next_item(&mut self) {
        let len = self.session.entries().len();
        self.model.navigation.cursor = selection::step(self.model.navigation.cursor, 1, len);
    }

    pub(crate) fn previous_item(&mut self) {
        let len = self.session.entries().len();
        self.model.navigation.cursor = selection::step(self.model.navigation.cursor, -1, len);
    }

    pub(crate) fn page_down(&mut self, page_size: usize) {
        let len = self.session.entries().len();
        self.model.navigation.cursor = selection::page(self.model.navigation.cursor, page_size, true, len);
    }

    pub(crate) fn page_up(&mut self, page_size: usize) {
        let len = self.session.entries().len();
        self.model.navigation.cursor = selection::page(self.model.navigation.cursor, page_size, false, len);
    }

    pub(crate) fn jump_to_first(&mut self) {
        let len = self.session.entries().len();
        self.model.navigation.cursor = selection::clamp(Some(0), len);
    }

    pub(crate) fn jump_to_last(&mut self) {
        let len = self.session.entries().len();
        self.model.navigation.cursor = selection::clamp(Some(usize::MAX), len);
    }

    /// Cycle sort mode, keeping the highlighted row under the cursor
    pub(crate) fn cycle_sort_mode(&mut self) {
        self.model.ui.sort_mode = self.model.ui.sort_mode.next();
        self.apply_sort();
        self.model
            .show_toast(format!("Sort: {}", self.model.ui.sort_mode.as_str()));
    }

    pub(crate) fn toggle_sort_reverse(&mut self) {
        self.model.ui.sort_reverse = !self.model.ui.sort_reverse;
        self.apply_sort();
    }

    fn apply_sort(&mut self) {
        let selected = self
            .model
            .highlighted(self.session.entries())
            .map(|e| e.locator.clone());

        self.session
            .set_sort(self.model.ui.sort_mode, self.model.ui.sort_reverse);

        if let Some(locator) = selected {
            self.model.navigation.cursor = self
                .session
                .entries()
                .iter()
                .position(|e| e.locator == locator)
                .or(self.model.navigation.cursor);
        }
    }
}
