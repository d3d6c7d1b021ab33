//! Picker Session
//!
//! Owns the navigation state of one open picker: the current directory, its
//! listing, the breadcrumb trail, the pending selection and the storage
//! roots. The presentation layer drives it; it holds no reference back.
//!
//! Listing can run inline (`navigate_to`) or be split around a background
//! read (`prepare_navigation` / `complete_navigation`). Either way a failed
//! read leaves every piece of state untouched.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::breadcrumb::{BreadcrumbTrail, NavigationDecision, SegmentTag};
use super::types::{DirectoryEntry, EntryKind, IconKind, PickerOutcome, SelectMode};
use crate::log_debug;
use crate::logic::errors::PickerError;
use crate::logic::file_name::validate_save_name;
use crate::logic::listing::{insert_entry, list_directory, sort_entries, to_entry, ListingOptions};
use crate::logic::mount::StorageRoots;
use crate::logic::path::{parent_within_roots, path_tag, root_for, segments_from_root};
use crate::storage::{DirectorySource, Locator, RawEntry};

/// Title of the synthetic parent row
pub const PARENT_ENTRY: &str = "..";

/// Where a navigation goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    /// The storage roots view
    Root,
    Dir(PathBuf),
}

impl NavTarget {
    pub fn from_tag(tag: &SegmentTag) -> Self {
        match tag {
            SegmentTag::Home => NavTarget::Root,
            SegmentTag::Path(p) => NavTarget::Dir(PathBuf::from(p)),
        }
    }
}

/// Everything a background worker needs to list a directory
#[derive(Debug, Clone)]
pub struct ListingJob {
    pub target: NavTarget,
    pub options: ListingOptions,
}

/// What happened when an entry was activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAction {
    Navigated,
    Selected,
    /// Nothing to do for this entry in the current mode
    Ignored,
}

/// Construction-time configuration of a session
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub mode: SelectMode,
    pub listing: ListingOptions,
    /// Folder and save selections must be writable
    pub require_writable: bool,
    /// Name offered in the save prompt
    pub suggested_name: Option<String>,
}

pub struct PickerSession {
    options: SessionOptions,
    source: Arc<dyn DirectorySource>,
    roots: StorageRoots,
    trail: BreadcrumbTrail,
    current: NavTarget,
    entries: Vec<DirectoryEntry>,
    pending: Option<DirectoryEntry>,
}

impl PickerSession {
    /// Create a session showing the root view. Roots are taken as computed
    /// by the caller and never refreshed during the session.
    pub fn new(options: SessionOptions, source: Arc<dyn DirectorySource>, roots: StorageRoots) -> Self {
        let mut session = Self {
            options,
            source,
            roots,
            trail: BreadcrumbTrail::new(),
            current: NavTarget::Root,
            entries: Vec::new(),
            pending: None,
        };
        session.entries = session.root_entries();
        session
    }

    // ============================================
    // ACCESSORS
    // ============================================

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn mode(&self) -> SelectMode {
        self.options.mode
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn trail(&self) -> &BreadcrumbTrail {
        &self.trail
    }

    pub fn roots(&self) -> &StorageRoots {
        &self.roots
    }

    pub fn current(&self) -> &NavTarget {
        &self.current
    }

    pub fn current_dir(&self) -> Option<&Path> {
        match &self.current {
            NavTarget::Root => None,
            NavTarget::Dir(p) => Some(p),
        }
    }

    pub fn is_at_root(&self) -> bool {
        self.current == NavTarget::Root
    }

    pub fn pending_selection(&self) -> Option<&DirectoryEntry> {
        self.pending.as_ref()
    }

    pub fn source(&self) -> Arc<dyn DirectorySource> {
        Arc::clone(&self.source)
    }

    // ============================================
    // NAVIGATION
    // ============================================

    /// List `target` and make it current. On failure nothing changes.
    pub fn navigate_to(&mut self, target: NavTarget) -> Result<(), PickerError> {
        let entries = self.read_target(&target)?;
        let previous = self.current.clone();
        self.commit(target, entries);
        self.sync_trail(&previous);
        Ok(())
    }

    /// First half of a background navigation: what to read
    pub fn prepare_navigation(&self, target: NavTarget) -> ListingJob {
        ListingJob {
            target,
            options: self.options.listing.clone(),
        }
    }

    /// Second half of a background navigation: apply the worker's result
    pub fn complete_navigation(
        &mut self,
        target: NavTarget,
        result: Result<Vec<DirectoryEntry>, PickerError>,
    ) -> Result<(), PickerError> {
        let entries = match target {
            NavTarget::Root => self.root_entries(),
            NavTarget::Dir(_) => result?,
        };
        let previous = self.current.clone();
        self.commit(target, entries);
        self.sync_trail(&previous);
        Ok(())
    }

    /// Breadcrumb click. The trail asks this session to navigate before it
    /// truncates; a failed listing vetoes the truncation. A tag that is not
    /// in the trail is rejected without listing anything.
    ///
    /// This is the inline form. The terminal app lists in the background
    /// instead (`prepare_navigation` with `NavTarget::from_tag`), where a
    /// failed `complete_navigation` leaves the trail untouched the same way.
    pub fn select_segment(&mut self, tag: &SegmentTag) -> Result<NavigationDecision, PickerError> {
        if !tag.is_home() && !self.trail.contains(tag) {
            log_debug(&format!("select_segment: {:?} is not in the trail", tag));
            return Ok(NavigationDecision::Reject);
        }

        let mut trail = std::mem::take(&mut self.trail);
        let mut failure = None;

        let decision = trail.select_segment(tag, |tag| {
            let target = NavTarget::from_tag(tag);
            match self.read_target(&target) {
                Ok(entries) => {
                    self.commit(target, entries);
                    NavigationDecision::Proceed
                }
                Err(e) => {
                    failure = Some(e);
                    NavigationDecision::Reject
                }
            }
        });
        self.trail = trail;

        match failure {
            Some(e) => Err(e),
            None => Ok(decision),
        }
    }

    /// Go one level up; from a storage root this is the root view
    pub fn go_parent(&mut self) -> Result<(), PickerError> {
        let target = self.parent_target();
        match target {
            Some(target) => self.navigate_to(target),
            None => Ok(()),
        }
    }

    /// Where `..` leads from the current directory (None in the root view)
    pub fn parent_target(&self) -> Option<NavTarget> {
        match &self.current {
            NavTarget::Root => None,
            NavTarget::Dir(p) => Some(match parent_within_roots(p, self.roots.roots()) {
                Some(parent) => NavTarget::Dir(parent),
                None => NavTarget::Root,
            }),
        }
    }

    /// Where activating `entry` would navigate, if anywhere
    pub fn entry_target(&self, entry: &DirectoryEntry) -> Option<NavTarget> {
        match entry.kind {
            EntryKind::ParentLink => self.parent_target(),
            EntryKind::Directory if self.is_at_root() => {
                entry.locator.as_path().map(|p| NavTarget::Dir(p.to_path_buf()))
            }
            EntryKind::Directory if self.options.listing.explore => self
                .current_dir()
                .map(|dir| NavTarget::Dir(dir.join(&entry.title))),
            _ => None,
        }
    }

    /// Activate a listing row: files become the pending selection,
    /// directories (and `..`) are navigated into.
    pub fn select_entry(&mut self, entry: &DirectoryEntry) -> Result<EntryAction, PickerError> {
        if entry.kind == EntryKind::File {
            if self.options.mode == SelectMode::ChooseFolder {
                return Ok(EntryAction::Ignored);
            }
            self.pending = Some(entry.clone());
            return Ok(EntryAction::Selected);
        }

        match self.entry_target(entry) {
            Some(target) => {
                self.navigate_to(target)?;
                Ok(EntryAction::Navigated)
            }
            None => Ok(EntryAction::Ignored),
        }
    }

    /// Re-apply ordering after the sort settings changed
    pub fn set_sort(&mut self, sort_mode: crate::SortMode, reverse: bool) {
        self.options.listing.sort_mode = sort_mode;
        self.options.listing.reverse = reverse;
        if !self.is_at_root() {
            sort_entries(&mut self.entries, &self.options.listing);
        }
    }

    // ============================================
    // COMMIT / CANCEL
    // ============================================

    /// Confirm the dialog
    pub fn accept(&mut self) -> Result<PickerOutcome, PickerError> {
        match self.options.mode {
            SelectMode::OpenFile => {
                let selected = self.pending.as_ref().ok_or(PickerError::SelectionRequired)?;
                Ok(PickerOutcome::Picked(selected.locator.clone()))
            }
            SelectMode::ChooseFolder => {
                let dir = self.current_dir().ok_or(PickerError::SelectionRequired)?;
                if self.options.require_writable && !self.source.is_writable(dir) {
                    return Err(PickerError::PermissionDenied {
                        path: dir.to_path_buf(),
                    });
                }
                Ok(PickerOutcome::Picked(Locator::Path(dir.to_path_buf())))
            }
            SelectMode::SaveFile => {
                let name = self.options.suggested_name.clone().unwrap_or_default();
                self.accept_save(&name)
            }
        }
    }

    /// Confirm a save: validate the name, check the directory, create the file
    pub fn accept_save(&mut self, name: &str) -> Result<PickerOutcome, PickerError> {
        let dir = self
            .current_dir()
            .ok_or(PickerError::SelectionRequired)?
            .to_path_buf();
        let name = validate_save_name(name, &self.options.listing.extension_filter)?;

        if !self.source.is_writable(&dir) {
            return Err(PickerError::PermissionDenied { path: dir });
        }

        let path = self
            .source
            .create_file(&dir, &name)
            .map_err(|e| PickerError::CreateFailed {
                path: dir.join(&name),
                source: e,
            })?;
        log_debug(&format!("accept_save: created {}", path.display()));

        if !self.entries.iter().any(|e| e.title == name) {
            let raw = RawEntry {
                name: name.clone(),
                path: path.clone(),
                is_dir: false,
                size: Some(0),
                modified: None,
            };
            let entry = to_entry(raw, &self.options.listing);
            insert_entry(&mut self.entries, entry, &self.options.listing);
        }

        Ok(PickerOutcome::PickedWithName(Locator::Path(path), name))
    }

    /// Close the dialog without a result
    pub fn cancel(&mut self) -> PickerOutcome {
        self.trail.clear();
        self.pending = None;
        PickerOutcome::Cancelled
    }

    // ============================================
    // RESTORE
    // ============================================

    /// JSON form of the trail for persisting between runs
    pub fn trail_state(&self) -> Option<String> {
        if self.trail.is_empty() {
            return None;
        }
        self.trail.to_json().ok()
    }

    /// Restore a persisted trail and open its last directory.
    ///
    /// Falls back to the root view when the state is unreadable or the
    /// directory can no longer be listed.
    pub fn restore_trail(&mut self, json: &str) -> Result<(), PickerError> {
        let trail = match BreadcrumbTrail::from_json(json) {
            Ok(trail) => trail,
            Err(e) => {
                log_debug(&format!("restore_trail: bad state: {}", e));
                return self.navigate_to(NavTarget::Root);
            }
        };
        let target = trail
            .last()
            .map(|s| NavTarget::from_tag(&s.tag))
            .unwrap_or(NavTarget::Root);

        match self.read_target(&target) {
            Ok(entries) => {
                self.commit(target, entries);
                self.trail = trail;
                Ok(())
            }
            Err(e) => {
                self.navigate_to(NavTarget::Root)?;
                Err(e)
            }
        }
    }

    // ============================================
    // INTERNALS
    // ============================================

    fn root_entries(&self) -> Vec<DirectoryEntry> {
        self.roots
            .roots()
            .iter()
            .map(|root| DirectoryEntry {
                title: root.title.clone(),
                kind: EntryKind::Directory,
                icon: IconKind::Folder,
                metadata: None,
                size: None,
                modified: None,
                locator: Locator::Path(root.root.clone()),
            })
            .collect()
    }

    fn read_target(&self, target: &NavTarget) -> Result<Vec<DirectoryEntry>, PickerError> {
        match target {
            NavTarget::Root => Ok(self.root_entries()),
            NavTarget::Dir(dir) => list_directory(self.source.as_ref(), dir, &self.options.listing),
        }
    }

    fn commit(&mut self, target: NavTarget, mut entries: Vec<DirectoryEntry>) {
        if let NavTarget::Dir(dir) = &target {
            if self.options.listing.explore {
                let parent = parent_within_roots(dir, self.roots.roots())
                    .unwrap_or_else(|| dir.clone());
                entries.insert(
                    0,
                    DirectoryEntry {
                        title: PARENT_ENTRY.to_string(),
                        kind: EntryKind::ParentLink,
                        icon: IconKind::Parent,
                        metadata: None,
                        size: None,
                        modified: None,
                        locator: Locator::Path(parent),
                    },
                );
            }
        }

        log_debug(&format!(
            "session: current {:?} -> {:?} ({} entries)",
            self.current,
            target,
            entries.len()
        ));
        self.current = target;
        self.entries = entries;
        self.pending = None;
    }

    /// Bring the trail in line with the directory just committed
    fn sync_trail(&mut self, previous: &NavTarget) {
        let dir = match &self.current {
            NavTarget::Root => {
                self.trail.clear();
                return;
            }
            NavTarget::Dir(dir) => dir.clone(),
        };

        let tag = SegmentTag::Path(path_tag(&dir));
        if self.trail.truncate_after(&tag) {
            return;
        }

        // One level down from the previous directory: append
        if let (NavTarget::Dir(prev), Some(name)) = (previous, dir.file_name()) {
            let last_is_prev = self
                .trail
                .last()
                .map(|s| s.tag == SegmentTag::Path(path_tag(prev)))
                .unwrap_or(false);
            if last_is_prev && dir.parent() == Some(prev.as_path()) {
                self.trail.add_segment(name.to_string_lossy().into_owned());
                return;
            }
        }

        self.rebuild_trail(&dir);
    }

    fn rebuild_trail(&mut self, dir: &Path) {
        self.trail.add_home();
        match root_for(dir, self.roots.roots()) {
            Some(root) => {
                self.trail
                    .add_root_segment(root.title.clone(), path_tag(&root.root));
                for name in segments_from_root(&root.root, dir) {
                    self.trail.add_segment(name);
                }
            }
            None => {
                let tag = path_tag(dir);
                self.trail.add_root_segment(tag.clone(), tag);
            }
        }
    }
}
