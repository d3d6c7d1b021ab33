//! Commit orchestration methods
//!
//! Ending the dialog (confirm, save, cancel), changing the base folder and
//! handing the whole pick to the system picker.

use crate::App;
use filepick::log_debug;
use filepick::logic::errors::PickerError;
use filepick::model::{EntryKind, NavTarget, PickerOutcome, SelectMode};
use filepick::services::{PickerKind, PickerRequest, PickerResult, PlatformPicker};
use filepick::storage::Locator;

impl App {
    /// Space: confirm according to the session mode
    pub(crate) fn confirm(&mut self) {
        match self.session.mode() {
            SelectMode::SaveFile => {
                if self.session.is_at_root() {
                    self.show_error(PickerError::SelectionRequired.into());
                    return;
                }
                let suggested = self.session.options().suggested_name.clone();
                self.model.ui.open_name_prompt(suggested.as_deref());
                return;
            }
            SelectMode::OpenFile if self.session.pending_selection().is_none() => {
                // Confirming on a highlighted file picks it
                if let Some(entry) = self.model.highlighted(self.session.entries()).cloned() {
                    if entry.kind == EntryKind::File {
                        if let Err(e) = self.session.select_entry(&entry) {
                            self.show_error(e.into());
                            return;
                        }
                    }
                }
            }
            _ => {}
        }

        match self.session.accept() {
            Ok(outcome) => self.finish(outcome),
            Err(e) => self.show_error(e.into()),
        }
    }

    /// Enter in the name prompt. The prompt stays open on errors.
    pub(crate) fn submit_name(&mut self) {
        let name = match &self.model.ui.name_prompt {
            Some(prompt) => prompt.input.clone(),
            None => return,
        };

        match self.session.accept_save(&name) {
            Ok(outcome) => {
                self.model.ui.name_prompt = None;
                self.finish(outcome);
            }
            Err(e) => self.show_error(e.into()),
        }
    }

    pub(crate) fn cancel(&mut self) {
        let outcome = self.session.cancel();
        self.finish(outcome);
    }

    fn finish(&mut self, outcome: PickerOutcome) {
        log_debug(&format!("finish: {:?}", outcome));
        self.worker.cancel();
        self.model.ui.outcome = Some(outcome);
    }

    /// 'c': change the base folder, explaining it once beforehand
    pub(crate) async fn change_base_folder(&mut self) {
        match self.settings.take_rationale_flag() {
            Ok(true) => {
                self.model.ui.rationale = true;
                return;
            }
            Ok(false) => {}
            Err(e) => self.show_error(e),
        }
        self.choose_base_folder().await;
    }

    /// Ask the system folder chooser for a new base folder and open it
    pub(crate) async fn choose_base_folder(&mut self) {
        let start_dir = self
            .session
            .current_dir()
            .map(|dir| dir.to_path_buf())
            .or_else(|| self.settings.base_path().ok().flatten());
        let mut request = PickerRequest::new(PickerKind::FolderTree).with_start_dir(start_dir);
        request.title = Some("Choose base folder".to_string());

        let path = match self.launch_picker(request).await {
            Ok(PickerResult::Picked(locator)) => match locator.as_path() {
                Some(path) => path.to_path_buf(),
                None => return,
            },
            Ok(PickerResult::Cancelled) => return,
            Err(e) => {
                self.show_error(e.into());
                return;
            }
        };

        if let Err(e) = self.settings.set_base_path(&path) {
            self.show_error(e);
        }
        self.model
            .show_toast(format!("Base folder: {}", path.display()));
        self.open_target(NavTarget::Dir(path));
    }

    /// 'n': let the system picker make the whole choice
    pub(crate) async fn use_system_picker(&mut self) {
        match self.pick_with_system_picker().await {
            PickerOutcome::Cancelled => {}
            PickerOutcome::Failed(message) => {
                self.model
                    .show_toast(format!("{}{}", crate::ui::toast::ERROR_PREFIX, message));
            }
            outcome => self.finish(outcome),
        }
    }

    pub(crate) async fn pick_with_system_picker(&mut self) -> PickerOutcome {
        let mode = self.session.mode();
        let kind = match mode {
            SelectMode::OpenFile => PickerKind::GetDocument,
            SelectMode::SaveFile => PickerKind::CreateDocument,
            SelectMode::ChooseFolder => PickerKind::FolderTree,
        };

        let options = self.session.options();
        let mut request = PickerRequest::new(kind)
            .with_mime_types(&self.config.mime_types)
            .with_extensions(&options.listing.extension_filter)
            .with_suggested_name(options.suggested_name.clone())
            .with_start_dir(self.session.current_dir().map(|dir| dir.to_path_buf()));
        request.title = Some(mode.title().to_string());

        let locator = match self.launch_picker(request).await {
            Ok(PickerResult::Picked(locator)) => locator,
            Ok(PickerResult::Cancelled) => return PickerOutcome::Cancelled,
            Err(e) => return PickerOutcome::Failed(e.to_string()),
        };

        if mode == SelectMode::ChooseFolder && self.session.options().require_writable {
            if let Some(dir) = locator.as_path() {
                if !self.session.source().is_writable(dir) {
                    let error = PickerError::PermissionDenied {
                        path: dir.to_path_buf(),
                    };
                    return PickerOutcome::Failed(error.to_string());
                }
            }
        }
        if mode != SelectMode::SaveFile {
            return PickerOutcome::Picked(locator);
        }

        // Save: the picker only names the file; create it like the built-in prompt does
        let path = match locator.as_path() {
            Some(path) => path.to_path_buf(),
            None => return PickerOutcome::Picked(locator),
        };
        let (dir, name) = match (path.parent(), path.file_name()) {
            (Some(dir), Some(name)) => (dir.to_path_buf(), name.to_string_lossy().into_owned()),
            _ => return PickerOutcome::Failed(format!("not a file path: {}", path.display())),
        };
        match self.session.source().create_file(&dir, &name) {
            Ok(created) => PickerOutcome::PickedWithName(Locator::Path(created), name),
            Err(e) => PickerOutcome::Failed(
                PickerError::CreateFailed { path, source: e }.to_string(),
            ),
        }
    }

    async fn launch_picker(&self, request: PickerRequest) -> Result<PickerResult, PickerError> {
        let picker = self.picker.clone();
        let program = picker.program().to_string();
        tokio::task::spawn_blocking(move || picker.launch(&request))
            .await
            .unwrap_or_else(|e| {
                Err(PickerError::PickerFailed {
                    program,
                    reason: e.to_string(),
                })
            })
    }

    /// Remember where the pick happened for the next run
    pub(crate) fn persist_state(&self, outcome: &PickerOutcome) {
        let locator = match outcome {
            PickerOutcome::Picked(locator) | PickerOutcome::PickedWithName(locator, _) => locator,
            PickerOutcome::Cancelled | PickerOutcome::Failed(_) => return,
        };

        if let Err(e) = self.settings.set_last_folder_uri(&locator.to_uri()) {
            log_debug(&format!("persist_state: last folder: {:#}", e));
        }
        let trail = self.session.trail_state();
        if let Err(e) = self.settings.set_breadcrumb_state(trail.as_deref()) {
            log_debug(&format!("persist_state: trail: {:#}", e));
        }
    }
}
