//! App Orchestration Methods
//!
//! `impl App` blocks grouped by domain. Each one orchestrates between the
//! screen model, the picker session, the listing worker and settings:
//! - navigation: Listing requests, cursor movement, breadcrumb selection
//! - commit: Confirm, save, cancel, base folder and system picker

pub(crate) mod commit;
pub(crate) mod navigation;
