//! Event Handlers
//!
//! - keyboard: User keyboard input
//!
//! Listing responses from the background worker are applied in
//! `app::navigation`.

pub mod keyboard;
