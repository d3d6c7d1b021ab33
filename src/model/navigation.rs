//! Navigation Model
//!
//! Cursor and focus state of the picker screen. The directory itself and
//! the breadcrumb trail live in the session; this only tracks what the
//! keyboard is pointing at.

/// Which pane receives arrow keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    List,
    Breadcrumb,
}

#[derive(Clone, Debug, Default)]
pub struct NavigationModel {
    pub focus: Focus,

    /// Highlighted row of the listing
    pub cursor: Option<usize>,

    /// Highlighted breadcrumb segment while the trail has focus
    pub segment_cursor: usize,
}

impl NavigationModel {
    pub fn new() -> Self {
        Self {
            focus: Focus::List,
            cursor: Some(0),
            segment_cursor: 0,
        }
    }

    pub fn in_breadcrumb(&self) -> bool {
        self.focus == Focus::Breadcrumb
    }

    /// Put the cursor back on the first row after a new listing arrived
    pub fn reset_for_listing(&mut self, len: usize) {
        self.focus = Focus::List;
        self.cursor = if len == 0 { None } else { Some(0) };
        self.segment_cursor = 0;
    }

    /// Focus the trail, highlighting its last segment
    pub fn focus_breadcrumb(&mut self, trail_len: usize) {
        if trail_len == 0 {
            return;
        }
        self.focus = Focus::Breadcrumb;
        self.segment_cursor = trail_len - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_for_listing() {
        let mut model = NavigationModel::new();
        model.cursor = Some(7);
        model.focus = Focus::Breadcrumb;

        model.reset_for_listing(0);
        assert_eq!(model.cursor, None);
        assert_eq!(model.focus, Focus::List);

        model.reset_for_listing(3);
        assert_eq!(model.cursor, Some(0));
    }

    #[test]
    fn test_focus_breadcrumb_needs_segments() {
        let mut model = NavigationModel::new();
        model.focus_breadcrumb(0);
        assert!(!model.in_breadcrumb());

        model.focus_breadcrumb(3);
        assert!(model.in_breadcrumb());
        assert_eq!(model.segment_cursor, 2);
    }
}
