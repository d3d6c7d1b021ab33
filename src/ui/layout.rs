use ratatui::layout::{Constraint, Direction, Layout, Rect};

use filepick::model::SelectMode;

/// Layout information for rendering
pub struct LayoutInfo {
    /// Breadcrumb trail (top)
    pub trail_area: Rect,
    /// Directory listing
    pub list_area: Rect,
    /// Hotkey legend (full width)
    pub legend_area: Rect,
    /// Bottom status line
    pub status_area: Rect,
}

/// Calculate the screen layout for one frame
pub fn calculate_layout(
    terminal_size: Rect,
    vim_mode: bool,
    mode: SelectMode,
    in_breadcrumb: bool,
) -> LayoutInfo {
    let legend_height =
        super::legend::calculate_legend_height(terminal_size.width, vim_mode, mode, in_breadcrumb);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Trail (border, segments, border)
            Constraint::Min(3),                // Listing
            Constraint::Length(legend_height), // Legend (exact fit for wrapped content)
            Constraint::Length(1),             // Status line
        ])
        .split(terminal_size);

    LayoutInfo {
        trail_area: chunks[0],
        list_area: chunks[1],
        legend_area: chunks[2],
        status_area: chunks[3],
    }
}

/// A rectangle of at most `width` x `height` centered in `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
