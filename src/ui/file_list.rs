use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::icons::IconRenderer;
use filepick::model::DirectoryEntry;

/// Padding and text of the metadata column for a row whose name takes
/// `name_width` columns. Drops the trailing date and time when they do not
/// fit, and everything when even the first field does not.
pub fn metadata_column(name_width: usize, info: &str, available_width: usize) -> Option<(usize, &str)> {
    let spacing = 2;
    let size_only = info.rsplitn(3, ' ').last().unwrap_or(info);
    [info, size_only]
        .into_iter()
        .find(|text| name_width + spacing + text.width() <= available_width)
        .map(|text| (available_width - name_width - text.width(), text))
}

/// Build a row: icon, name, and the right-aligned metadata column when it fits
fn build_list_item<'a>(
    entry: &'a DirectoryEntry,
    icon: Span<'static>,
    panel_width: u16,
    is_pending: bool,
) -> ListItem<'a> {
    let marker = if is_pending {
        Span::styled("✓ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::raw("  ")
    };

    let name_style = if entry.is_dir() {
        Style::default().fg(Color::Blue)
    } else {
        Style::default()
    };

    let name_width = marker.content.width() + icon.content.width() + entry.title.width();
    let mut line_spans = vec![marker, icon, Span::styled(entry.title.as_str(), name_style)];

    // borders(2) + highlight symbol(2) + padding(2)
    let available_width = panel_width.saturating_sub(6) as usize;
    if let Some((padding, info)) = entry
        .metadata
        .as_deref()
        .and_then(|info| metadata_column(name_width, info, available_width))
    {
        line_spans.push(Span::raw(" ".repeat(padding)));
        line_spans.push(Span::styled(info, Style::default().fg(Color::Rgb(120, 120, 120))));
    }

    ListItem::new(Line::from(line_spans))
}

/// Render the directory listing
#[allow(clippy::too_many_arguments)]
pub fn render_file_list(
    f: &mut Frame,
    area: Rect,
    entries: &[DirectoryEntry],
    state: &mut ListState,
    title: &str,
    is_focused: bool,
    at_root: bool,
    pending: Option<&DirectoryEntry>,
    loading: bool,
    icon_renderer: &IconRenderer,
) {
    let border_color = if is_focused { Color::Cyan } else { Color::Gray };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if entries.is_empty() {
        let message = if loading {
            "Loading..."
        } else if at_root {
            "No storage found"
        } else {
            "Empty folder"
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let list_items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let icon = icon_renderer.entry_icon(&entry.icon, at_root);
            let is_pending = pending.map(|p| p.locator == entry.locator).unwrap_or(false);
            build_list_item(entry, icon, area.width, is_pending)
        })
        .collect();

    let mut list = List::new(list_items).block(block);
    if is_focused {
        list = list
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
    } else {
        list = list.highlight_symbol("  ");
    }
    f.render_stateful_widget(list, area, state);

    let viewport_height = area.height.saturating_sub(2) as usize;
    let total_items = entries.len();

    if total_items > viewport_height {
        let mut scrollbar_state = ScrollbarState::new(total_items.saturating_sub(viewport_height))
            .position(state.offset());

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█");

        f.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                horizontal: 0,
                vertical: 1,
            }),
            &mut scrollbar_state,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filepick::model::{EntryKind, IconKind};
    use filepick::storage::Locator;
    use std::path::PathBuf;

    fn entry(title: &str, metadata: Option<&str>) -> DirectoryEntry {
        DirectoryEntry {
            title: title.to_string(),
            kind: EntryKind::File,
            icon: IconKind::File,
            metadata: metadata.map(str::to_string),
            size: None,
            modified: None,
            locator: Locator::Path(PathBuf::from("/tmp").join(title)),
        }
    }

    #[test]
    fn test_metadata_column_full() {
        let info = "1.50 k 03.02.24 10:15";
        let (padding, text) = metadata_column(10, info, 60).unwrap();
        assert_eq!(text, info);
        assert_eq!(padding, 60 - 10 - info.len());
    }

    #[test]
    fn test_metadata_column_size_only() {
        let info = "1.50 k 03.02.24 10:15";
        let (_, text) = metadata_column(10, info, 20).unwrap();
        assert_eq!(text, "1.50 k");
    }

    #[test]
    fn test_metadata_column_nothing_fits() {
        assert!(metadata_column(30, "1.50 k 03.02.24 10:15", 20).is_none());
    }

    #[test]
    fn test_row_builds_for_every_width() {
        let item = entry("report.txt", Some("1.50 k 03.02.24 10:15"));
        for width in [0u16, 10, 40, 120] {
            let _ = build_list_item(&item, Span::raw("📄 "), width, true);
        }
    }
}
