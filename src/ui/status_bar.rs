use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use filepick::model::SelectMode;
use filepick::SortMode;

/// Everything the status line shows
pub struct StatusInfo<'a> {
    pub mode: SelectMode,
    pub location: Option<&'a str>,
    pub item_count: usize,
    pub sort_mode: SortMode,
    pub sort_reverse: bool,
    pub selection: Option<&'a str>,
}

pub fn build_status_spans(info: &StatusInfo) -> Vec<Span<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled(
            format!(" {} ", info.mode.title()),
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(info.location.unwrap_or("storage roots").to_string()),
        Span::styled(format!("  {} items", info.item_count), label),
    ];

    let arrow = if info.sort_reverse { "↑" } else { "↓" };
    spans.push(Span::styled("  sort: ", label));
    spans.push(Span::raw(format!("{}{}", info.sort_mode.as_str(), arrow)));

    if let Some(selection) = info.selection {
        spans.push(Span::styled("  selected: ", label));
        spans.push(Span::styled(
            selection.to_string(),
            Style::default().fg(Color::Green),
        ));
    }
    spans
}

pub fn render_status_bar(f: &mut Frame, area: Rect, info: &StatusInfo) {
    f.render_widget(Paragraph::new(Line::from(build_status_spans(info))), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mentions_selection_and_sort() {
        let info = StatusInfo {
            mode: SelectMode::OpenFile,
            location: Some("/home/me"),
            item_count: 3,
            sort_mode: SortMode::FileSize,
            sort_reverse: true,
            selection: Some("a.csv"),
        };
        let text: String = build_status_spans(&info)
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(text.contains("/home/me"));
        assert!(text.contains("3 items"));
        assert!(text.contains("selected: a.csv"));
        assert!(text.contains(SortMode::FileSize.as_str()));
    }

    #[test]
    fn test_status_in_root_view() {
        let info = StatusInfo {
            mode: SelectMode::ChooseFolder,
            location: None,
            item_count: 1,
            sort_mode: SortMode::Alphabetical,
            sort_reverse: false,
            selection: None,
        };
        let text: String = build_status_spans(&info)
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(text.contains("storage roots"));
        assert!(!text.contains("selected"));
    }
}
