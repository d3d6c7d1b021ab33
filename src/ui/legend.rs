use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use filepick::model::SelectMode;

fn key(label: &'static str, action: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(label, Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ]
}

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(vim_mode: bool, mode: SelectMode, in_breadcrumb: bool) -> Vec<Span<'static>> {
    let mut hotkey_spans = vec![];

    if in_breadcrumb {
        hotkey_spans.extend(key("←/→", ":Segment  "));
        hotkey_spans.extend(key("Enter", ":Go  "));
        hotkey_spans.extend(key("Tab", ":Listing  "));
    } else if vim_mode {
        hotkey_spans.extend(key("hjkl", ":Nav  "));
        hotkey_spans.extend(key("gg/G", ":First/Last  "));
        hotkey_spans.extend(key("^d/^u", ":½Page  "));
    } else {
        hotkey_spans.extend(key("↑/↓", ":Nav  "));
        hotkey_spans.extend(key("Enter", ":Open  "));
        hotkey_spans.extend(key("←", ":Up  "));
        hotkey_spans.extend(key("Tab", ":Trail  "));
    }

    let confirm = match mode {
        SelectMode::OpenFile => ":Pick  ",
        SelectMode::SaveFile => ":Save as  ",
        SelectMode::ChooseFolder => ":Choose folder  ",
    };
    hotkey_spans.extend(key("Space", confirm));

    hotkey_spans.extend(key("s", ":Sort  "));
    hotkey_spans.extend(key("S", ":Reverse  "));
    hotkey_spans.extend(key("c", ":Base folder  "));
    hotkey_spans.extend(key("n", ":System picker  "));
    hotkey_spans.extend(key("?", ":Help  "));
    hotkey_spans.extend(key("q", ":Cancel"));

    hotkey_spans
}

/// Build the legend paragraph (reusable for both rendering and height calculation)
pub fn build_legend_paragraph(vim_mode: bool, mode: SelectMode, in_breadcrumb: bool) -> Paragraph<'static> {
    let hotkey_line = Line::from(build_hotkey_spans(vim_mode, mode, in_breadcrumb));

    Paragraph::new(vec![hotkey_line])
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(ratatui::widgets::Wrap { trim: false })
}

pub fn render_legend(f: &mut Frame, area: Rect, vim_mode: bool, mode: SelectMode, in_breadcrumb: bool) {
    f.render_widget(build_legend_paragraph(vim_mode, mode, in_breadcrumb), area);
}

/// Calculate required height for legend based on terminal width and content
pub fn calculate_legend_height(
    terminal_width: u16,
    vim_mode: bool,
    mode: SelectMode,
    in_breadcrumb: bool,
) -> u16 {
    // Count lines without the block; line_count() ignores borders
    let hotkey_line = Line::from(build_hotkey_spans(vim_mode, mode, in_breadcrumb));
    let paragraph_for_counting =
        Paragraph::new(vec![hotkey_line]).wrap(ratatui::widgets::Wrap { trim: false });

    let available_width = terminal_width.saturating_sub(2);
    let line_count = paragraph_for_counting.line_count(available_width);

    (line_count as u16).saturating_add(2).max(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_to_text(spans: &[Span]) -> String {
        spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_confirm_label_follows_mode() {
        let text = spans_to_text(&build_hotkey_spans(false, SelectMode::SaveFile, false));
        assert!(text.contains("Save as"), "got: {}", text);

        let text = spans_to_text(&build_hotkey_spans(false, SelectMode::ChooseFolder, false));
        assert!(text.contains("Choose folder"), "got: {}", text);
    }

    #[test]
    fn test_breadcrumb_focus_shows_segment_keys() {
        let text = spans_to_text(&build_hotkey_spans(true, SelectMode::OpenFile, true));
        assert!(text.contains("Segment"));
        assert!(!text.contains("hjkl"));
    }

    #[test]
    fn test_narrow_terminal_needs_more_lines() {
        let wide = calculate_legend_height(300, false, SelectMode::OpenFile, false);
        let narrow = calculate_legend_height(30, false, SelectMode::OpenFile, false);
        assert_eq!(wide, 3);
        assert!(narrow > wide);
    }
}
