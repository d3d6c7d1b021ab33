use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::icons::IconRenderer;
use filepick::model::PathSegment;

const SEPARATOR: &str = " › ";

/// Label shown for the trail while the storage roots are listed
pub const ROOTS_LABEL: &str = "Storage";

/// Text of one segment as shown in the bar
fn segment_label(segment: &PathSegment) -> &str {
    if segment.tag.is_home() {
        ""
    } else {
        segment.name.as_str()
    }
}

/// Index of the first segment that still fits in `width` columns when the
/// trail is cut from the left. The last segment is always kept.
pub fn first_visible_segment(segments: &[PathSegment], width: usize) -> usize {
    let ellipsis = "… ".width() + SEPARATOR.width();
    let mut used = 0;
    for (idx, segment) in segments.iter().enumerate().rev() {
        let cost = segment_label(segment).width().max(2) + SEPARATOR.width();
        let reserve = if idx > 0 { ellipsis } else { 0 };
        if used + cost + reserve > width && idx + 1 < segments.len() {
            return idx + 1;
        }
        used += cost;
    }
    0
}

/// Build the trail line. `selected` is the highlighted segment while the
/// trail has keyboard focus.
pub fn build_trail_spans(
    segments: &[PathSegment],
    selected: Option<usize>,
    icon_renderer: &IconRenderer,
    width: usize,
) -> Vec<Span<'static>> {
    if segments.is_empty() {
        return vec![
            icon_renderer.home_icon(),
            Span::raw(" "),
            Span::styled(ROOTS_LABEL, Style::default().add_modifier(Modifier::BOLD)),
        ];
    }

    let start = first_visible_segment(segments, width);
    let mut spans = Vec::new();
    if start > 0 {
        spans.push(Span::styled("…", Style::default().fg(Color::DarkGray)));
    }

    for (idx, segment) in segments.iter().enumerate().skip(start) {
        if idx > 0 {
            spans.push(Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray)));
        }

        let is_last = idx + 1 == segments.len();
        let mut style = if is_last {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        if selected == Some(idx) {
            style = style.bg(Color::DarkGray).fg(Color::Cyan);
        }

        if segment.tag.is_home() {
            spans.push(icon_renderer.home_icon().patch_style(style));
        } else {
            spans.push(Span::styled(segment.name.clone(), style));
        }
    }
    spans
}

/// Render the breadcrumb bar
pub fn render_breadcrumb_bar(
    f: &mut Frame,
    area: Rect,
    segments: &[PathSegment],
    selected: Option<usize>,
    is_focused: bool,
    icon_renderer: &IconRenderer,
) {
    let width = area.width.saturating_sub(2) as usize;
    let line = Line::from(build_trail_spans(segments, selected, icon_renderer, width));

    let border_color = if is_focused { Color::Cyan } else { Color::Gray };
    let bar = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    f.render_widget(bar, area);
}
