use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::layout::centered;

/// Text of the one-time explanation shown before the system folder chooser
pub const RATIONALE_TEXT: &str = "The base folder is where files are opened from and saved to. \
A system folder chooser will open next; pick a folder you can write to.\n\n\
Continue? (y/n)";

/// Render the save-name prompt
pub fn render_name_prompt(f: &mut Frame, input: &str, extensions: &[String]) {
    let area = centered(f.area(), 60, 6);

    let hint = if extensions.is_empty() {
        "Enter: save  Esc: back".to_string()
    } else {
        format!("Must end with {}  Enter: save  Esc: back", extensions.join(", "))
    };

    let lines = vec![
        Line::from(vec![
            Span::raw(input.to_string()),
            Span::styled("█", Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];

    let prompt = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("File name")
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black));

    f.render_widget(Clear, area);
    f.render_widget(prompt, area);
}

/// Render the base-folder rationale
pub fn render_rationale(f: &mut Frame) {
    let area = centered(f.area(), 60, 9);

    let prompt = Paragraph::new(RATIONALE_TEXT)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Choose base folder")
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(prompt, area);
}

fn help_lines(vim_mode: bool) -> Vec<Line<'static>> {
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut rows = vec![
        ("↑/↓ PgUp/PgDn", "Move the cursor"),
        ("Enter →", "Open folder / select file"),
        ("← Backspace", "Parent folder"),
        ("Tab", "Switch between listing and trail"),
        ("Space", "Confirm (pick, save, choose folder)"),
        ("s / S", "Cycle sort mode / reverse"),
        ("c", "Change base folder"),
        ("n", "Use the system picker instead"),
        ("q Esc", "Cancel"),
    ];
    if vim_mode {
        rows.insert(0, ("h j k l  gg G", "Vim navigation"));
    }

    rows.into_iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{:<16}", keys), key_style),
                Span::raw(action),
            ])
        })
        .collect()
}

/// Render the help overlay
pub fn render_help(f: &mut Frame, vim_mode: bool) {
    let lines = help_lines(vim_mode);
    let area = centered(f.area(), 60, lines.len() as u16 + 2);

    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black));

    f.render_widget(Clear, area);
    f.render_widget(help, area);
}
