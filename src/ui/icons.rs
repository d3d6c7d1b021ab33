use ratatui::{
    style::{Color, Style},
    text::Span,
};

use filepick::model::IconKind;

/// Icon display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconMode {
    Emoji,    // Standard emoji icons (📁, 📄, etc.)
    NerdFont, // Nerd Fonts icons (U+E5FF, etc.)
}

impl IconMode {
    /// Parse the `icon_mode` config value; anything unknown is emoji
    pub fn from_config(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "nerdfont" | "nerd_font" | "nerd" => IconMode::NerdFont,
            _ => IconMode::Emoji,
        }
    }
}

/// Icon theme using terminal colors (respects user's terminal theme)
#[derive(Debug, Clone)]
pub struct IconTheme {
    pub root_color: Color,
    pub folder_color: Color,
    pub file_color: Color,
    pub custom_color: Color,
    pub parent_color: Color,
}

impl Default for IconTheme {
    fn default() -> Self {
        Self {
            root_color: Color::Magenta,
            folder_color: Color::Blue,
            file_color: Color::Cyan,
            custom_color: Color::Green,
            parent_color: Color::Gray,
        }
    }
}

/// Renders entry icons in either emoji or Nerd Font mode
pub struct IconRenderer {
    mode: IconMode,
    theme: IconTheme,
}

impl IconRenderer {
    pub fn new(mode: IconMode, theme: IconTheme) -> Self {
        Self { mode, theme }
    }

    /// Icon for a listing row. Storage roots get their own glyph.
    pub fn entry_icon(&self, icon: &IconKind, is_root: bool) -> Span<'static> {
        let (emoji, nerd, color) = match icon {
            IconKind::Folder if is_root => ("💾 ", "\u{F0A0} ", self.theme.root_color),
            IconKind::Folder => ("📁 ", "\u{E5FF} ", self.theme.folder_color),
            IconKind::File => ("📄 ", "\u{F15B} ", self.theme.file_color),
            IconKind::Parent => ("⬆️ ", "\u{F062} ", self.theme.parent_color),
            IconKind::Custom(name) => {
                let (emoji, nerd) = custom_glyphs(name);
                (emoji, nerd, self.theme.custom_color)
            }
        };

        let icon = match self.mode {
            IconMode::Emoji => emoji,
            IconMode::NerdFont => nerd,
        };
        Span::styled(icon, Style::default().fg(color))
    }

    /// Home segment of the breadcrumb trail
    pub fn home_icon(&self) -> Span<'static> {
        let icon = match self.mode {
            IconMode::Emoji => "🏠",
            IconMode::NerdFont => "\u{F015}",
        };
        Span::styled(icon, Style::default().fg(self.theme.root_color))
    }
}

/// Glyphs for icon names registered through the icon map
fn custom_glyphs(name: &str) -> (&'static str, &'static str) {
    match name {
        "csv" | "table" | "spreadsheet" => ("📊 ", "\u{F0CE} "),
        "text" | "txt" | "note" => ("📝 ", "\u{F15C} "),
        "image" | "picture" => ("🖼️ ", "\u{F1C5} "),
        "archive" | "zip" => ("📦 ", "\u{F1C6} "),
        "pdf" => ("📕 ", "\u{F1C1} "),
        "audio" | "music" => ("🎵 ", "\u{F1C7} "),
        "video" => ("🎬 ", "\u{F1C8} "),
        "code" => ("💻 ", "\u{F1C9} "),
        _ => ("📎 ", "\u{F0C6} "),
    }
}
