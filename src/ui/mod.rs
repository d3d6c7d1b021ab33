// UI module - terminal rendering with Ratatui
//
// Architecture:
// - icons: Entry icons (emoji and Nerd Fonts) with a color theme
// - layout: Splits the screen into trail, listing, legend and status areas
// - render: Orchestrates one frame
// - breadcrumb: Clickable ancestor trail above the listing
// - file_list: The directory listing with the metadata column
// - legend: Hotkey legend
// - status_bar: Mode, location, sort and selection summary
// - dialogs: Save-name prompt, folder-chooser rationale, help
// - toast: Brief pop-up messages

pub mod breadcrumb;
pub mod dialogs;
pub mod file_list;
pub mod icons;
pub mod layout;
pub mod legend;
pub mod render;
pub mod status_bar;
pub mod toast;

pub use render::render;
