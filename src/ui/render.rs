use crate::App;
use filepick::model::Focus;
use ratatui::Frame;

use super::{
    breadcrumb, dialogs, file_list, layout, legend,
    status_bar::{self, StatusInfo},
    toast,
};

/// Render one frame
pub fn render(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let mode = app.session.mode();
    let in_breadcrumb = app.model.navigation.focus == Focus::Breadcrumb;

    let layout_info = layout::calculate_layout(size, app.model.ui.vim_mode, mode, in_breadcrumb);

    breadcrumb::render_breadcrumb_bar(
        f,
        layout_info.trail_area,
        app.session.trail().segments(),
        in_breadcrumb.then_some(app.model.navigation.segment_cursor),
        in_breadcrumb,
        &app.icon_renderer,
    );

    let location = app
        .session
        .current_dir()
        .map(|dir| dir.display().to_string());
    let title = match &location {
        Some(dir) => format!(" {} ", dir),
        None => format!(" {} ", breadcrumb::ROOTS_LABEL),
    };

    // Temporary ListState; the cursor lives in the model
    let mut temp_state = ratatui::widgets::ListState::default();
    temp_state.select(app.model.navigation.cursor);
    file_list::render_file_list(
        f,
        layout_info.list_area,
        app.session.entries(),
        &mut temp_state,
        &title,
        !in_breadcrumb,
        app.session.is_at_root(),
        app.session.pending_selection(),
        app.model.ui.loading,
        &app.icon_renderer,
    );

    legend::render_legend(
        f,
        layout_info.legend_area,
        app.model.ui.vim_mode,
        mode,
        in_breadcrumb,
    );

    let selection = app.session.pending_selection().map(|e| e.title.as_str());
    status_bar::render_status_bar(
        f,
        layout_info.status_area,
        &StatusInfo {
            mode,
            location: location.as_deref(),
            item_count: app.session.entries().len(),
            sort_mode: app.model.ui.sort_mode,
            sort_reverse: app.model.ui.sort_reverse,
            selection,
        },
    );

    if let Some(prompt) = &app.model.ui.name_prompt {
        dialogs::render_name_prompt(
            f,
            &prompt.input,
            &app.session.options().listing.extension_filter,
        );
    }
    if app.model.ui.rationale {
        dialogs::render_rationale(f);
    }
    if app.model.ui.show_help {
        dialogs::render_help(f, app.model.ui.vim_mode);
    }

    if let Some((message, _timestamp)) = &app.model.ui.toast_message {
        toast::render_toast(f, size, message);
    }
}
