//! Keyboard Input Handler
//!
//! Modal prompts take every key while open; otherwise keys go to the
//! breadcrumb trail or the listing, whichever has focus.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::navigation::PAGE_SIZE;
use crate::App;

/// Handle keyboard input
pub async fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.cancel();
        return Ok(());
    }

    // Save-name prompt
    if app.model.ui.name_prompt.is_some() {
        match key.code {
            KeyCode::Enter => app.submit_name(),
            KeyCode::Esc => app.model.ui.name_prompt = None,
            KeyCode::Backspace => {
                if let Some(prompt) = &mut app.model.ui.name_prompt {
                    prompt.input.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(prompt) = &mut app.model.ui.name_prompt {
                    prompt.input.push(c);
                }
            }
            _ => {}
        }
        return Ok(());
    }

    // Base folder rationale
    if app.model.ui.rationale {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.model.ui.rationale = false;
                app.choose_base_folder().await;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.model.ui.rationale = false;
            }
            _ => {}
        }
        return Ok(());
    }

    // Help closes on any key
    if app.model.ui.show_help {
        app.model.ui.show_help = false;
        return Ok(());
    }

    if app.model.navigation.in_breadcrumb() {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => app.move_segment_cursor(-1),
            KeyCode::Right | KeyCode::Char('l') => app.move_segment_cursor(1),
            KeyCode::Enter => app.select_highlighted_segment(),
            KeyCode::Tab | KeyCode::Esc | KeyCode::Down => app.toggle_focus(),
            KeyCode::Char('q') => app.cancel(),
            _ => {}
        }
        return Ok(());
    }

    let vim_mode = app.model.ui.vim_mode;
    let was_g = app.model.ui.pending_g;
    app.model.ui.pending_g = false;

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.cancel(),
        KeyCode::Char(' ') => app.confirm(),
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Char('s') => app.cycle_sort_mode(),
        KeyCode::Char('S') => app.toggle_sort_reverse(),
        KeyCode::Char('c') => app.change_base_folder().await,
        KeyCode::Char('n') => app.use_system_picker().await,
        KeyCode::Char('?') => app.model.ui.show_help = true,
        KeyCode::Char('d') if vim_mode && key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.page_down(PAGE_SIZE / 2);
        }
        KeyCode::Char('u') if vim_mode && key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.page_up(PAGE_SIZE / 2);
        }
        // Vim keybindings
        KeyCode::Char('h') if vim_mode => app.go_parent(),
        KeyCode::Char('j') if vim_mode => app.next_item(),
        KeyCode::Char('k') if vim_mode => app.previous_item(),
        KeyCode::Char('l') if vim_mode => app.activate_highlighted(),
        KeyCode::Char('g') if vim_mode => {
            if was_g {
                app.jump_to_first();
            } else {
                app.model.ui.pending_g = true;
            }
        }
        KeyCode::Char('G') if vim_mode => app.jump_to_last(),
        // Standard navigation keys
        KeyCode::PageDown => app.page_down(PAGE_SIZE),
        KeyCode::PageUp => app.page_up(PAGE_SIZE),
        KeyCode::Home => app.jump_to_first(),
        KeyCode::End => app.jump_to_last(),
        KeyCode::Left | KeyCode::Backspace => app.go_parent(),
        KeyCode::Right | KeyCode::Enter => app.activate_highlighted(),
        KeyCode::Up => app.previous_item(),
        KeyCode::Down => app.next_item(),
        _ => {}
    }
    Ok(())
}
