use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{App, FocusPane, InputMode};
use crate::input::LineInput;
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(w, h) => tracing::trace!(w, h, "resize"),
        AppEvent::Tick => app.tick_animation(),
        AppEvent::ScriptedReply(id) => app.on_scripted_reply(id),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    // Open panels capture input until closed
    if app.menu.open {
        handle_menu(app, key);
        return;
    }
    if app.launcher.open {
        handle_launcher(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Header
        KeyCode::Char('m') => app.open_menu(),
        KeyCode::Char('a') => app.open_launcher(),
        KeyCode::Char('/') => app.focus_search(),
        KeyCode::Char('h') => app.go_home(),
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            app.open_quick_link(index);
        }
        KeyCode::Char('o') => {
            if let Some(url) = app.external() {
                open_in_browser(url);
            }
        }

        // Page tabs
        KeyCode::Tab | KeyCode::Char(']') | KeyCode::Right => app.next_tab(),
        KeyCode::BackTab | KeyCode::Char('[') | KeyCode::Left => app.prev_tab(),

        // Chat
        KeyCode::Char('c') | KeyCode::Char('i') => app.open_chat(),
        KeyCode::Char('z') => app.toggle_chat_minimize(),
        KeyCode::Char('x') => app.close_chat(),

        _ => {}
    }
}

fn handle_menu(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('q') => app.close_menu(),
        KeyCode::Char('j') | KeyCode::Down => app.menu_down(),
        KeyCode::Char('k') | KeyCode::Up => app.menu_up(),
        KeyCode::Enter | KeyCode::Char('l') => {
            let row = app.menu.selected;
            app.menu_activate(row);
        }
        _ => {}
    }
}

fn handle_launcher(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('a') | KeyCode::Char('q') => app.close_launcher(),
        KeyCode::Char('h') | KeyCode::Left => app.launcher_move(-1, 0),
        KeyCode::Char('l') | KeyCode::Right => app.launcher_move(1, 0),
        KeyCode::Char('k') | KeyCode::Up => app.launcher_move(0, -1),
        KeyCode::Char('j') | KeyCode::Down => app.launcher_move(0, 1),
        KeyCode::Enter => {
            let index = app.launcher.selected;
            app.launcher_activate(index);
        }
        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match app.focus {
        FocusPane::Search => handle_search_editing(app, key),
        FocusPane::Chat => handle_chat_editing(app, key),
        FocusPane::Page => app.input_mode = InputMode::Normal,
    }
}

fn handle_search_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.blur_search(),
        KeyCode::Enter => {
            app.search.submit();
        }
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => app.clear_search(),
        _ => edit_line(app.search.input_mut(), key),
    }
}

fn handle_chat_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.focus = FocusPane::Page;
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => app.submit_chat(),
        _ => edit_line(app.chat.input_mut(), key),
    }
}

fn edit_line(input: &mut LineInput, key: KeyEvent) {
    match key.code {
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.left(),
        KeyCode::Right => input.right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert(c),
        _ => {}
    }
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn hit(area: Option<Rect>, x: u16, y: u16) -> bool {
    area.map(|r| point_in_rect(x, y, r)).unwrap_or(false)
}

fn hit_index(areas: &[Rect], x: u16, y: u16) -> Option<usize> {
    areas.iter().position(|r| point_in_rect(x, y, *r))
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let x = mouse.column;
    let y = mouse.row;

    // Outside clicks collapse the search field; inside clicks never do
    let in_search = !app.menu.open && !app.launcher.open && hit(app.areas.search, x, y);
    app.search_click(in_search);
    if in_search && hit(app.areas.search_clear, x, y) {
        app.clear_search();
        return;
    }

    if app.menu.open {
        if let Some(row) = hit_index(&app.areas.menu_rows, x, y) {
            app.menu_activate(row);
        } else if !hit(app.areas.menu_panel, x, y) {
            app.close_menu();
        }
        return;
    }

    if app.launcher.open {
        if let Some(index) = hit_index(&app.areas.launcher_tiles, x, y) {
            app.launcher_activate(index);
        } else if !hit(app.areas.launcher_panel, x, y) {
            app.close_launcher();
        }
        return;
    }

    // Chat floats above the page
    if hit(app.areas.chat_close, x, y) {
        app.close_chat();
        return;
    }
    if hit(app.areas.chat_minimize, x, y) {
        app.toggle_chat_minimize();
        return;
    }
    if hit(app.areas.chat_button, x, y) {
        app.open_chat();
        return;
    }
    if hit(app.areas.chat_panel, x, y) {
        if app.chat.is_expanded() {
            app.open_chat();
        }
        return;
    }

    if hit(app.areas.menu_button, x, y) {
        app.open_menu();
    } else if hit(app.areas.logo, x, y) {
        app.go_home();
    } else if hit(app.areas.launcher_button, x, y) {
        app.open_launcher();
    } else if let Some(index) = hit_index(&app.areas.quick_links, x, y) {
        app.open_quick_link(index);
    } else if let Some(index) = hit_index(&app.areas.tabs, x, y) {
        app.select_tab(index);
    } else if app.focus == FocusPane::Chat && !in_search {
        app.focus = FocusPane::Page;
        app.input_mode = InputMode::Normal;
    }
}

/// Hand the URL to the platform opener. Failures are logged only.
fn open_in_browser(url: &str) {
    match open::that(url) {
        Ok(()) => tracing::info!(url, "opened external target in browser"),
        Err(e) => tracing::warn!(url, error = %e, "could not launch browser"),
    }
}
