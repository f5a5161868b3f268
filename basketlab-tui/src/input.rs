//! Keyboard input dispatch: global keys → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use basketlab_core::{Action, Right};

use crate::app::{AppState, Panel};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Chain; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::Basket; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::Chart; return; }
        KeyCode::Char('4') => { app.active_panel = Panel::Help; return; }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('n') | KeyCode::Char(']') => { app.next_record(); return; }
        KeyCode::Char('p') | KeyCode::Char('[') => { app.prev_record(); return; }
        KeyCode::Char('N') => { app.step_date(true); return; }
        KeyCode::Char('P') => { app.step_date(false); return; }
        KeyCode::Char('f') => { app.cycle_session_filter(); return; }
        KeyCode::Char('e') => { app.cycle_expiry(); return; }
        KeyCode::Char('u') => { app.undo(); return; }
        KeyCode::Char('X') => { app.clear_basket(); return; }
        _ => {}
    }

    // 2. Panel-specific keys.
    match app.active_panel {
        Panel::Chain => handle_chain_key(app, key),
        Panel::Basket | Panel::Chart | Panel::Help => {} // display only
    }
}

fn handle_chain_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::PageDown => app.move_cursor(5),
        KeyCode::PageUp => app.move_cursor(-5),
        KeyCode::Char('b') => app.trade(Action::Buy, Right::Call),
        KeyCode::Char('s') => app.trade(Action::Sell, Right::Call),
        KeyCode::Char('B') => app.trade(Action::Buy, Right::Put),
        KeyCode::Char('S') => app.trade(Action::Sell, Right::Put),
        _ => {}
    }
}
