use crossterm::event::KeyCode;

use crate::app::DashboardState;

pub fn handle_key(key: KeyCode, state: &mut DashboardState) {
    match key {
        KeyCode::Char('j') | KeyCode::Down => state.move_layer_cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => state.move_layer_cursor_up(),
        KeyCode::Char(' ') | KeyCode::Enter => {
            let cursor = state.layer_cursor;
            state.toggle_layer_at(cursor);
        }
        KeyCode::Char(digit @ '1'..='9') => {
            if let Some(position) = digit.to_digit(10).and_then(|d| d.checked_sub(1)) {
                state.toggle_layer_at(position as usize);
            }
        }
        KeyCode::Char('a') => state.select_all_layers(),
        KeyCode::Char('x') => state.clear_layers(),
        KeyCode::Esc | KeyCode::Char('L') | KeyCode::Char('q') => state.layers_menu_open = false,
        _ => {}
    }
}
