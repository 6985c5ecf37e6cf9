use crossterm::event::KeyCode;

use crate::app::{DashboardState, Mode};
use crate::calendar::AgendaRoute;
use crate::input::Action;

pub fn handle_key(key: KeyCode, state: &mut DashboardState) -> Option<Action> {
    match key {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('r') => return Some(Action::Reload),
        KeyCode::Char(digit @ '1'..='9') => toggle_layer_by_digit(state, digit),
        KeyCode::Char('L') => open_layers_menu(state),
        KeyCode::Char('c') => state.open_calendar(),
        KeyCode::Char('e') => state.show_agenda(AgendaRoute::Listing),
        KeyCode::Char('{') => state.change_month(-1),
        KeyCode::Char('}') => state.change_month(1),
        KeyCode::Char(':') => enter_command_mode(state),
        KeyCode::Esc => state.status_message = None,
        _ => {}
    }
    None
}

fn toggle_layer_by_digit(state: &mut DashboardState, digit: char) {
    if let Some(position) = digit.to_digit(10).and_then(|d| d.checked_sub(1)) {
        state.toggle_layer_at(position as usize);
    }
}

fn open_layers_menu(state: &mut DashboardState) {
    state.layers_menu_open = true;
    state.layer_cursor = 0;
}

fn enter_command_mode(state: &mut DashboardState) {
    state.mode = Mode::Command;
    state.command_buffer = ":".to_string();
}
