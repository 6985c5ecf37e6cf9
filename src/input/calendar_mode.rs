use crossterm::event::KeyCode;

use crate::app::DashboardState;

pub fn handle_key(key: KeyCode, state: &mut DashboardState) {
    match key {
        KeyCode::Char('h') | KeyCode::Left => state.move_calendar_cursor(-1),
        KeyCode::Char('l') | KeyCode::Right => state.move_calendar_cursor(1),
        KeyCode::Char('j') | KeyCode::Down => state.move_calendar_cursor(7),
        KeyCode::Char('k') | KeyCode::Up => state.move_calendar_cursor(-7),
        KeyCode::Char('{') => state.change_month(-1),
        KeyCode::Char('}') => state.change_month(1),
        KeyCode::Char('[') => shift_year(state, -1),
        KeyCode::Char(']') => shift_year(state, 1),
        KeyCode::Enter => {
            let date = state.calendar_cursor;
            state.select_calendar_date(date);
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('c') => state.close_calendar(),
        _ => {}
    }
}

fn shift_year(state: &mut DashboardState, offset: i32) {
    let year = state.navigator().year() + offset;
    if let Err(e) = state.select_year(year) {
        state.status_message = Some(e.to_string());
    }
}
