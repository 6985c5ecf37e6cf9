use crossterm::event::KeyCode;

use crate::app::DashboardState;

pub fn handle_key(key: KeyCode, state: &mut DashboardState) {
    match key {
        KeyCode::Char('j') | KeyCode::Down => {
            let count = state.agenda_events().len();
            if state.agenda_scroll + 1 < count {
                state.agenda_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.agenda_scroll = state.agenda_scroll.saturating_sub(1);
        }
        KeyCode::Char('c') => {
            state.close_agenda();
            state.open_calendar();
        }
        KeyCode::Esc | KeyCode::Char('q') => state.close_agenda(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{AgendaRoute, CivicEvent};
    use crate::ui::locale::LocaleFormatter;
    use chrono::NaiveDate;

    fn listing() -> DashboardState {
        let today = NaiveDate::from_ymd_opt(2025, 11, 18).unwrap();
        let mut state = DashboardState::new(today, LocaleFormatter::default(), None);
        state.set_events(vec![
            CivicEvent::new("a", "A", "salud"),
            CivicEvent::new("b", "B", "salud"),
        ]);
        state.show_agenda(AgendaRoute::Listing);
        state
    }

    #[test]
    fn scrolling_stops_at_last_event() {
        let mut state = listing();

        for _ in 0..5 {
            handle_key(KeyCode::Char('j'), &mut state);
        }

        assert_eq!(state.agenda_scroll, 1);
    }

    #[test]
    fn c_returns_to_calendar() {
        let mut state = listing();

        handle_key(KeyCode::Char('c'), &mut state);

        assert_eq!(state.agenda, None);
        assert!(state.calendar_open());
    }

    #[test]
    fn escape_closes_agenda() {
        let mut state = listing();

        handle_key(KeyCode::Esc, &mut state);

        assert_eq!(state.agenda, None);
    }
}
