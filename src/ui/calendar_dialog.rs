use chrono::NaiveDate;

use crate::calendar::{AgendaRoute, DateIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogInput {
    Open,
    Close,
    ClickOutside,
    SelectDate(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEffect {
    None,
    Navigate(AgendaRoute),
}

/// Open/closed state of the calendar dialog.
///
/// Selecting a date only does something when that date has events: the dialog closes
/// and the caller is told to navigate to that date's agenda.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarDialog {
    state: DialogState,
}

impl CalendarDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DialogState::Open
    }

    pub fn handle(&mut self, input: DialogInput, index: &DateIndex) -> DialogEffect {
        match (self.state, input) {
            (_, DialogInput::Open) => {
                self.state = DialogState::Open;
                DialogEffect::None
            }
            (_, DialogInput::Close) | (_, DialogInput::ClickOutside) => {
                self.state = DialogState::Closed;
                DialogEffect::None
            }
            (DialogState::Open, DialogInput::SelectDate(date)) => {
                if !index.has_events(date) {
                    return DialogEffect::None;
                }
                self.state = DialogState::Closed;
                DialogEffect::Navigate(AgendaRoute::Date(date))
            }
            (DialogState::Closed, DialogInput::SelectDate(_)) => DialogEffect::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CivicEvent;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn index() -> DateIndex {
        DateIndex::build(&[
            CivicEvent::new("a", "Cabildo", "movilidad").with_starts_at("2025-11-22T10:00:00-06:00"),
        ])
    }

    fn open_dialog() -> CalendarDialog {
        let mut dialog = CalendarDialog::new();
        dialog.handle(DialogInput::Open, &index());
        dialog
    }

    #[test]
    fn starts_closed() {
        assert_eq!(CalendarDialog::new().state(), DialogState::Closed);
    }

    #[test]
    fn selecting_active_date_closes_and_navigates() {
        let mut dialog = open_dialog();

        let effect = dialog.handle(DialogInput::SelectDate(date(2025, 11, 22)), &index());

        assert_eq!(effect, DialogEffect::Navigate(AgendaRoute::Date(date(2025, 11, 22))));
        assert!(!dialog.is_open());
    }

    #[test]
    fn selecting_empty_date_is_a_no_op() {
        let mut dialog = open_dialog();

        let effect = dialog.handle(DialogInput::SelectDate(date(2025, 11, 23)), &index());

        assert_eq!(effect, DialogEffect::None);
        assert!(dialog.is_open());
    }

    #[test]
    fn click_outside_closes() {
        let mut dialog = open_dialog();

        dialog.handle(DialogInput::ClickOutside, &index());

        assert_eq!(dialog.state(), DialogState::Closed);
    }

    #[test]
    fn close_and_reopen() {
        let mut dialog = open_dialog();

        dialog.handle(DialogInput::Close, &index());
        assert!(!dialog.is_open());

        dialog.handle(DialogInput::Open, &index());
        assert!(dialog.is_open());
    }

    #[test]
    fn selection_while_closed_is_ignored() {
        let mut dialog = CalendarDialog::new();

        let effect = dialog.handle(DialogInput::SelectDate(date(2025, 11, 22)), &index());

        assert_eq!(effect, DialogEffect::None);
        assert!(!dialog.is_open());
    }
}
