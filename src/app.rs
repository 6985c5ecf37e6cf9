use std::sync::Arc;

use chrono::{Days, NaiveDate};

use crate::calendar::agenda::{agenda_listing, events_for_date};
use crate::calendar::event::dedupe_by_id;
use crate::calendar::{AgendaRoute, CivicEvent, DateIndex, LayerFilter};
use crate::storage::offline::OfflineDataset;
use crate::sync::loader::LoadOutcome;
use crate::ui::calendar_dialog::{CalendarDialog, DialogEffect, DialogInput};
use crate::ui::locale::LocaleFormatter;
use crate::ui::month_view::{first_of_month, CalendarError, CalendarNavigator, MonthLayout};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Command,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded(usize),
}

/// Views derived from the event snapshot and the active layers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedViews {
    pub filtered: Vec<CivicEvent>,
    pub index: DateIndex,
}

pub struct DashboardState {
    pub mode: Mode,
    pub theme: Theme,
    pub formatter: LocaleFormatter,
    pub municipality: Option<String>,
    pub load_status: LoadStatus,
    pub command_buffer: String,
    pub status_message: Option<String>,
    pub layers_menu_open: bool,
    pub layer_cursor: usize,
    pub calendar_cursor: NaiveDate,
    pub agenda: Option<AgendaRoute>,
    pub agenda_scroll: usize,
    pub should_quit: bool,
    events: Vec<CivicEvent>,
    offline: Arc<OfflineDataset>,
    revision: u64,
    layers: LayerFilter,
    navigator: CalendarNavigator,
    dialog: CalendarDialog,
    views: DerivedViews,
    views_key: Option<(u64, Vec<String>)>,
}

impl DashboardState {
    pub fn new(today: NaiveDate, formatter: LocaleFormatter, municipality: Option<String>) -> Self {
        let mut state = Self {
            mode: Mode::Normal,
            theme: Theme::default(),
            formatter,
            municipality,
            load_status: LoadStatus::Idle,
            command_buffer: String::new(),
            status_message: None,
            layers_menu_open: false,
            layer_cursor: 0,
            calendar_cursor: today,
            agenda: None,
            agenda_scroll: 0,
            should_quit: false,
            events: Vec::new(),
            offline: Arc::new(OfflineDataset::bundled().clone()),
            revision: 0,
            layers: LayerFilter::default(),
            navigator: CalendarNavigator::new(today),
            dialog: CalendarDialog::new(),
            views: DerivedViews::default(),
            views_key: None,
        };
        state.refresh_views();
        state
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Dataset consulted when a dated agenda finds nothing in the live snapshot.
    pub fn with_offline(mut self, offline: Arc<OfflineDataset>) -> Self {
        self.offline = offline;
        self
    }

    pub fn events(&self) -> &[CivicEvent] {
        &self.events
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn layers(&self) -> &LayerFilter {
        &self.layers
    }

    pub fn navigator(&self) -> &CalendarNavigator {
        &self.navigator
    }

    pub fn filtered(&self) -> &[CivicEvent] {
        &self.views.filtered
    }

    pub fn index(&self) -> &DateIndex {
        &self.views.index
    }

    pub fn calendar_open(&self) -> bool {
        self.dialog.is_open()
    }

    /// Replaces the event snapshot. Duplicate ids keep their first occurrence.
    pub fn set_events(&mut self, events: Vec<CivicEvent>) {
        let (events, dropped) = dedupe_by_id(events);
        if !dropped.is_empty() {
            tracing::warn!("Dropped {} events with duplicate ids: {:?}", dropped.len(), dropped);
        }

        self.events = events;
        self.revision += 1;
        self.refresh_views();
    }

    pub fn begin_loading(&mut self) {
        self.load_status = LoadStatus::Loading;
    }

    pub fn apply_outcome(&mut self, outcome: LoadOutcome) {
        self.set_events(outcome.events);
        self.load_status = LoadStatus::Loaded(self.events.len());
    }

    pub fn toggle_layer(&mut self, id: &str) -> bool {
        let toggled = self.layers.toggle(id);
        self.refresh_views();
        toggled
    }

    pub fn toggle_layer_at(&mut self, position: usize) -> bool {
        match self.layers.known().get(position).cloned() {
            Some(id) => self.toggle_layer(&id),
            None => false,
        }
    }

    pub fn select_all_layers(&mut self) {
        self.layers.select_all();
        self.refresh_views();
    }

    pub fn clear_layers(&mut self) {
        self.layers.clear();
        self.refresh_views();
    }

    pub fn set_locale(&mut self, tag: &str) {
        self.formatter = LocaleFormatter::new(tag);
    }

    pub fn open_calendar(&mut self) {
        if first_of_month(self.calendar_cursor) != self.navigator.anchor() {
            self.calendar_cursor = self.navigator.anchor();
        }
        self.layers_menu_open = false;
        self.dialog_input(DialogInput::Open);
    }

    pub fn close_calendar(&mut self) {
        self.dialog_input(DialogInput::Close);
    }

    pub fn click_outside_calendar(&mut self) {
        self.dialog_input(DialogInput::ClickOutside);
    }

    /// Picks the cursor date; only dates with events navigate to the agenda.
    pub fn select_calendar_date(&mut self, date: NaiveDate) -> bool {
        self.calendar_cursor = date;
        self.dialog_input(DialogInput::SelectDate(date))
    }

    fn dialog_input(&mut self, input: DialogInput) -> bool {
        match self.dialog.handle(input, &self.views.index) {
            DialogEffect::Navigate(route) => {
                self.show_agenda(route);
                true
            }
            DialogEffect::None => false,
        }
    }

    pub fn show_agenda(&mut self, route: AgendaRoute) {
        tracing::debug!("Navigating to {}", route);
        self.agenda = Some(route);
        self.agenda_scroll = 0;
    }

    pub fn close_agenda(&mut self) {
        self.agenda = None;
    }

    /// Moves the calendar cursor by whole days, dragging the shown month along.
    pub fn move_calendar_cursor(&mut self, days: i64) {
        let shifted = if days >= 0 {
            self.calendar_cursor.checked_add_days(Days::new(days as u64))
        } else {
            self.calendar_cursor.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        let Some(shifted) = shifted else {
            return;
        };

        self.goto_date(shifted);
    }

    pub fn goto_date(&mut self, date: NaiveDate) {
        self.calendar_cursor = date;
        self.navigator = CalendarNavigator::new(date);
    }

    pub fn select_month(&mut self, month_index: u32) -> Result<(), CalendarError> {
        self.navigator.select_month(month_index)?;
        self.calendar_cursor = self.navigator.anchor();
        Ok(())
    }

    pub fn select_year(&mut self, year: i32) -> Result<(), CalendarError> {
        self.navigator.select_year(year)?;
        self.calendar_cursor = self.navigator.anchor();
        Ok(())
    }

    pub fn change_month(&mut self, offset: i32) {
        self.navigator.change_month(offset);
        self.calendar_cursor = self.navigator.anchor();
    }

    pub fn calendar_layout(&self, today: NaiveDate) -> MonthLayout {
        self.navigator.layout(&self.views.index, today)
    }

    /// Events shown by the agenda overlay for the current route. A date with no
    /// live events falls back to the offline dataset.
    pub fn agenda_events(&self) -> Vec<CivicEvent> {
        match self.agenda {
            Some(AgendaRoute::Date(date)) => {
                let events = events_for_date(&self.events, date);
                if events.is_empty() {
                    tracing::debug!("No live events on {}, using offline dataset", date);
                    self.offline.events_for_date(date)
                } else {
                    events
                }
            }
            Some(AgendaRoute::Listing) => agenda_listing(&self.events),
            None => Vec::new(),
        }
    }

    pub fn move_layer_cursor_down(&mut self) {
        let count = self.layers.known().len();
        if count > 0 && self.layer_cursor < count - 1 {
            self.layer_cursor += 1;
        }
    }

    pub fn move_layer_cursor_up(&mut self) {
        self.layer_cursor = self.layer_cursor.saturating_sub(1);
    }

    fn refresh_views(&mut self) {
        let key = (self.revision, self.layers.active().to_vec());
        if self.views_key.as_ref() == Some(&key) {
            return;
        }

        let filtered = self.layers.filter(&self.events);
        let index = DateIndex::build(&filtered);
        tracing::debug!(
            "Recomputed views: {} of {} events shown, {} on {} dates",
            filtered.len(),
            self.events.len(),
            index.event_count(),
            index.len()
        );
        self.views = DerivedViews { filtered, index };
        self.views_key = Some(key);
    }
}
