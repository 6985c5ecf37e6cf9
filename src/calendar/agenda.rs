use std::fmt;

use chrono::NaiveDate;

use crate::calendar::date_index::ISO_DATE_FORMAT;
use crate::calendar::CivicEvent;

const AGENDA_ROOT: &str = "/eventos";

/// Where an event or a calendar day links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgendaRoute {
    Date(NaiveDate),
    Listing,
}

impl AgendaRoute {
    pub fn for_event(event: &CivicEvent) -> Self {
        event
            .calendar_date()
            .map(AgendaRoute::Date)
            .unwrap_or(AgendaRoute::Listing)
    }

    pub fn parse(path: &str) -> Option<Self> {
        let rest = path.trim().trim_end_matches('/').strip_prefix(AGENDA_ROOT)?;

        if rest.is_empty() {
            return Some(AgendaRoute::Listing);
        }

        let iso = rest.strip_prefix('/')?;
        NaiveDate::parse_from_str(iso, ISO_DATE_FORMAT)
            .ok()
            .map(AgendaRoute::Date)
    }
}

impl fmt::Display for AgendaRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgendaRoute::Date(date) => write!(f, "{}/{}", AGENDA_ROOT, date.format(ISO_DATE_FORMAT)),
            AgendaRoute::Listing => f.write_str(AGENDA_ROOT),
        }
    }
}

pub fn events_for_date(events: &[CivicEvent], date: NaiveDate) -> Vec<CivicEvent> {
    events
        .iter()
        .filter(|event| event.calendar_date() == Some(date))
        .cloned()
        .collect()
}

/// Sorted by start instant; unscheduled events keep their relative order at the end.
pub fn agenda_listing(events: &[CivicEvent]) -> Vec<CivicEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|event| (event.start().is_none(), event.start()));
    sorted
}
