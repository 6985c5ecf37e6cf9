use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::calendar::CivicEvent;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Empty,
    Active,
}

/// Events grouped by the UTC calendar date of their start.
///
/// Unscheduled events never appear here. Within a bucket the order of the
/// input collection is kept; buckets iterate in date order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateIndex {
    buckets: BTreeMap<NaiveDate, Vec<CivicEvent>>,
}

impl DateIndex {
    pub fn build(events: &[CivicEvent]) -> Self {
        let mut buckets: BTreeMap<NaiveDate, Vec<CivicEvent>> = BTreeMap::new();

        for event in events {
            let Some(date) = event.calendar_date() else {
                tracing::debug!("Skipping unscheduled event {} in date index", event.id);
                continue;
            };
            buckets.entry(date).or_default().push(event.clone());
        }

        Self { buckets }
    }

    pub fn events_on(&self, date: NaiveDate) -> &[CivicEvent] {
        self.buckets.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_events(&self, date: NaiveDate) -> bool {
        !self.events_on(date).is_empty()
    }

    pub fn status(&self, date: NaiveDate) -> DayStatus {
        if self.has_events(date) {
            DayStatus::Active
        } else {
            DayStatus::Empty
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (String, &[CivicEvent])> + '_ {
        self.buckets
            .iter()
            .map(|(date, events)| (date.format(ISO_DATE_FORMAT).to_string(), events.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn event_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}
