use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A single municipal happening as delivered by the events API or the offline dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CivicEvent {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub starts_at: Option<String>,
    #[serde(default)]
    pub ends_at: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl CivicEvent {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            latitude: None,
            longitude: None,
            municipality: None,
            address: None,
            description: None,
            starts_at: None,
            ends_at: None,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_municipality(mut self, municipality: impl Into<String>) -> Self {
        self.municipality = Some(municipality.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_starts_at(mut self, starts_at: impl Into<String>) -> Self {
        self.starts_at = Some(starts_at.into());
        self
    }

    pub fn with_ends_at(mut self, ends_at: impl Into<String>) -> Self {
        self.ends_at = Some(ends_at.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Tags rendered as `#chips` in sorted order, or `None` when there are none.
    pub fn tag_chips(&self) -> Option<String> {
        let chips: Vec<String> = self
            .tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(|tag| format!("#{}", tag))
            .collect();

        (!chips.is_empty()).then(|| chips.join(" "))
    }

    /// Both coordinates, or nothing. Non-finite values count as missing.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Some(Coordinates::new(lat, lon))
            }
            _ => None,
        }
    }

    pub fn start(&self) -> Option<DateTime<FixedOffset>> {
        self.starts_at.as_deref().and_then(parse_timestamp)
    }

    pub fn end(&self) -> Option<DateTime<FixedOffset>> {
        self.ends_at.as_deref().and_then(parse_timestamp)
    }

    pub fn is_scheduled(&self) -> bool {
        self.start().is_some()
    }

    /// Calendar date of the start instant after conversion to UTC.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        self.start().map(|start| utc_calendar_date(&start))
    }

    pub fn matches_municipality(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        self.municipality
            .as_deref()
            .is_some_and(|m| m.to_lowercase().contains(&needle))
    }
}

/// Parses a start/end timestamp. Offsets are honoured; naive forms are read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed);
    }

    let utc = FixedOffset::east_opt(0)?;

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc().with_timezone(&utc));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().with_timezone(&utc))
}

pub fn utc_calendar_date(moment: &DateTime<FixedOffset>) -> NaiveDate {
    moment.with_timezone(&Utc).date_naive()
}

/// Keeps the first event seen for each id. Returns the kept events and the dropped ids.
pub fn dedupe_by_id(events: Vec<CivicEvent>) -> (Vec<CivicEvent>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut dropped = Vec::new();
    let mut kept = Vec::with_capacity(events.len());

    for event in events {
        if seen.insert(event.id.clone()) {
            kept.push(event);
        } else {
            dropped.push(event.id);
        }
    }

    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_event(id: &str, starts_at: &str) -> CivicEvent {
        CivicEvent::new(id, format!("Event {}", id), "salud").with_starts_at(starts_at)
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn deserializes_event_with_missing_optional_fields() {
        let json = r#"{"id": "ev-1", "name": "Asamblea", "category": "legislativo"}"#;

        let event: CivicEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.id, "ev-1");
        assert!(event.coordinates().is_none());
        assert!(event.tags.is_empty());
        assert!(!event.is_scheduled());
    }

    #[test]
    fn tags_are_order_insignificant() {
        let a: CivicEvent = serde_json::from_str(
            r#"{"id": "1", "name": "n", "category": "salud", "tags": ["b", "a"]}"#,
        ).unwrap();
        let b: CivicEvent = serde_json::from_str(
            r#"{"id": "1", "name": "n", "category": "salud", "tags": ["a", "b", "a"]}"#,
        ).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn tag_chips_skip_blank_tags() {
        let event = CivicEvent::new("1", "n", "salud")
            .with_tag("vacunacion")
            .with_tag(" ")
            .with_tag("consulta");

        assert_eq!(event.tag_chips().as_deref(), Some("#consulta #vacunacion"));
        assert_eq!(CivicEvent::new("2", "n", "salud").tag_chips(), None);
    }

    #[test]
    fn coordinates_require_both_values() {
        let mut event = CivicEvent::new("1", "n", "salud");
        event.latitude = Some(19.4);

        assert!(event.coordinates().is_none());

        event.longitude = Some(-99.1);
        assert_eq!(event.coordinates(), Some(Coordinates::new(19.4, -99.1)));
    }

    #[test]
    fn non_finite_coordinates_are_treated_as_missing() {
        let event = CivicEvent::new("1", "n", "salud").with_coordinates(f64::NAN, -99.1);

        assert!(event.coordinates().is_none());
    }

    #[test]
    fn calendar_date_is_taken_after_utc_conversion() {
        let event = create_test_event("late", "2025-11-27T18:11:00-06:00");

        assert_eq!(event.calendar_date(), Some(date(2025, 11, 28)));
    }

    #[test]
    fn calendar_date_stays_on_same_day_when_utc_does_not_roll_over() {
        let event = create_test_event("morning", "2025-11-22T10:00:00-06:00");

        assert_eq!(event.calendar_date(), Some(date(2025, 11, 22)));
    }

    #[test]
    fn empty_start_marks_event_unscheduled() {
        let event = create_test_event("blank", "");

        assert!(!event.is_scheduled());
        assert_eq!(event.calendar_date(), None);
    }

    #[test]
    fn garbage_start_marks_event_unscheduled() {
        let event = create_test_event("bad", "next tuesday-ish");

        assert!(!event.is_scheduled());
    }

    #[test]
    fn naive_and_date_only_timestamps_are_read_as_utc() {
        assert_eq!(
            create_test_event("a", "2025-11-22T23:30:00").calendar_date(),
            Some(date(2025, 11, 22))
        );
        assert_eq!(
            create_test_event("b", "2025-11-22T08:15").calendar_date(),
            Some(date(2025, 11, 22))
        );
        assert_eq!(
            create_test_event("c", "2025-11-22").calendar_date(),
            Some(date(2025, 11, 22))
        );
    }

    #[test]
    fn municipality_match_is_case_insensitive_substring() {
        let event = CivicEvent::new("1", "n", "salud").with_municipality("Ciudad de México");

        assert!(event.matches_municipality("ciudad"));
        assert!(event.matches_municipality("  DE MÉXICO "));
        assert!(!event.matches_municipality("Iztapalapa"));
    }

    #[test]
    fn municipality_match_fails_without_municipality() {
        let event = CivicEvent::new("1", "n", "salud");

        assert!(!event.matches_municipality("cdmx"));
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let first = create_test_event("dup", "2025-11-22");
        let second = create_test_event("dup", "2025-11-23");
        let other = create_test_event("other", "2025-11-24");

        let (kept, dropped) = dedupe_by_id(vec![first.clone(), other.clone(), second]);

        assert_eq!(kept, vec![first, other]);
        assert_eq!(dropped, vec!["dup".to_string()]);
    }
}
