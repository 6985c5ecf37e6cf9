use chrono::{DateTime, Datelike, FixedOffset, Local, Locale, NaiveDate, TimeZone, Utc};

use crate::calendar::event::parse_timestamp;

const FALLBACK_LOCALE: Locale = Locale::es_MX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Language {
    Spanish,
    English,
    Other,
}

struct Patterns {
    moment: &'static str,
    full_date: &'static str,
    time: &'static str,
}

const SPANISH: Patterns = Patterns {
    moment: "%-d %b %Y, %H:%M",
    full_date: "%A, %-d de %B de %Y",
    time: "%H:%M",
};

const ENGLISH: Patterns = Patterns {
    moment: "%b %-d, %Y, %-I:%M %p",
    full_date: "%A, %B %-d, %Y",
    time: "%-I:%M %p",
};

const GENERIC: Patterns = Patterns {
    moment: "%-d %b %Y, %H:%M",
    full_date: "%A %-d %B %Y",
    time: "%H:%M",
};

/// Locale-aware labels and date strings for the calendar and the map popups.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleFormatter {
    tag: String,
    locale: Locale,
    language: Language,
}

impl LocaleFormatter {
    /// Accepts `es-MX`, `es_MX` or a bare language such as `en`.
    pub fn new(tag: &str) -> Self {
        let tag = tag.trim().to_string();
        let normalized = tag.replace('-', "_");

        let resolved = Locale::try_from(normalized.as_str())
            .or_else(|_| Locale::try_from(default_region(&normalized)));

        let Ok(locale) = resolved else {
            tracing::warn!("Unsupported locale '{}', falling back to es_MX", tag);
            return Self {
                tag,
                locale: FALLBACK_LOCALE,
                language: Language::Spanish,
            };
        };

        let lowered = normalized.to_lowercase();
        let language = if lowered.starts_with("es") {
            Language::Spanish
        } else if lowered.starts_with("en") {
            Language::English
        } else {
            Language::Other
        };

        Self { tag, locale, language }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    fn patterns(&self) -> &'static Patterns {
        match self.language {
            Language::Spanish => &SPANISH,
            Language::English => &ENGLISH,
            Language::Other => &GENERIC,
        }
    }

    /// Short weekday names, Monday first.
    pub fn weekday_labels(&self) -> Vec<String> {
        (0..7)
            .filter_map(|offset| NaiveDate::from_ymd_opt(2024, 1, 1 + offset))
            .map(|date| self.format_date(date, "%a"))
            .collect()
    }

    /// Full month names, January first, each capitalized.
    pub fn month_labels(&self) -> Vec<String> {
        (1..=12)
            .filter_map(|month| NaiveDate::from_ymd_opt(2024, month, 1))
            .map(|date| capitalize(&self.format_date(date, "%B")))
            .collect()
    }

    pub fn unscheduled_label(&self) -> &'static str {
        match self.language {
            Language::Spanish => "Por confirmar",
            _ => "To be confirmed",
        }
    }

    pub fn agenda_title(&self) -> &'static str {
        match self.language {
            Language::Spanish => "Agenda de eventos",
            _ => "Event agenda",
        }
    }

    pub fn empty_agenda_label(&self) -> &'static str {
        match self.language {
            Language::Spanish => "No hay eventos registrados para esta fecha.",
            _ => "No events registered for this date.",
        }
    }

    /// Medium date plus short time in the local zone, or the unscheduled label.
    pub fn format_event_moment(&self, timestamp: Option<&str>) -> String {
        self.format_event_moment_in(timestamp, &Local)
    }

    pub fn format_event_moment_in<Tz: TimeZone>(&self, timestamp: Option<&str>, zone: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        match timestamp.and_then(parse_timestamp) {
            Some(moment) => moment
                .with_timezone(zone)
                .format_localized(self.patterns().moment, self.locale)
                .to_string(),
            None => self.unscheduled_label().to_string(),
        }
    }

    pub fn format_full_date(&self, date: NaiveDate) -> String {
        self.format_date(date, self.patterns().full_date)
    }

    /// Accessible label for a calendar cell.
    pub fn availability_label(&self, has_events: bool, date: NaiveDate) -> String {
        let formatted = self.format_full_date(date);
        match (self.language, has_events) {
            (Language::Spanish, true) => format!("Ver eventos para el {}", formatted),
            (Language::Spanish, false) => format!("Sin eventos para el {}", formatted),
            (_, true) => format!("View events for {}", formatted),
            (_, false) => format!("No events for {}", formatted),
        }
    }

    pub fn format_time_range(&self, start: Option<&str>, end: Option<&str>) -> String {
        self.format_time_range_in(start, end, &Local)
    }

    pub fn format_time_range_in<Tz: TimeZone>(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        zone: &Tz,
    ) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        let Some(start) = start.and_then(parse_timestamp) else {
            return match self.language {
                Language::Spanish => "Horario por confirmar".to_string(),
                _ => "Schedule to be confirmed".to_string(),
            };
        };

        let start_label = self.format_time(&start, zone);
        match end.and_then(parse_timestamp) {
            Some(end) => format!("{} - {}", start_label, self.format_time(&end, zone)),
            None => match self.language {
                Language::Spanish => format!("Inicia {}", start_label),
                _ => format!("Starts {}", start_label),
            },
        }
    }

    fn format_time<Tz: TimeZone>(&self, moment: &DateTime<FixedOffset>, zone: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        moment
            .with_timezone(zone)
            .format_localized(self.patterns().time, self.locale)
            .to_string()
    }

    fn format_date(&self, date: NaiveDate, pattern: &str) -> String {
        match date.and_hms_opt(12, 0, 0) {
            Some(noon) => Utc
                .from_utc_datetime(&noon)
                .format_localized(pattern, self.locale)
                .to_string(),
            None => format!("{}-{:02}-{:02}", date.year(), date.month(), date.day()),
        }
    }
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        Self::new("es-MX")
    }
}

fn default_region(tag: &str) -> &'static str {
    match tag.split('_').next().unwrap_or_default().to_lowercase().as_str() {
        "es" => "es_MX",
        "en" => "en_US",
        "fr" => "fr_FR",
        "pt" => "pt_BR",
        "de" => "de_DE",
        _ => "",
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn cdmx() -> FixedOffset {
        FixedOffset::west_opt(6 * 3600).unwrap()
    }

    #[test]
    fn english_weekdays_start_on_monday() {
        let labels = LocaleFormatter::new("en-US").weekday_labels();

        assert_eq!(labels, vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
    }

    #[test]
    fn spanish_weekdays_start_on_monday() {
        let labels = LocaleFormatter::new("es-MX").weekday_labels();

        assert_eq!(labels.len(), 7);
        assert_eq!(labels[0], "lun");
        assert_eq!(labels[6], "dom");
    }

    #[test]
    fn spanish_month_labels_are_capitalized() {
        let labels = LocaleFormatter::new("es-MX").month_labels();

        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "Enero");
        assert_eq!(labels[10], "Noviembre");
    }

    #[test]
    fn english_month_labels() {
        let labels = LocaleFormatter::new("en_US").month_labels();

        assert_eq!(labels[1], "February");
    }

    #[test]
    fn bare_language_resolves_to_default_region() {
        let formatter = LocaleFormatter::new("en");

        assert_eq!(formatter.month_labels()[0], "January");
        assert_eq!(formatter.tag(), "en");
    }

    #[test]
    fn unknown_locale_falls_back_to_spanish_throughout() {
        let formatter = LocaleFormatter::new("xx-YY");

        assert_eq!(formatter.tag(), "xx-YY");
        assert_eq!(formatter.month_labels()[0], "Enero");
        assert_eq!(formatter.unscheduled_label(), "Por confirmar");
        assert_eq!(formatter.agenda_title(), "Agenda de eventos");
        assert_eq!(formatter.format_time_range(None, None), "Horario por confirmar");
        assert_eq!(
            formatter.availability_label(true, date(2025, 11, 22)),
            "Ver eventos para el sábado, 22 de noviembre de 2025"
        );
    }

    #[test]
    fn agenda_labels_follow_language() {
        assert_eq!(LocaleFormatter::new("es-MX").agenda_title(), "Agenda de eventos");
        assert_eq!(LocaleFormatter::new("en-GB").empty_agenda_label(), "No events registered for this date.");
    }

    #[test]
    fn formats_event_moment_in_zone() {
        let formatter = LocaleFormatter::new("en-US");

        let label = formatter.format_event_moment_in(Some("2025-11-22T10:00:00-06:00"), &cdmx());

        assert_eq!(label, "Nov 22, 2025, 10:00 AM");
    }

    #[test]
    fn spanish_event_moment_uses_24h_clock() {
        let formatter = LocaleFormatter::new("es-MX");

        let label = formatter.format_event_moment_in(Some("2025-11-27T18:11:00-06:00"), &cdmx());

        assert!(label.starts_with("27 "), "{}", label);
        assert!(label.ends_with("2025, 18:11"), "{}", label);
    }

    #[test]
    fn missing_or_invalid_moment_is_to_be_confirmed() {
        let formatter = LocaleFormatter::new("es-MX");

        assert_eq!(formatter.format_event_moment(None), "Por confirmar");
        assert_eq!(formatter.format_event_moment(Some("")), "Por confirmar");
        assert_eq!(formatter.format_event_moment(Some("mañana")), "Por confirmar");
    }

    #[test]
    fn full_date_in_english() {
        let formatter = LocaleFormatter::new("en-US");

        assert_eq!(formatter.format_full_date(date(2025, 11, 22)), "Saturday, November 22, 2025");
    }

    #[test]
    fn full_date_in_spanish() {
        let formatter = LocaleFormatter::new("es-MX");

        assert_eq!(formatter.format_full_date(date(2025, 11, 22)), "sábado, 22 de noviembre de 2025");
    }

    #[test]
    fn availability_label_depends_on_language_and_events() {
        let es = LocaleFormatter::new("es-MX");
        let en = LocaleFormatter::new("en-US");
        let day = date(2025, 11, 22);

        assert!(es.availability_label(true, day).starts_with("Ver eventos para el "));
        assert!(es.availability_label(false, day).starts_with("Sin eventos para el "));
        assert_eq!(en.availability_label(false, day), "No events for Saturday, November 22, 2025");
    }

    #[test]
    fn time_range_variants() {
        let es = LocaleFormatter::new("es-MX");
        let zone = cdmx();

        assert_eq!(
            es.format_time_range_in(
                Some("2025-11-22T10:00:00-06:00"),
                Some("2025-11-22T12:30:00-06:00"),
                &zone
            ),
            "10:00 - 12:30"
        );
        assert_eq!(
            es.format_time_range_in(Some("2025-11-22T10:00:00-06:00"), Some("??"), &zone),
            "Inicia 10:00"
        );
        assert_eq!(es.format_time_range_in(None, None, &zone), "Horario por confirmar");
    }
}
