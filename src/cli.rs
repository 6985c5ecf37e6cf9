use std::{
    env,
    io::Write,
    process::{Command, Stdio},
};

use chrono::NaiveDate;

use civic_pulse::{
    calendar::{agenda::agenda_listing, category::category_label, AgendaRoute, CivicEvent},
    storage::config::Config,
    sync::repository::EventRepository,
    ui::locale::LocaleFormatter,
};

pub const USAGE: &str =
    "Usage: civic-pulse [--municipality NAME] [--locale TAG] [--offline] [--agenda [YYYY-MM-DD]]";

#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    Dashboard,
    Agenda(AgendaRoute),
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub mode: CliMode,
    pub municipality: Option<String>,
    pub locale: Option<String>,
    pub offline: bool,
}

impl CliOptions {
    /// Command-line flags win over the config file for this run only.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(municipality) = &self.municipality {
            config.events.municipality = Some(municipality.clone());
        }
        if let Some(locale) = &self.locale {
            config.ui.language = locale.clone();
        }
        if self.offline {
            config.api.offline_mode = true;
        }
    }
}

pub fn parse_cli_options<I>(args: I) -> Result<CliOptions, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = CliOptions {
        mode: CliMode::Dashboard,
        municipality: None,
        locale: None,
        offline: false,
    };
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--municipality" | "-m" => {
                let value = args.next().ok_or("--municipality requires a name")?;
                options.municipality = Some(value);
            }
            "--locale" | "-l" => {
                let value = args.next().ok_or("--locale requires a tag such as es-MX")?;
                options.locale = Some(value);
            }
            "--offline" => {
                options.offline = true;
            }
            "--agenda" => {
                let route = match args.next_if(|next| !next.starts_with("--")) {
                    Some(date_str) => NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                        .map(AgendaRoute::Date)
                        .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD.", date_str))?,
                    None => AgendaRoute::Listing,
                };
                options.mode = CliMode::Agenda(route);
            }
            "--help" | "-h" => {
                options.mode = CliMode::Help;
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(options)
}

pub async fn run_agenda_mode(config: &Config, route: AgendaRoute) -> anyhow::Result<()> {
    let repository = EventRepository::from_config(config)?;
    let formatter = LocaleFormatter::new(&config.ui.language);

    let events = match route {
        AgendaRoute::Date(date) => repository.events_for_date(date).await,
        AgendaRoute::Listing => {
            let events = repository.load(config.events.municipality.as_deref()).await;
            agenda_listing(&events)
        }
    };

    tracing::info!("Printing agenda {} with {} events", route, events.len());
    let agenda = format_agenda_text(route, &events, &formatter);
    display_with_pager(&agenda)
}

pub fn format_agenda_text(route: AgendaRoute, events: &[CivicEvent], formatter: &LocaleFormatter) -> String {
    let mut lines = Vec::new();
    match route {
        AgendaRoute::Date(date) => lines.push(format!(
            "{} – {}",
            formatter.agenda_title(),
            formatter.format_full_date(date)
        )),
        AgendaRoute::Listing => lines.push(formatter.agenda_title().to_string()),
    }
    lines.push(String::new());

    if events.is_empty() {
        lines.push(formatter.empty_agenda_label().to_string());
    }

    for event in events {
        lines.push(build_agenda_line(event, route, formatter));
        if let Some(place) = place_label(event) {
            lines.push(format!("    {}", place));
        }
        if let Some(chips) = event.tag_chips() {
            lines.push(format!("    {}", chips));
        }
        lines.push(format!("    {}", AgendaRoute::for_event(event)));
    }

    lines.join("\n")
}

fn build_agenda_line(event: &CivicEvent, route: AgendaRoute, formatter: &LocaleFormatter) -> String {
    let time_label = match route {
        AgendaRoute::Date(_) => {
            formatter.format_time_range(event.starts_at.as_deref(), event.ends_at.as_deref())
        }
        AgendaRoute::Listing => formatter.format_event_moment(event.starts_at.as_deref()),
    };

    format!(
        "- {:<24} {} [{}]",
        time_label,
        event.name,
        category_label(&event.category)
    )
}

fn place_label(event: &CivicEvent) -> Option<String> {
    match (&event.address, &event.municipality) {
        (Some(address), Some(municipality)) if !address.is_empty() => {
            Some(format!("{}, {}", address, municipality))
        }
        (Some(address), _) if !address.is_empty() => Some(address.clone()),
        (_, Some(municipality)) if !municipality.is_empty() => Some(municipality.clone()),
        _ => None,
    }
}

fn display_with_pager(text: &str) -> anyhow::Result<()> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let Some(cmd) = parts.next() else {
        println!("{text}");
        return Ok(());
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd).args(&args).stdin(Stdio::piped()).spawn() {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(e) => {
            tracing::warn!("Pager '{}' unavailable: {}", cmd, e);
            println!("{text}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn no_arguments_opens_dashboard() {
        let options = parse_cli_options(args(&[])).unwrap();

        assert_eq!(options.mode, CliMode::Dashboard);
        assert!(!options.offline);
    }

    #[test]
    fn agenda_with_date() {
        let options = parse_cli_options(args(&["--agenda", "2025-11-25"])).unwrap();

        assert_eq!(options.mode, CliMode::Agenda(AgendaRoute::Date(date(2025, 11, 25))));
    }

    #[test]
    fn bare_agenda_is_listing_even_before_other_flags() {
        let options = parse_cli_options(args(&["--agenda", "--offline"])).unwrap();

        assert_eq!(options.mode, CliMode::Agenda(AgendaRoute::Listing));
        assert!(options.offline);
    }

    #[test]
    fn invalid_agenda_date_is_rejected() {
        assert!(parse_cli_options(args(&["--agenda", "2025/11/25"])).is_err());
    }

    #[test]
    fn flags_override_config() {
        let options =
            parse_cli_options(args(&["--municipality", "Puebla", "--locale", "en-US", "--offline"])).unwrap();
        let mut config = Config::default();

        options.apply_to(&mut config);

        assert_eq!(config.events.municipality.as_deref(), Some("Puebla"));
        assert_eq!(config.ui.language, "en-US");
        assert!(config.api.offline_mode);
    }

    #[test]
    fn missing_flag_value_and_unknown_flag_are_errors() {
        assert!(parse_cli_options(args(&["--municipality"])).is_err());
        assert!(parse_cli_options(args(&["--sample"])).is_err());
    }

    #[test]
    fn empty_agenda_says_so() {
        let formatter = LocaleFormatter::new("es-MX");

        let text = format_agenda_text(AgendaRoute::Date(date(2025, 11, 23)), &[], &formatter);

        assert!(text.starts_with("Agenda de eventos – domingo, 23 de noviembre de 2025"));
        assert!(text.ends_with("No hay eventos registrados para esta fecha."));
    }

    #[test]
    fn listing_shows_placeholder_and_links() {
        let formatter = LocaleFormatter::new("en-US");
        let events = vec![
            CivicEvent::new("u", "Town hall", "legislativo").with_municipality("Puebla"),
        ];

        let text = format_agenda_text(AgendaRoute::Listing, &events, &formatter);

        assert!(text.contains("To be confirmed"));
        assert!(text.contains("Town hall [Legislativo]"));
        assert!(text.contains("    Puebla"));
        assert!(text.contains("    /eventos"));
    }

    #[test]
    fn agenda_lists_tags_under_the_event() {
        let formatter = LocaleFormatter::new("es-MX");
        let events = vec![
            CivicEvent::new("h", "Sesión ordinaria", "legislativo")
                .with_starts_at("2025-11-27T10:00:00-06:00")
                .with_tag("sesion")
                .with_tag("hcd"),
        ];

        let text = format_agenda_text(AgendaRoute::Date(date(2025, 11, 27)), &events, &formatter);

        assert!(text.contains("    #hcd #sesion"));
    }
}
