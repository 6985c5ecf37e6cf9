use chrono::NaiveDate;
use crossterm::event::KeyCode;

use crate::app::{DashboardState, Mode};
use crate::calendar::AgendaRoute;
use crate::input::Action;
use crate::ui::theme::Theme;

#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Reload,
    Goto(NaiveDate),
    Month(u32),
    Year(i32),
    Municipality(Option<String>),
    Locale(String),
    Theme(String),
    Agenda(AgendaRoute),
    Error(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();

    let Some(command_text) = trimmed.strip_prefix(':') else {
        return Command::Error("Commands must start with ':'".to_string());
    };

    let parts: Vec<&str> = command_text.split_whitespace().collect();

    if parts.is_empty() {
        return Command::Error("Empty command".to_string());
    }

    match parts[0] {
        "q" | "quit" => Command::Quit,
        "reload" | "r" => Command::Reload,
        "goto" => match parts.get(1) {
            None => Command::Error("goto requires a date argument".to_string()),
            Some(value) => match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                Ok(date) => Command::Goto(date),
                Err(_) => Command::Error(format!("Invalid date format: {}", value)),
            },
        },
        "month" => match parts.get(1).map(|value| value.parse::<u32>()) {
            Some(Ok(month)) if (1..=12).contains(&month) => Command::Month(month),
            Some(_) => Command::Error(format!("Invalid month: {}", parts[1])),
            None => Command::Error("month requires a number from 1 to 12".to_string()),
        },
        "year" => match parts.get(1).map(|value| value.parse::<i32>()) {
            Some(Ok(year)) => Command::Year(year),
            Some(Err(_)) => Command::Error(format!("Invalid year: {}", parts[1])),
            None => Command::Error("year requires a number".to_string()),
        },
        "municipality" | "mun" => {
            let name = parts[1..].join(" ");
            Command::Municipality((!name.is_empty()).then_some(name))
        }
        "locale" | "lang" => match parts.get(1) {
            Some(tag) => Command::Locale(tag.to_string()),
            None => Command::Error("locale requires a tag such as es-MX".to_string()),
        },
        "theme" => match parts.get(1) {
            Some(name) => Command::Theme(name.to_string()),
            None => Command::Error("theme requires a theme name".to_string()),
        },
        "agenda" => match parts.get(1) {
            None => Command::Agenda(AgendaRoute::Listing),
            Some(value) if value.starts_with('/') => match AgendaRoute::parse(value) {
                Some(route) => Command::Agenda(route),
                None => Command::Error(format!("Unknown agenda route: {}", value)),
            },
            Some(value) => match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                Ok(date) => Command::Agenda(AgendaRoute::Date(date)),
                Err(_) => Command::Error(format!("Invalid date format: {}", value)),
            },
        },
        _ => Command::Error(format!("Unknown command: {}", parts[0])),
    }
}

/// Applies a parsed command to the dashboard. Commands that need the loader or the
/// preference store come back as an `Action`.
pub fn execute_command(command: Command, state: &mut DashboardState) -> Option<Action> {
    match command {
        Command::Quit => return Some(Action::Quit),
        Command::Reload => return Some(Action::Reload),
        Command::Municipality(name) => return Some(Action::SetMunicipality(name)),
        Command::Locale(tag) => return Some(Action::SetLocale(tag)),
        Command::Goto(date) => {
            state.goto_date(date);
            state.open_calendar();
        }
        Command::Month(month) => {
            if let Err(e) = state.select_month(month - 1) {
                state.status_message = Some(e.to_string());
            }
        }
        Command::Year(year) => {
            if let Err(e) = state.select_year(year) {
                state.status_message = Some(e.to_string());
            }
        }
        Command::Theme(name) => state.theme = Theme::get_by_name(&name),
        Command::Agenda(route) => state.show_agenda(route),
        Command::Error(message) => {
            tracing::warn!("Command error: {}", message);
            state.status_message = Some(message);
        }
    }
    None
}

pub fn handle_key(key: KeyCode, state: &mut DashboardState) -> Option<Action> {
    match key {
        KeyCode::Enter => {
            let command = parse_command(&state.command_buffer);
            state.command_buffer.clear();
            state.mode = Mode::Normal;
            execute_command(command, state)
        }
        KeyCode::Esc => {
            state.command_buffer.clear();
            state.mode = Mode::Normal;
            None
        }
        KeyCode::Backspace => {
            state.command_buffer.pop();
            if state.command_buffer.is_empty() {
                state.mode = Mode::Normal;
            }
            None
        }
        KeyCode::Char(c) => {
            state.command_buffer.push(c);
            None
        }
        _ => None,
    }
}
