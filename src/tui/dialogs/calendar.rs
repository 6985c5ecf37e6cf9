use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use civic_pulse::{app::DashboardState, ui::month_view::MonthLayout};

use crate::tui::dialogs::centered_area;

const DIALOG_WIDTH: u16 = 62;
const DIALOG_HEIGHT: u16 = 13;
const CELL_WIDTH: u16 = 5;
const GRID_TOP: u16 = 2;

pub fn dialog_area(frame: Rect) -> Rect {
    centered_area(frame, DIALOG_WIDTH, DIALOG_HEIGHT)
}

/// Date drawn at a terminal position inside the dialog, if any.
pub fn date_at(area: Rect, layout: &MonthLayout, column: u16, row: u16) -> Option<NaiveDate> {
    let inner_x = area.x + 1;
    let grid_y = area.y + 1 + GRID_TOP;
    if column < inner_x || row < grid_y {
        return None;
    }

    let weekday = (column - inner_x) / CELL_WIDTH;
    if weekday >= 7 {
        return None;
    }
    let week = row - grid_y;
    let index = usize::from(week) * 7 + usize::from(weekday);
    layout.cells.get(index).and_then(|cell| cell.date)
}

pub fn render(f: &mut Frame, app: &DashboardState, today: NaiveDate) {
    let area = dialog_area(f.size());
    let layout = app.calendar_layout(today);
    let theme = &app.theme;
    let formatter = &app.formatter;

    f.render_widget(Clear, area);

    let month_name = formatter
        .month_labels()
        .get(app.navigator().month_index() as usize)
        .cloned()
        .unwrap_or_default();

    let mut title_spans = vec![Span::styled(
        format!("{} {}", month_name, layout.year),
        Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
    )];
    title_spans.push(Span::raw("   "));
    for year in app.navigator().year_options() {
        let style = if year == layout.year {
            Style::default().fg(theme.selected_fg).bg(theme.selected_bg)
        } else {
            Style::default().fg(theme.empty_day)
        };
        title_spans.push(Span::styled(format!(" {} ", year), style));
    }

    let header = formatter
        .weekday_labels()
        .into_iter()
        .map(|label| {
            let short: String = label.chars().take(3).collect();
            Span::styled(format!(" {:<4}", short), Style::default().fg(theme.weekday_header))
        })
        .collect::<Vec<_>>();

    let mut lines = vec![Line::from(title_spans), Line::from(header)];

    for week in layout.weeks() {
        let spans = week
            .iter()
            .map(|cell| {
                let Some(date) = cell.date else {
                    return Span::raw(" ".repeat(CELL_WIDTH as usize));
                };

                let mut style = if cell.is_active() {
                    Style::default()
                        .fg(theme.active_day)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(theme.empty_day)
                };
                if cell.is_today {
                    style = style.fg(theme.today);
                }
                if date == app.calendar_cursor {
                    style = style.bg(theme.selected_bg).fg(theme.selected_fg);
                }

                Span::styled(format!(" {:>2}  ", date.day()), style)
            })
            .collect::<Vec<_>>();
        lines.push(Line::from(spans));
    }

    let has_events = app.index().has_events(app.calendar_cursor);
    lines.push(Line::from(Span::styled(
        formatter.availability_label(has_events, app.calendar_cursor),
        Style::default().fg(if has_events { theme.active_day } else { theme.empty_day }),
    )));
    lines.push(Line::from(vec![
        Span::styled("hjkl", Style::default().fg(theme.title)),
        Span::raw(" move | "),
        Span::styled("Enter", Style::default().fg(theme.success)),
        Span::raw(" open | "),
        Span::styled("{ }", Style::default().fg(theme.title)),
        Span::raw(" month | "),
        Span::styled("[ ]", Style::default().fg(theme.title)),
        Span::raw(" year | "),
        Span::styled("Esc", Style::default().fg(theme.error)),
        Span::raw(" close"),
    ]));

    let dialog = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Calendario "),
    );
    f.render_widget(dialog, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_pulse::calendar::DateIndex;
    use civic_pulse::ui::month_view::calculate_layout;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn november() -> MonthLayout {
        calculate_layout(date(2025, 11, 1), &DateIndex::default(), date(2025, 11, 18))
    }

    #[test]
    fn click_on_first_saturday_cell() {
        let area = Rect::new(10, 5, DIALOG_WIDTH, DIALOG_HEIGHT);

        // Saturday is the sixth column; the first grid row sits below title and weekday lines.
        let column = 11 + 5 * CELL_WIDTH + 2;
        let row = 5 + 1 + GRID_TOP;

        assert_eq!(date_at(area, &november(), column, row), Some(date(2025, 11, 1)));
    }

    #[test]
    fn click_on_padding_or_header_yields_nothing() {
        let area = Rect::new(10, 5, DIALOG_WIDTH, DIALOG_HEIGHT);

        assert_eq!(date_at(area, &november(), 12, 5 + 1 + GRID_TOP), None);
        assert_eq!(date_at(area, &november(), 20, 6), None);
        assert_eq!(date_at(area, &november(), 11 + 7 * CELL_WIDTH, 9), None);
    }

    #[test]
    fn last_row_of_days() {
        let area = Rect::new(0, 0, DIALOG_WIDTH, DIALOG_HEIGHT);

        // 30 November 2025 is a Sunday in the fifth week.
        assert_eq!(date_at(area, &november(), 1 + 6 * CELL_WIDTH, 1 + GRID_TOP + 4), Some(date(2025, 11, 30)));
    }
}
