use chrono::{Datelike, Days, Months, NaiveDate};
use thiserror::Error;

use crate::calendar::{DateIndex, DayStatus};

pub const MIN_GRID_CELLS: usize = 42;
pub const YEAR_WINDOW: i32 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum CalendarError {
    #[error("Month index must be between 0 and 11, got {0}")]
    InvalidMonth(u32),
    #[error("Year {year} is outside the selectable range {first}-{last}")]
    YearOutOfRange { year: i32, first: i32, last: i32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: Option<NaiveDate>,
    pub status: Option<DayStatus>,
    pub is_today: bool,
}

impl DayCell {
    pub fn blank() -> Self {
        Self {
            date: None,
            status: None,
            is_today: false,
        }
    }

    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            status: Some(DayStatus::Empty),
            is_today: false,
        }
    }

    pub fn with_status(mut self, status: DayStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_today(mut self, today: bool) -> Self {
        self.is_today = today;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == Some(DayStatus::Active)
    }
}

impl MonthLayout {
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }

    pub fn active_dates(&self) -> Vec<NaiveDate> {
        self.cells
            .iter()
            .filter(|cell| cell.is_active())
            .filter_map(|cell| cell.date)
            .collect()
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn days_in_month(anchor: NaiveDate) -> u32 {
    let first = first_of_month(anchor);
    first
        .checked_add_months(Months::new(1))
        .map(|next| next.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31)
}

/// Monday-first month grid of `max(42, whole weeks needed)` cells; padding cells are `None`.
pub fn build_calendar_days(anchor: NaiveDate) -> Vec<Option<NaiveDate>> {
    let first = first_of_month(anchor);
    let days_in_month = days_in_month(first) as usize;
    let leading_blanks = first.weekday().num_days_from_monday() as usize;
    let total_cells = MIN_GRID_CELLS.max((leading_blanks + days_in_month).div_ceil(7) * 7);

    (0..total_cells)
        .map(|index| {
            let day_number = index as i64 - leading_blanks as i64 + 1;
            if day_number < 1 || day_number > days_in_month as i64 {
                return None;
            }
            first.checked_add_days(Days::new((day_number - 1) as u64))
        })
        .collect()
}

pub fn calculate_layout(anchor: NaiveDate, index: &DateIndex, today: NaiveDate) -> MonthLayout {
    let cells = build_calendar_days(anchor)
        .into_iter()
        .map(|date| match date {
            Some(date) => DayCell::new(date)
                .with_status(index.status(date))
                .with_today(date == today),
            None => DayCell::blank(),
        })
        .collect();

    MonthLayout {
        year: anchor.year(),
        month: anchor.month(),
        cells,
    }
}

/// The month shown by the calendar dialog. The anchor always sits on day 1.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarNavigator {
    anchor: NaiveDate,
}

impl CalendarNavigator {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            anchor: first_of_month(today),
        }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn month_index(&self) -> u32 {
        self.anchor.month0()
    }

    pub fn year(&self) -> i32 {
        self.anchor.year()
    }

    pub fn change_month(&mut self, offset: i32) {
        let months = Months::new(offset.unsigned_abs());
        let shifted = if offset >= 0 {
            self.anchor.checked_add_months(months)
        } else {
            self.anchor.checked_sub_months(months)
        };

        if let Some(shifted) = shifted {
            self.anchor = first_of_month(shifted);
        }
    }

    pub fn select_month(&mut self, month_index: u32) -> Result<(), CalendarError> {
        let date = (month_index < 12)
            .then(|| NaiveDate::from_ymd_opt(self.anchor.year(), month_index + 1, 1))
            .flatten()
            .ok_or(CalendarError::InvalidMonth(month_index))?;
        self.anchor = date;
        Ok(())
    }

    /// Years offered by the year selector: two before the shown year through two after.
    pub fn year_options(&self) -> Vec<i32> {
        let base_year = self.anchor.year() - 2;
        (0..YEAR_WINDOW).map(|offset| base_year + offset).collect()
    }

    pub fn select_year(&mut self, year: i32) -> Result<(), CalendarError> {
        let options = self.year_options();
        let first = options[0];
        let last = options[options.len() - 1];
        if year < first || year > last {
            return Err(CalendarError::YearOutOfRange { year, first, last });
        }

        if let Some(date) = NaiveDate::from_ymd_opt(year, self.anchor.month(), 1) {
            self.anchor = date;
        }
        Ok(())
    }

    pub fn layout(&self, index: &DateIndex, today: NaiveDate) -> MonthLayout {
        calculate_layout(self.anchor, index, today)
    }
}
