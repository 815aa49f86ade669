use crate::calendar::date::{ViewMonth, date_key, days_in_month, first_weekday};
use chrono::NaiveDate;
use serde::Serialize;

/// One square of the month grid. `month` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub day: u8,
    pub month: u8,
    pub year: i32,
    pub is_current_month: bool,
}

impl DayCell {
    fn key(&self) -> (i32, u8, u8) {
        (self.year, self.month, self.day)
    }

    pub fn is_same_day(&self, date: NaiveDate) -> bool {
        self.key() == date_key(date)
    }

    pub fn is_before(&self, date: NaiveDate) -> bool {
        self.key() < date_key(date)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month as u32 + 1, self.day as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayFlags {
    pub is_today: bool,
    pub is_selected: bool,
    pub is_disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridDay {
    #[serde(flatten)]
    pub cell: DayCell,
    #[serde(flatten)]
    pub flags: DayFlags,
}

/// Number of cells for a month: whole weeks covering padding and body.
pub fn grid_len(view_year: i32, view_month: u8) -> usize {
    let used = first_weekday(view_year, view_month) as usize
        + days_in_month(view_year, view_month) as usize;
    used.div_ceil(7) * 7
}

/// Builds the Sunday-first cells for `view_month` (zero-based) with padding
/// from the neighbouring months.
///
/// The result is never empty and its length is a multiple of 7. Flags are
/// derived from `today` and `selected`; any date strictly before `today` is
/// disabled.
pub fn build_month_grid(
    view_year: i32,
    view_month: u8,
    selected: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<GridDay> {
    debug_assert!(view_month < 12, "view_month must be zero-based 0..=11");

    let view = ViewMonth::new(view_year, i32::from(view_month));
    let prev = view.shifted(-1);
    let next = view.shifted(1);

    let leading = view.first_weekday();
    let days = view.days();
    let total = grid_len(view.year, view.month);

    let mut cells = Vec::with_capacity(total);

    let prev_days = prev.days();
    for day in (prev_days - leading + 1)..=prev_days {
        cells.push(cell(prev, day, false));
    }

    for day in 1..=days {
        cells.push(cell(view, day, true));
    }

    let mut day = 1;
    while cells.len() < total {
        cells.push(cell(next, day, false));
        day += 1;
    }

    cells
        .into_iter()
        .map(|cell| GridDay {
            flags: DayFlags {
                is_today: cell.is_same_day(today),
                is_selected: selected.is_some_and(|date| cell.is_same_day(date)),
                is_disabled: cell.is_before(today),
            },
            cell,
        })
        .collect()
}

fn cell(view: ViewMonth, day: u8, is_current_month: bool) -> DayCell {
    DayCell {
        day,
        month: view.month,
        year: view.year,
        is_current_month,
    }
}
