use chrono::{Datelike, Local, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_SHORT: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Number of days in a zero-based month (January = 0); 0 when the month
/// does not exist.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    (28..=31u8)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(year, u32::from(month) + 1, u32::from(day)).is_some())
        .unwrap_or(0)
}

/// Weekday of the 1st of a zero-based month, 0 = Sunday.
pub fn first_weekday(year: i32, month: u8) -> u8 {
    weekday_of(year, month, 1)
}

/// Weekday of a zero-based date, 0 = Sunday.
pub fn weekday_of(year: i32, month: u8, day: u8) -> u8 {
    NaiveDate::from_ymd_opt(year, u32::from(month) + 1, u32::from(day))
        .map_or(0, |date| date.weekday().num_days_from_sunday() as u8)
}

/// The local calendar date, time-of-day dropped.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Ordering key shared by `DayCell` and `NaiveDate` comparisons.
pub fn date_key(date: NaiveDate) -> (i32, u8, u8) {
    (date.year(), date.month0() as u8, date.day() as u8)
}

/// A displayed month. `month` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewMonth {
    pub year: i32,
    pub month: u8,
}

impl ViewMonth {
    /// Normalizes out-of-range months by rolling the year, so month 12 of
    /// 2026 becomes January 2027 and month -1 becomes December of the year
    /// before. Saturates at the first and last month `NaiveDate` can hold.
    pub fn new(year: i32, month: i32) -> Self {
        Self::from_index(i64::from(year) * 12 + i64::from(month))
    }

    fn from_index(index: i64) -> Self {
        let first = i64::from(NaiveDate::MIN.year()) * 12;
        let last = i64::from(NaiveDate::MAX.year()) * 12 + 11;
        let index = index.clamp(first, last);
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u8,
        }
    }

    fn index(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month)
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0() as u8,
        }
    }

    pub fn shifted(self, delta: i32) -> Self {
        Self::from_index(self.index() + i64::from(delta))
    }

    pub fn days(self) -> u8 {
        days_in_month(self.year, self.month)
    }

    pub fn first_weekday(self) -> u8 {
        first_weekday(self.year, self.month)
    }

    pub fn name(self) -> &'static str {
        MONTH_NAMES[self.month as usize % 12]
    }

    pub fn title(self) -> String {
        format!("{} {}", self.name(), self.year)
    }
}

pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
