use crate::calendar::date::ViewMonth;
use crate::calendar::grid::{GridDay, build_month_grid};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Shifts the displayed month by `delta` whole months.
pub fn navigate_month(view: ViewMonth, delta: i32) -> ViewMonth {
    view.shifted(delta)
}

/// Past dates are never selectable.
pub fn select_date(candidate: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    (candidate >= today).then_some(candidate)
}

/// State behind the date-selection step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    view: ViewMonth,
    selected: Option<NaiveDate>,
    today: NaiveDate,
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view: ViewMonth::of(today),
            selected: None,
            today,
        }
    }

    /// Opens on the month of a previously chosen date. A past date is kept as
    /// the view anchor but not as the selection.
    pub fn with_selected(mut self, date: NaiveDate) -> Self {
        self.view = ViewMonth::of(date);
        self.selected = select_date(date, self.today);
        self
    }

    pub fn view(&self) -> ViewMonth {
        self.view
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn navigate(&mut self, delta: i32) {
        self.view = navigate_month(self.view, delta);
        debug!(year = self.view.year, month = self.view.month, "Calendar view moved");
    }

    pub fn prev_month(&mut self) {
        self.navigate(-1);
    }

    pub fn next_month(&mut self) {
        self.navigate(1);
    }

    /// Returns `false` and leaves the selection untouched for past dates.
    pub fn select(&mut self, candidate: NaiveDate) -> bool {
        match select_date(candidate, self.today) {
            Some(date) => {
                self.selected = Some(date);
                debug!(%date, "Date selected");
                true
            }
            None => {
                warn!(%candidate, today = %self.today, "Rejected past date selection");
                false
            }
        }
    }

    pub fn grid(&self) -> Vec<GridDay> {
        build_month_grid(self.view.year, self.view.month, self.selected, self.today)
    }

    pub fn weeks(&self) -> Vec<Vec<GridDay>> {
        self.grid().chunks(7).map(<[GridDay]>::to_vec).collect()
    }

    pub fn month_title(&self) -> String {
        self.view.title()
    }
}
