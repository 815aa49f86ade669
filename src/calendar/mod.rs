pub mod date;
pub mod grid;
pub mod navigation;
pub mod slots;

pub use date::{ViewMonth, today};
pub use grid::{DayCell, DayFlags, GridDay, build_month_grid};
pub use navigation::{CalendarState, navigate_month, select_date};
pub use slots::{ScheduleSlotProvider, TimeSlot, TimeSlotProvider};
