pub mod booking;
pub mod calendar;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;

pub use booking::{BookingContext, BookingStep, BookingSummary, BookingWizard};
pub use calendar::{
    CalendarState, DayCell, GridDay, ScheduleSlotProvider, TimeSlot, TimeSlotProvider, ViewMonth,
    build_month_grid, navigate_month, select_date,
};
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use form::{
    BookingField, BookingFormController, ContactField, ContactFormController, ContactMethod,
    CustomerInfo, FieldValue, FormEvent,
};
