pub mod context;
pub mod wizard;

pub use context::BookingContext;
pub use wizard::{BookingStep, BookingSummary, BookingWizard, StepStatus};
