pub mod booking;
pub mod contact;
pub mod controller;
pub mod event;
pub mod field;
pub mod state;
pub mod validators;
pub mod value;

pub use booking::{BookingField, BookingFormController, ContactMethod, CustomerInfo};
pub use contact::{ContactField, ContactFormController, ContactMessage, ContactSink};
pub use controller::FormController;
pub use event::FormEvent;
pub use field::{FieldKind, FormField};
pub use value::FieldValue;
