use crate::booking::context::BookingContext;
use crate::form::controller::FormController;
use crate::form::event::FormEvent;
use crate::form::field::{FieldKind, FormField};
use crate::form::validators::{self, Validator};
use crate::form::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingField {
    FirstName,
    LastName,
    Email,
    Phone,
    PreferredContactMethod,
    IsNewClient,
    AdditionalNotes,
    TermsAccepted,
}

impl FormField for BookingField {
    const ALL: &'static [Self] = &[
        BookingField::FirstName,
        BookingField::LastName,
        BookingField::Email,
        BookingField::Phone,
        BookingField::PreferredContactMethod,
        BookingField::IsNewClient,
        BookingField::AdditionalNotes,
        BookingField::TermsAccepted,
    ];

    fn name(self) -> &'static str {
        match self {
            BookingField::FirstName => "firstName",
            BookingField::LastName => "lastName",
            BookingField::Email => "email",
            BookingField::Phone => "phone",
            BookingField::PreferredContactMethod => "preferredContactMethod",
            BookingField::IsNewClient => "isNewClient",
            BookingField::AdditionalNotes => "additionalNotes",
            BookingField::TermsAccepted => "termsAccepted",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            BookingField::IsNewClient | BookingField::TermsAccepted => FieldKind::Checkbox,
            _ => FieldKind::Text,
        }
    }

    fn default_value(self) -> FieldValue {
        match self {
            BookingField::PreferredContactMethod => {
                FieldValue::Text(ContactMethod::Email.as_str().to_string())
            }
            BookingField::IsNewClient => FieldValue::Bool(true),
            BookingField::TermsAccepted => FieldValue::Bool(false),
            _ => FieldValue::Text(String::new()),
        }
    }

    fn validators(self) -> Vec<Validator> {
        match self {
            BookingField::FirstName => vec![
                validators::required("First name is required"),
                validators::min_length(2, "First name must be at least 2 characters"),
            ],
            BookingField::LastName => vec![
                validators::required("Last name is required"),
                validators::min_length(2, "Last name must be at least 2 characters"),
            ],
            BookingField::Email => vec![
                validators::required("Email is required"),
                validators::email("Please enter a valid email address"),
            ],
            BookingField::Phone => vec![
                validators::required("Phone number is required"),
                validators::digits(10, "Phone number must be exactly 10 digits"),
            ],
            BookingField::PreferredContactMethod => vec![validators::one_of(
                ContactMethod::NAMES,
                "Please select a preferred contact method",
            )],
            BookingField::IsNewClient | BookingField::AdditionalNotes => Vec::new(),
            BookingField::TermsAccepted => vec![validators::checked(
                "You must accept the terms and conditions",
            )],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Email,
    Phone,
    Text,
}

impl ContactMethod {
    pub const NAMES: &'static [&'static str] = &["email", "phone", "text"];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactMethod::Email => "email",
            ContactMethod::Phone => "phone",
            ContactMethod::Text => "text",
        }
    }
}

impl FromStr for ContactMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(ContactMethod::Email),
            "phone" => Ok(ContactMethod::Phone),
            "text" => Ok(ContactMethod::Text),
            other => Err(format!("unknown contact method '{other}'")),
        }
    }
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The validated snapshot handed to the booking context. Terms acceptance is
/// not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_contact_method: ContactMethod,
    pub is_new_client: bool,
    pub additional_notes: Option<String>,
}

impl CustomerInfo {
    fn field_values(&self) -> Vec<(BookingField, FieldValue)> {
        vec![
            (BookingField::FirstName, self.first_name.clone().into()),
            (BookingField::LastName, self.last_name.clone().into()),
            (BookingField::Email, self.email.clone().into()),
            (BookingField::Phone, self.phone.clone().into()),
            (
                BookingField::PreferredContactMethod,
                self.preferred_contact_method.as_str().into(),
            ),
            (BookingField::IsNewClient, self.is_new_client.into()),
            (
                BookingField::AdditionalNotes,
                self.additional_notes.clone().unwrap_or_default().into(),
            ),
        ]
    }
}

/// Customer details step of the booking wizard.
pub struct BookingFormController {
    form: FormController<BookingField>,
}

impl Default for BookingFormController {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingFormController {
    pub fn new() -> Self {
        Self {
            form: FormController::new(),
        }
    }

    /// Restores whatever the context saved on an earlier visit to this step.
    pub fn from_context(context: &impl BookingContext) -> Self {
        match context.customer_info() {
            Some(info) => Self {
                form: FormController::with_values(info.field_values()),
            },
            None => Self::new(),
        }
    }

    pub fn form(&self) -> &FormController<BookingField> {
        &self.form
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FormEvent<BookingField>) + 'static) {
        self.form.subscribe(listener);
    }

    pub fn handle_change(&mut self, field: BookingField, value: impl Into<FieldValue>) {
        self.form.handle_change(field, value);
    }

    pub fn handle_blur(&mut self, field: BookingField) {
        self.form.handle_blur(field);
    }

    pub fn validate_field(&mut self, field: BookingField) -> bool {
        self.form.validate_field(field)
    }

    pub fn validate_form(&mut self) -> bool {
        self.form.validate_form()
    }

    pub fn error(&self, field: BookingField) -> Option<&str> {
        self.form.error(field)
    }

    pub fn is_touched(&self, field: BookingField) -> bool {
        self.form.is_touched(field)
    }

    /// Current values as a `CustomerInfo`, or `None` while the contact
    /// method is not one of the allowed choices.
    pub fn snapshot(&self) -> Option<CustomerInfo> {
        let method = self
            .form
            .text(BookingField::PreferredContactMethod)
            .parse()
            .ok()?;
        let notes = self.form.text(BookingField::AdditionalNotes);

        Some(CustomerInfo {
            first_name: self.form.text(BookingField::FirstName).trim().to_string(),
            last_name: self.form.text(BookingField::LastName).trim().to_string(),
            email: self.form.text(BookingField::Email).trim().to_string(),
            phone: self.form.text(BookingField::Phone),
            preferred_contact_method: method,
            is_new_client: self.form.checked(BookingField::IsNewClient),
            additional_notes: (!notes.trim().is_empty()).then_some(notes),
        })
    }

    /// Validates everything; on success hands the snapshot to `context` and
    /// asks it to move one step forward. On failure nothing leaves the form.
    pub fn submit(&mut self, context: &mut impl BookingContext) -> bool {
        if !self.form.validate_form() {
            let error_count = self.form.errors().len();
            info!(error_count, "Booking details rejected");
            self.form.emit(FormEvent::SubmitRejected { error_count });
            return false;
        }

        let Some(info) = self.snapshot() else {
            return false;
        };

        let from = context.current_step();
        context.set_customer_info(info);
        context.set_current_step(from + 1);
        info!(from, to = from + 1, "Booking details submitted");
        self.form.emit(FormEvent::Submitted);
        self.form.emit(FormEvent::StepRequested { from, to: from + 1 });
        true
    }

    pub fn go_back(&mut self, context: &mut impl BookingContext) {
        let from = context.current_step();
        let to = from.saturating_sub(1);
        context.set_current_step(to);
        info!(from, to, "Booking details left without saving");
        self.form.emit(FormEvent::StepRequested { from, to });
    }
}
