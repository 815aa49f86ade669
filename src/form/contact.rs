use crate::form::controller::FormController;
use crate::form::event::FormEvent;
use crate::form::field::FormField;
use crate::form::validators::{self, Validator};
use crate::form::value::FieldValue;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Subject,
    Message,
}

impl FormField for ContactField {
    const ALL: &'static [Self] = &[
        ContactField::Name,
        ContactField::Email,
        ContactField::Phone,
        ContactField::Subject,
        ContactField::Message,
    ];

    fn name(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
        }
    }

    fn validators(self) -> Vec<Validator> {
        match self {
            ContactField::Name => vec![
                validators::required("Name is required"),
                validators::min_length(2, "Name must be at least 2 characters"),
            ],
            ContactField::Email => vec![
                validators::required("Email is required"),
                validators::email("Please enter a valid email address"),
            ],
            ContactField::Phone => vec![validators::optional(validators::digits(
                10,
                "Phone number must be exactly 10 digits",
            ))],
            ContactField::Subject => vec![validators::required("Please choose a subject")],
            ContactField::Message => vec![
                validators::required("Message is required"),
                validators::min_length(10, "Message must be at least 10 characters"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

/// Receives contact messages that passed validation.
pub trait ContactSink {
    fn send(&mut self, message: ContactMessage);
}

impl<F> ContactSink for F
where
    F: FnMut(ContactMessage),
{
    fn send(&mut self, message: ContactMessage) {
        self(message)
    }
}

#[derive(Default)]
pub struct ContactFormController {
    form: FormController<ContactField>,
}

impl ContactFormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormController<ContactField> {
        &self.form
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FormEvent<ContactField>) + 'static) {
        self.form.subscribe(listener);
    }

    pub fn handle_change(&mut self, field: ContactField, value: impl Into<FieldValue>) {
        self.form.handle_change(field, value);
    }

    pub fn handle_blur(&mut self, field: ContactField) {
        self.form.handle_blur(field);
    }

    pub fn validate_field(&mut self, field: ContactField) -> bool {
        self.form.validate_field(field)
    }

    pub fn validate_form(&mut self) -> bool {
        self.form.validate_form()
    }

    pub fn error(&self, field: ContactField) -> Option<&str> {
        self.form.error(field)
    }

    pub fn snapshot(&self) -> ContactMessage {
        let phone = self.form.text(ContactField::Phone).trim().to_string();
        ContactMessage {
            name: self.form.text(ContactField::Name).trim().to_string(),
            email: self.form.text(ContactField::Email).trim().to_string(),
            phone: (!phone.is_empty()).then_some(phone),
            subject: self.form.text(ContactField::Subject).trim().to_string(),
            message: self.form.text(ContactField::Message).trim().to_string(),
        }
    }

    /// Sends the message once and clears the form; leaves everything in
    /// place when validation fails.
    pub fn submit(&mut self, sink: &mut impl ContactSink) -> bool {
        if !self.form.validate_form() {
            let error_count = self.form.errors().len();
            info!(error_count, "Contact message rejected");
            self.form.emit(FormEvent::SubmitRejected { error_count });
            return false;
        }

        let message = self.snapshot();
        info!(subject = %message.subject, "Contact message sent");
        sink.send(message);
        self.form.emit(FormEvent::Submitted);
        self.form.reset();
        true
    }
}
