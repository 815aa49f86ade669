use crate::form::event::{FormEvent, Listener};
use crate::form::field::{FieldKind, FormField};
use crate::form::state::FormState;
use crate::form::validators::run_validators;
use crate::form::value::FieldValue;
use tracing::debug;

/// Owns a form's state and notifies listeners after every mutation.
///
/// Editing a field clears its error without revalidating; errors come back
/// only on blur or whole-form validation.
pub struct FormController<F: FormField> {
    state: FormState<F>,
    listeners: Vec<Listener<F>>,
}

impl<F: FormField> Default for FormController<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FormField> FormController<F> {
    pub fn new() -> Self {
        Self {
            state: FormState::default(),
            listeners: Vec::new(),
        }
    }

    /// Seeds values without touching or validating them.
    pub fn with_values(values: impl IntoIterator<Item = (F, FieldValue)>) -> Self {
        let mut controller = Self::new();
        for (field, value) in values {
            controller.state.set_value(field, normalize(field, value));
        }
        controller
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FormEvent<F>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn state(&self) -> &FormState<F> {
        &self.state
    }

    pub fn value(&self, field: F) -> FieldValue {
        self.state.value(field)
    }

    pub fn text(&self, field: F) -> String {
        self.state.value(field).to_text()
    }

    pub fn checked(&self, field: F) -> bool {
        self.state.value(field).checked()
    }

    pub fn error(&self, field: F) -> Option<&str> {
        self.state.error(field)
    }

    pub fn errors(&self) -> Vec<(F, String)> {
        self.state
            .errors()
            .map(|(field, err)| (field, err.to_string()))
            .collect()
    }

    pub fn is_touched(&self, field: F) -> bool {
        self.state.is_touched(field)
    }

    pub fn handle_change(&mut self, field: F, value: impl Into<FieldValue>) {
        let value = normalize(field, value.into());
        self.state.set_value(field, value.clone());
        debug!(field = field.name(), "Field changed");
        self.emit(FormEvent::FieldChanged { field, value });

        self.mark_touched(field);

        if self.state.clear_error(field) {
            self.emit(FormEvent::ErrorCleared { field });
        }
    }

    pub fn handle_blur(&mut self, field: F) {
        self.mark_touched(field);
        self.validate_field(field);
    }

    pub fn validate_field(&mut self, field: F) -> bool {
        match self.check(field) {
            Ok(()) => {
                if self.state.clear_error(field) {
                    self.emit(FormEvent::ErrorCleared { field });
                }
                true
            }
            Err(message) => {
                self.show_error(field, message);
                false
            }
        }
    }

    /// Checks every field; each failing field gets its message and is marked
    /// touched so it renders even if the user never visited it.
    pub fn validate_form(&mut self) -> bool {
        let mut valid = true;
        for &field in F::ALL {
            match self.check(field) {
                Ok(()) => {
                    if self.state.clear_error(field) {
                        self.emit(FormEvent::ErrorCleared { field });
                    }
                }
                Err(message) => {
                    valid = false;
                    self.show_error(field, message);
                    self.mark_touched(field);
                }
            }
        }

        debug!(valid, errors = self.state.errors().count(), "Form validated");
        self.emit(FormEvent::Validated { valid });
        valid
    }

    pub fn reset(&mut self) {
        self.state = FormState::default();
        self.emit(FormEvent::Reset);
    }

    pub(crate) fn emit(&mut self, event: FormEvent<F>) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    fn check(&self, field: F) -> Result<(), String> {
        let value = self.state.value(field).to_text();
        run_validators(&field.validators(), &value)
    }

    fn show_error(&mut self, field: F, message: String) {
        if self.state.error(field) == Some(message.as_str()) {
            return;
        }
        self.state.set_error(field, message.clone());
        self.emit(FormEvent::ErrorShown { field, message });
    }

    fn mark_touched(&mut self, field: F) {
        if self.state.touch(field) {
            self.emit(FormEvent::FieldTouched { field });
        }
    }
}

fn normalize<F: FormField>(field: F, value: FieldValue) -> FieldValue {
    match field.kind() {
        FieldKind::Checkbox => FieldValue::Bool(value.checked()),
        FieldKind::Text => match value {
            FieldValue::Bool(flag) => FieldValue::Text(flag.to_string()),
            text => text,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::FormController;
    use crate::form::event::FormEvent;
    use crate::form::field::{FieldKind, FormField};
    use crate::form::validators::{self, Validator};
    use crate::form::value::FieldValue;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum SurveyField {
        Title,
        Agree,
    }

    impl FormField for SurveyField {
        const ALL: &'static [Self] = &[SurveyField::Title, SurveyField::Agree];

        fn name(self) -> &'static str {
            match self {
                SurveyField::Title => "title",
                SurveyField::Agree => "agree",
            }
        }

        fn kind(self) -> FieldKind {
            match self {
                SurveyField::Title => FieldKind::Text,
                SurveyField::Agree => FieldKind::Checkbox,
            }
        }

        fn validators(self) -> Vec<Validator> {
            match self {
                SurveyField::Title => vec![validators::required("Title is required")],
                SurveyField::Agree => vec![validators::checked("Please agree")],
            }
        }
    }

    fn recorded(
        controller: &mut FormController<SurveyField>,
    ) -> Rc<RefCell<Vec<FormEvent<SurveyField>>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        controller.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        events
    }

    #[test]
    fn listeners_see_each_mutation_in_order() {
        let mut form = FormController::<SurveyField>::new();
        let events = recorded(&mut form);

        form.handle_blur(SurveyField::Title);
        form.handle_change(SurveyField::Title, "Hello");

        assert_eq!(
            *events.borrow(),
            vec![
                FormEvent::FieldTouched { field: SurveyField::Title },
                FormEvent::ErrorShown {
                    field: SurveyField::Title,
                    message: "Title is required".to_string(),
                },
                FormEvent::FieldChanged {
                    field: SurveyField::Title,
                    value: FieldValue::Text("Hello".to_string()),
                },
                FormEvent::ErrorCleared { field: SurveyField::Title },
            ]
        );
    }

    #[test]
    fn checkbox_change_stores_checked_flag() {
        let mut form = FormController::<SurveyField>::new();
        form.handle_change(SurveyField::Agree, "on");
        assert_eq!(form.value(SurveyField::Agree), FieldValue::Bool(true));
        assert!(form.validate_field(SurveyField::Agree));
    }

    #[test]
    fn change_never_revalidates() {
        let mut form = FormController::<SurveyField>::new();
        form.handle_change(SurveyField::Title, "");
        assert!(form.is_touched(SurveyField::Title));
        assert_eq!(form.error(SurveyField::Title), None);
    }

    #[test]
    fn field_from_name() {
        assert_eq!(SurveyField::from_name("agree"), Some(SurveyField::Agree));
        assert_eq!(SurveyField::from_name("nope"), None);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut form = FormController::<SurveyField>::new();
        form.handle_change(SurveyField::Title, "Hello");
        form.validate_form();
        form.reset();
        assert_eq!(form.text(SurveyField::Title), "");
        assert!(!form.is_touched(SurveyField::Title));
        assert!(form.errors().is_empty());
    }
}
