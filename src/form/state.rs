use crate::form::field::FormField;
use crate::form::value::FieldValue;
use indexmap::IndexMap;

/// Field values plus per-field error and touched flags.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<F: FormField> {
    values: IndexMap<F, FieldValue>,
    errors: IndexMap<F, String>,
    touched: IndexMap<F, bool>,
}

impl<F: FormField> Default for FormState<F> {
    fn default() -> Self {
        Self {
            values: F::ALL
                .iter()
                .map(|field| (*field, field.default_value()))
                .collect(),
            errors: IndexMap::new(),
            touched: F::ALL.iter().map(|field| (*field, false)).collect(),
        }
    }
}

impl<F: FormField> FormState<F> {
    pub fn value(&self, field: F) -> FieldValue {
        self.values
            .get(&field)
            .cloned()
            .unwrap_or_else(|| field.default_value())
    }

    pub fn set_value(&mut self, field: F, value: FieldValue) {
        self.values.insert(field, value);
    }

    pub fn error(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn set_error(&mut self, field: F, error: impl Into<String>) {
        self.errors.insert(field, error.into());
        self.sort_errors();
    }

    /// Returns whether an error was present.
    pub fn clear_error(&mut self, field: F) -> bool {
        self.errors.shift_remove(&field).is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = (F, &str)> {
        self.errors.iter().map(|(field, err)| (*field, err.as_str()))
    }

    pub fn is_touched(&self, field: F) -> bool {
        self.touched.get(&field).copied().unwrap_or(false)
    }

    /// Returns whether the field was untouched before.
    pub fn touch(&mut self, field: F) -> bool {
        !self.touched.insert(field, true).unwrap_or(false)
    }

    fn sort_errors(&mut self) {
        let rank = |field: &F| F::ALL.iter().position(|f| f == field);
        self.errors.sort_by(|a, _, b, _| rank(a).cmp(&rank(b)));
    }
}
