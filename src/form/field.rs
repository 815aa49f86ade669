use crate::form::validators::Validator;
use crate::form::value::FieldValue;
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Checkbox,
}

/// A fixed form field set. Each field carries its own validator list, so a
/// single-field check never has to slice a whole-form schema.
pub trait FormField: Copy + Eq + Hash + Debug + 'static {
    /// Declaration order; also the order errors are reported in.
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    fn kind(self) -> FieldKind {
        FieldKind::Text
    }

    fn default_value(self) -> FieldValue {
        match self.kind() {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Checkbox => FieldValue::Bool(false),
        }
    }

    fn validators(self) -> Vec<Validator>;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }
}
