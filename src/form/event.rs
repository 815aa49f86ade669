use crate::form::value::FieldValue;

/// Emitted to listeners after every state mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent<F> {
    FieldChanged { field: F, value: FieldValue },
    FieldTouched { field: F },
    ErrorShown { field: F, message: String },
    ErrorCleared { field: F },
    Validated { valid: bool },
    Submitted,
    SubmitRejected { error_count: usize },
    StepRequested { from: usize, to: usize },
    Reset,
}

pub type Listener<F> = Box<dyn FnMut(&FormEvent<F>)>;
