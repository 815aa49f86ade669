#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

impl FieldValue {
    /// Checked flag of a checkbox. Raw strings coming from form posts
    /// (`"on"`, `"true"`, `"1"`, `"yes"`) count as checked.
    pub fn checked(&self) -> bool {
        match self {
            Self::Bool(v) => *v,
            Self::Text(v) => matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "true" | "on" | "1" | "yes"
            ),
        }
    }

    /// Text as validators see it; checkboxes render as `"true"`/`"false"`.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(v) => v.clone(),
            Self::Bool(v) => v.to_string(),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::FieldValue;

    #[test]
    fn checkbox_reads_checked_flag_from_raw_text() {
        assert!(FieldValue::from("on").checked());
        assert!(FieldValue::from(" TRUE ").checked());
        assert!(!FieldValue::from("off").checked());
        assert!(!FieldValue::from("").checked());
        assert!(FieldValue::from(true).checked());
    }
}
