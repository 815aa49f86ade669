use regex::Regex;
use std::sync::LazyLock;

pub type Validator = Box<dyn Fn(&str) -> Result<(), String> + Send>;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex")
});

/// Run a list of validators against `value`, returning the first error.
pub fn run_validators(validators: &[Validator], value: &str) -> Result<(), String> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.trim().is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn min_length(min: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.trim().chars().count() < min {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn email(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if EMAIL_RE.is_match(value.trim()) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

/// Exactly `count` ASCII digits, no separators.
pub fn digits(count: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.len() == count && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

pub fn one_of(options: &'static [&'static str], message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if options.iter().any(|option| *option == value) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

pub fn checked(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value == "true" {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

/// Skips `inner` for blank values.
pub fn optional(inner: Validator) -> Validator {
    Box::new(move |value: &str| {
        if value.trim().is_empty() {
            Ok(())
        } else {
            inner(value)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_syntax() {
        let v = email("bad");
        assert!(v("a@b.com").is_ok());
        assert!(v("jane@doe.com").is_ok());
        assert_eq!(v("not-an-email"), Err("bad".to_string()));
        assert!(v("a@b").is_err());
        assert!(v("").is_err());
    }

    #[test]
    fn phone_needs_exactly_ten_digits() {
        let v = digits(10, "bad");
        assert!(v("5551234567").is_ok());
        assert!(v("555-123-4567").is_err());
        assert!(v("123").is_err());
        assert!(v("55512345678").is_err());
        assert!(v("555123456a").is_err());
    }

    #[test]
    fn first_failure_wins() {
        let validators = vec![required("required"), min_length(2, "short")];
        assert_eq!(run_validators(&validators, " "), Err("required".to_string()));
        assert_eq!(run_validators(&validators, "J"), Err("short".to_string()));
        assert!(run_validators(&validators, "Jo").is_ok());
    }

    #[test]
    fn optional_skips_blank() {
        let v = optional(digits(10, "bad"));
        assert!(v("").is_ok());
        assert!(v("123").is_err());
    }
}
