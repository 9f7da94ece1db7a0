/// Field validation for request payloads
///
/// Every mutating route runs its fields through the same contract: a field
/// name, the raw JSON value taken from the body, and an ordered list of
/// [`Rule`]s. Checking stops at the first violation and reports a single
/// [`ValidationError`] whose message is shown to the client verbatim.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tasklink_shared::validation::{check, Rule};
///
/// let body = json!({ "name": "Ana", "email": "not-an-email" });
///
/// let name = check("name", body.get("name"), &[Rule::MinLength(2)]).unwrap();
/// assert_eq!(name, "Ana");
///
/// let err = check("email", body.get("email"), &[Rule::Email, Rule::MinLength(2)]).unwrap_err();
/// assert_eq!(err.field, "email");
/// ```

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// `local-part@domain.tld` with ASCII word characters, dot and hyphen
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.\-]+@([A-Za-z0-9_\-]+\.)+[A-Za-z0-9_\-]{2,4}$")
        .expect("Invalid email regex pattern")
});

const PASSWORD_MIN_CHARS: usize = 8;
const PASSWORD_MAX_CHARS: usize = 12;

const EMAIL_MESSAGE: &str = "'email' deve possuir letras minúsculas, deve ter um @, letras minúsculas, ponto (.) e de 2 a 4 letras minúsculas";
const PASSWORD_TYPE_MESSAGE: &str = "'password' deve ser uma string";
const PASSWORD_MESSAGE: &str = "'password' deve possuir entre 8 e 12 caracteres, com letras maiúsculas e minúsculas e no mínimo um número e um caractere especial";

/// A single failed check
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Name of the offending field
    pub field: &'static str,

    /// Message returned to the client
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn not_a_string(field: &'static str, rules: &[Rule]) -> Self {
        // Password fields have their own wording
        if rules.contains(&Rule::Password) {
            return Self::new(field, PASSWORD_TYPE_MESSAGE);
        }

        Self::new(field, format!("'{}' deve ser string", field))
    }
}

/// Checks applied to a string value, in the order given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// At least this many characters
    MinLength(usize),

    /// Matches the email pattern
    Email,

    /// 8 to 12 characters with lowercase, uppercase, digit and symbol
    ///
    /// Length counts Unicode scalar values (`char`s), not UTF-16 code units:
    /// an emoji or other character outside the Basic Multilingual Plane
    /// counts once, so `"Abcdef1😀"` is 8 characters long.
    Password,
}

impl Rule {
    fn apply(self, field: &'static str, value: &str) -> Result<(), ValidationError> {
        match self {
            Rule::MinLength(min) => {
                if value.chars().count() < min {
                    return Err(ValidationError::new(
                        field,
                        format!("'{}' deve possuir pelo menos {} caracteres", field, min),
                    ));
                }
            }
            Rule::Email => {
                if !EMAIL_PATTERN.is_match(value) {
                    return Err(ValidationError::new(field, EMAIL_MESSAGE));
                }
            }
            Rule::Password => {
                if !is_strong_password(value) {
                    return Err(ValidationError::new(field, PASSWORD_MESSAGE));
                }
            }
        }

        Ok(())
    }
}

fn is_strong_password(value: &str) -> bool {
    let length = value.chars().count();
    if !(PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&length) {
        return false;
    }

    // Line terminators are never part of an accepted password
    if value
        .chars()
        .any(|c| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}'))
    {
        return false;
    }

    value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| !c.is_ascii_alphanumeric())
}

/// Validates a required field
///
/// The value must be present and a JSON string; each rule is then applied in
/// order. Returns the accepted string.
///
/// # Errors
///
/// Returns the first violated check
pub fn check(field: &'static str, value: Option<&Value>, rules: &[Rule]) -> Result<String, ValidationError> {
    let text = match value {
        Some(Value::String(text)) => text,
        _ => return Err(ValidationError::not_a_string(field, rules)),
    };

    for rule in rules {
        rule.apply(field, text)?;
    }

    Ok(text.clone())
}

/// Validates an optional field
///
/// An absent key yields `Ok(None)`. A present key, including JSON `null`,
/// goes through the same checks as [`check`].
pub fn check_optional(
    field: &'static str,
    value: Option<&Value>,
    rules: &[Rule],
) -> Result<Option<String>, ValidationError> {
    match value {
        None => Ok(None),
        Some(_) => check(field, value, rules).map(Some),
    }
}

/// Reads a task status leniently
///
/// Integral JSON numbers and numeric strings are accepted; anything else
/// means "no usable status supplied".
pub fn lenient_status(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_accepts_valid_string() {
        let value = json!("f1");
        assert_eq!(check("id", Some(&value), &[Rule::MinLength(2)]).unwrap(), "f1");
    }

    #[test]
    fn test_check_rejects_missing_and_non_string() {
        let err = check("id", None, &[Rule::MinLength(2)]).unwrap_err();
        assert_eq!(err.message, "'id' deve ser string");

        for value in [json!(12), json!(null), json!(true), json!(["f1"])] {
            let err = check("name", Some(&value), &[]).unwrap_err();
            assert_eq!(err.to_string(), "'name' deve ser string");
        }
    }

    #[test]
    fn test_min_length_counts_characters() {
        let err = check("title", Some(&json!("a")), &[Rule::MinLength(2)]).unwrap_err();
        assert_eq!(err.message, "'title' deve possuir pelo menos 2 caracteres");

        assert!(check("title", Some(&json!("çã")), &[Rule::MinLength(2)]).is_ok());
    }

    #[test]
    fn test_rules_fail_fast_in_order() {
        // A one-character address breaks both rules; the pattern is listed first
        let err = check("email", Some(&json!("a")), &[Rule::Email, Rule::MinLength(2)]).unwrap_err();
        assert_eq!(err.message, EMAIL_MESSAGE);
    }

    #[test]
    fn test_email_pattern() {
        for email in ["a@b.co", "ana.silva@mail.example.com", "x-y_z@dom-ain.info"] {
            assert!(check("email", Some(&json!(email)), &[Rule::Email]).is_ok(), "{email}");
        }

        for email in ["ana", "ana@", "@b.co", "a@b", "a@b.c", "a@b.company", "a b@c.com"] {
            assert!(check("email", Some(&json!(email)), &[Rule::Email]).is_err(), "{email}");
        }
    }

    #[test]
    fn test_password_rule() {
        for password in ["Abcdef1!", "Xy9#Xy9#Xy9#", "aB3$aB3$"] {
            assert!(is_strong_password(password), "{password}");
        }

        for password in [
            "Abcde1!",       // too short
            "Abcdefgh1!xyz", // too long
            "abcdef1!",      // no uppercase
            "ABCDEF1!",      // no lowercase
            "Abcdefg!",      // no digit
            "Abcdefg1",      // no symbol
            "Abcd\nef1!",    // line break
        ] {
            assert!(!is_strong_password(password), "{password:?}");
        }

        let err = check("password", Some(&json!("weak")), &[Rule::Password]).unwrap_err();
        assert_eq!(err.message, PASSWORD_MESSAGE);
    }

    #[test]
    fn test_password_length_counts_chars() {
        // One char each, two UTF-16 code units each
        assert!(is_strong_password("Abcdef1😀"));
        assert!(is_strong_password("Abcdefghij1😀"));
        assert!(!is_strong_password("Abcde1😀"));
    }

    #[test]
    fn test_password_type_message() {
        let err = check("password", Some(&json!(12345678)), &[Rule::Password]).unwrap_err();
        assert_eq!(err.message, "'password' deve ser uma string");

        let err = check("password", None, &[Rule::Password]).unwrap_err();
        assert_eq!(err.message, "'password' deve ser uma string");
    }

    #[test]
    fn test_check_optional() {
        assert_eq!(check_optional("title", None, &[Rule::MinLength(2)]).unwrap(), None);
        assert_eq!(
            check_optional("title", Some(&json!("Report")), &[Rule::MinLength(2)]).unwrap(),
            Some("Report".to_string())
        );
        assert!(check_optional("title", Some(&json!(null)), &[]).is_err());
        assert!(check_optional("title", Some(&json!("x")), &[Rule::MinLength(2)]).is_err());
    }

    #[test]
    fn test_lenient_status() {
        assert_eq!(lenient_status(None), None);
        assert_eq!(lenient_status(Some(&json!(1))), Some(1));
        assert_eq!(lenient_status(Some(&json!(0))), Some(0));
        assert_eq!(lenient_status(Some(&json!("1"))), Some(1));
        assert_eq!(lenient_status(Some(&json!(" 0 "))), Some(0));
        assert_eq!(lenient_status(Some(&json!(1.0))), Some(1));
        assert_eq!(lenient_status(Some(&json!(1.5))), None);
        assert_eq!(lenient_status(Some(&json!("done"))), None);
        assert_eq!(lenient_status(Some(&json!(true))), None);
        assert_eq!(lenient_status(Some(&json!(null))), None);
    }
}
