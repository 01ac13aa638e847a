//! Input masking and validation for Brazilian phone numbers and postal codes.
//!
//! Everything here is pure: output depends only on the argument, so callers
//! can re-run these on every keystroke.

use std::fmt;

/// Digits in a Brazilian mobile number (DDD + 9-prefix + 8 digits).
const PHONE_DIGITS: usize = 11;

/// Digits in a CEP.
const CEP_DIGITS: usize = 8;

/// Removes every non-digit character from `raw`.
pub fn strip_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Formats raw input as a Brazilian mobile number, `(DD) D DDDD-DDDD`.
///
/// Non-digits are stripped and the result is capped at 11 digits. Partial
/// input yields the partially revealed pattern; the shape is a function of
/// the digit count alone:
///
/// - 0 digits: empty string
/// - 1-2: the digits unchanged
/// - 3-5: `(DD) ` plus the rest
/// - 6-9: `(DD) D ` plus the rest (splits the mobile 9-prefix)
/// - 10-11: `(DD) D DDDD-` plus the rest
pub fn format_phone(raw: &str) -> String {
    let mut digits = strip_digits(raw);
    digits.truncate(PHONE_DIGITS);

    match digits.len() {
        0..=2 => digits,
        3..=5 => format!("({}) {}", &digits[..2], &digits[2..]),
        6..=9 => format!("({}) {} {}", &digits[..2], &digits[2..3], &digits[3..]),
        _ => format!(
            "({}) {} {}-{}",
            &digits[..2],
            &digits[2..3],
            &digits[3..7],
            &digits[7..]
        ),
    }
}

/// Normalizes a (possibly masked) phone value to its 11 raw digits.
///
/// The backend stores bare digits, so masked values coming back from
/// [`format_phone`] are accepted as-is.
///
/// # Errors
/// Returns [`ValidationError::InvalidPhone`] unless exactly 11 digits remain.
pub fn phone_digits(raw: &str) -> Result<String, ValidationError> {
    let digits = strip_digits(raw);
    if digits.len() != PHONE_DIGITS {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(digits)
}

/// A validated Brazilian postal code: exactly 8 digits, no separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalCode(String);

impl PostalCode {
    /// Parses raw user input into a normalized CEP.
    ///
    /// Strips every non-digit first, so `"01310-100"` and `"01310100"` are
    /// equivalent.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidCep`] unless exactly 8 digits remain.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let digits = strip_digits(raw);
        if digits.len() != CEP_DIGITS {
            return Err(ValidationError::InvalidCep);
        }
        Ok(Self(digits))
    }

    /// The normalized 8-digit form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Local input validation failures.
///
/// Display text is the exact message shown to the user, in Portuguese like
/// the rest of the product surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// CEP is not exactly 8 digits.
    InvalidCep,
    /// Phone is not exactly 11 digits.
    InvalidPhone,
    /// Password and confirmation differ.
    PasswordMismatch,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidCep => write!(f, "CEP deve conter 8 dígitos"),
            ValidationError::InvalidPhone => {
                write!(f, "O número precisa possuir 11 dígitos: DDD + 9 + número")
            }
            ValidationError::PasswordMismatch => write!(f, "As senhas não coincidem."),
        }
    }
}

impl std::error::Error for ValidationError {}
