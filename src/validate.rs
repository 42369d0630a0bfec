//! Pre-submission checks for the add/edit form.
//!
//! Checks run in a fixed order and stop at the first failure; a failed check
//! means the form never reaches the gateway.
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::model::{Field, UserFields};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in the {} field.", .0.humanized())]
    Missing(Field),
    #[error("Please enter a valid CNIC (e.g., 12345-1234567-1).")]
    InvalidCnic,
    #[error("Please enter a valid phone number (e.g., 0300-1234567).")]
    InvalidPhone,
}

/// CNIC in `NNNNN-NNNNNNN-N` form, ASCII digits only.
pub fn is_valid_cnic(cnic: &str) -> bool {
    lazy_static! {
        static ref CNIC_RE: Regex = Regex::new(r"^[0-9]{5}-[0-9]{7}-[0-9]$").unwrap();
    }
    CNIC_RE.is_match(cnic)
}

pub fn is_valid_phone(phone: &str) -> bool {
    lazy_static! {
        static ref PHONE_RE: Regex = Regex::new(r"^03[0-9]{2}-[0-9]{7}$").unwrap();
    }
    PHONE_RE.is_match(phone)
}

/// Validate a field set. Emptiness is checked on the trimmed value, but the
/// patterns are matched against the value as typed.
pub fn validate(fields: &UserFields) -> Result<(), ValidationError> {
    if let Some(missing) = Field::ALL
        .into_iter()
        .find(|f| fields.get(*f).trim().is_empty())
    {
        return Err(ValidationError::Missing(missing));
    }
    if !is_valid_cnic(&fields.cnic) {
        return Err(ValidationError::InvalidCnic);
    }
    if !is_valid_phone(&fields.phone) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> UserFields {
        UserFields {
            name: "John Doe".into(),
            father_name: "Richard Doe".into(),
            cnic: "35202-1234567-1".into(),
            phone: "0300-1234567".into(),
            address: "X".into(),
            degree: "BSCS".into(),
            semester: "5".into(),
            university: "NU".into(),
        }
    }

    #[test]
    fn accepts_complete_record() {
        assert_eq!(validate(&john()), Ok(()));
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut f = john();
        f.father_name = "   ".into();
        let err = validate(&f).unwrap_err();
        assert_eq!(err, ValidationError::Missing(Field::FatherName));
        assert_eq!(err.to_string(), "Please fill in the father name field.");
    }

    #[test]
    fn first_missing_field_is_reported() {
        let f = UserFields::default();
        assert_eq!(validate(&f), Err(ValidationError::Missing(Field::Name)));
    }

    #[test]
    fn cnic_is_checked_before_phone() {
        let mut f = john();
        f.cnic = "3520212345671".into();
        f.phone = "12345".into();
        assert_eq!(validate(&f), Err(ValidationError::InvalidCnic));
    }

    #[test]
    fn phone_pattern() {
        assert!(is_valid_phone("0312-7654321"));
        assert!(!is_valid_phone("0412-7654321"));
        assert!(!is_valid_phone("0300-123456"));
        assert!(!is_valid_phone(" 0300-1234567"));
    }

    #[test]
    fn cnic_pattern() {
        assert!(is_valid_cnic("12345-1234567-1"));
        assert!(!is_valid_cnic("12345-1234567-12"));
        assert!(!is_valid_cnic("1234a-1234567-1"));
    }

    #[test]
    fn non_ascii_digits_are_rejected() {
        assert!(!is_valid_cnic("٣٥٢٠٢-١٢٣٤٥٦٧-١"));
        assert!(!is_valid_phone("03٠٠-١٢٣٤٥٦٧"));
        assert!(!is_valid_phone("०३००-१२३४५६७"));

        let mut f = john();
        f.cnic = "٣٥٢٠٢-١٢٣٤٥٦٧-١".into();
        assert_eq!(validate(&f), Err(ValidationError::InvalidCnic));
        let mut f = john();
        f.phone = "03٠٠-١٢٣٤٥٦٧".into();
        assert_eq!(validate(&f), Err(ValidationError::InvalidPhone));
    }
}
