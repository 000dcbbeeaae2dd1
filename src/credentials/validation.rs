use secrecy::ExposeSecret;
use thiserror::Error;

use crate::credentials::models::{CredentialRecord, Field};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required field(s) missing: {}", field_list(.0))]
    MissingField(Vec<Field>),
}

fn field_list(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Website, email and password must be non-empty. Username is never checked;
/// a blank one is already normalized to the placeholder.
pub fn validate(record: &CredentialRecord) -> Result<(), ValidationError> {
    let mut missing = Vec::new();
    if record.website.is_empty() {
        missing.push(Field::Website);
    }
    if record.email.is_empty() {
        missing.push(Field::Email);
    }
    if record.password.expose_secret().is_empty() {
        missing.push(Field::Password);
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingField(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_record_passes() {
        let rec = CredentialRecord::new("x.com", "a@b.com", "", "P1");
        assert!(validate(&rec).is_ok());
    }

    #[test]
    fn reports_every_missing_field() {
        let rec = CredentialRecord::new("", "", "user", "");
        let err = validate(&rec).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField(vec![Field::Website, Field::Email, Field::Password])
        );
        assert_eq!(
            err.to_string(),
            "required field(s) missing: Website, Email, Password"
        );
    }

    #[test]
    fn missing_password_only() {
        let rec = CredentialRecord::new("x.com", "a@b.com", "u", "");
        assert_eq!(
            validate(&rec),
            Err(ValidationError::MissingField(vec![Field::Password]))
        );
    }
}
