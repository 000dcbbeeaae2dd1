use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Stored in place of a blank username.
pub const USERNAME_PLACEHOLDER: &str = "-";

/// One website's credential, ready to be validated and stored.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub website: String,
    pub email: String,
    pub username: String,
    pub password: SecretString,
}

impl CredentialRecord {
    pub fn new(website: &str, email: &str, username: &str, password: &str) -> Self {
        Self {
            website: website.to_string(),
            email: email.to_string(),
            username: normalize_username(username),
            password: SecretString::new(password.into()),
        }
    }

    pub fn from_stored(website: &str, stored: StoredCredential) -> Self {
        Self {
            website: website.to_string(),
            email: stored.email,
            username: stored.username,
            password: stored.password,
        }
    }

    pub fn to_stored(&self) -> StoredCredential {
        StoredCredential {
            email: self.email.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// The four fields in storage order (website, email, username, password).
    pub fn fields(&self) -> [&str; 4] {
        [
            &self.website,
            &self.email,
            &self.username,
            self.password.expose_secret(),
        ]
    }
}

/// The value side of the document store: everything but the website key.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoredCredential {
    pub email: String,
    pub username: String,
    #[serde(with = "crate::credentials::secret_serde")]
    pub password: SecretString,
}

pub fn normalize_username(username: &str) -> String {
    if username.is_empty() {
        USERNAME_PLACEHOLDER.to_string()
    } else {
        username.to_string()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Website,
    Email,
    Username,
    Password,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Website => "Website",
            Field::Email => "Email",
            Field::Username => "Username",
            Field::Password => "Password",
        }
    }
}

/// Text fields owned by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub website: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

impl FormState {
    /// Form prefilled with the configured email/username defaults.
    pub fn with_defaults(email: Option<&str>, username: Option<&str>) -> Self {
        Self {
            email: email.unwrap_or_default().to_string(),
            username: username.unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    pub fn to_record(&self) -> CredentialRecord {
        CredentialRecord::new(&self.website, &self.email, &self.username, &self.password)
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Website => &self.website,
            Field::Email => &self.email,
            Field::Username => &self.username,
            Field::Password => &self.password,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Website => &mut self.website,
            Field::Email => &mut self.email,
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        }
    }

    /// Fill email/username/password from a looked-up record, keeping the website typed.
    pub fn fill_from(&mut self, record: &CredentialRecord) {
        self.email = record.email.clone();
        self.username = record.username.clone();
        self.password = record.password.expose_secret().to_string();
    }

    /// Clears the transient fields after a save; email and username stay.
    pub fn reset(&mut self) {
        self.website.clear();
        self.password.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_username_becomes_placeholder() {
        let form = FormState {
            website: "x.com".into(),
            email: "a@b.com".into(),
            username: String::new(),
            password: "P1".into(),
        };
        let rec = form.to_record();
        assert_eq!(rec.username, "-");
        assert_eq!(rec.fields(), ["x.com", "a@b.com", "-", "P1"]);
    }

    #[test]
    fn reset_keeps_email_and_username() {
        let mut form = FormState::with_defaults(Some("me@mail.com"), Some("me"));
        form.website = "site.org".into();
        form.password = "secret".into();
        form.reset();
        assert_eq!(form.website, "");
        assert_eq!(form.password, "");
        assert_eq!(form.email, "me@mail.com");
        assert_eq!(form.username, "me");
    }

    #[test]
    fn debug_does_not_leak_password() {
        let rec = CredentialRecord::new("x.com", "a@b.com", "u", "hunter2");
        let dbg = format!("{rec:?}");
        assert!(!dbg.contains("hunter2"));
    }
}
