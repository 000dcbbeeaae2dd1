use secrecy::ExposeSecret;

use crate::credentials::models::CredentialRecord;
use crate::credentials::validation::ValidationError;

/// What the presentation layer has to tell the user. The variant is what
/// matters; `title`/`message` are only the default wording.
#[derive(Debug, Clone)]
pub enum Notice {
    MissingFields(ValidationError),
    ConfirmSave(CredentialRecord),
    Saved,
    Found(CredentialRecord),
    StoreAbsent,
    NotFound(String),
}

impl Notice {
    pub fn title(&self) -> String {
        match self {
            Notice::MissingFields(_) => "'Website', 'Email' and 'Password' are required".to_string(),
            Notice::ConfirmSave(rec) | Notice::Found(rec) => rec.website.clone(),
            Notice::Saved => "Done".to_string(),
            Notice::StoreAbsent => "Error".to_string(),
            Notice::NotFound(website) => website.clone(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notice::MissingFields(err) => {
                format!("Please make sure you've filled all necessary fields ({err})")
            }
            Notice::ConfirmSave(rec) => format!(
                "EMAIL:\n{}\n\nUSERNAME:\n{}\n\nPASSWORD:\n{}\n\nProceed with data?",
                rec.email,
                rec.username,
                rec.password.expose_secret()
            ),
            Notice::Saved => "Your password has been saved on file".to_string(),
            Notice::Found(rec) => format!(
                "EMAIL: {}\nUSERNAME: {}\nPASSWORD: copied to clipboard",
                rec.email, rec.username
            ),
            Notice::StoreAbsent => "No passwords have been saved yet".to_string(),
            Notice::NotFound(website) => format!("No passwords saved under '{website}'"),
        }
    }
}
