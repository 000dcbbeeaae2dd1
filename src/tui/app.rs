use secrecy::ExposeSecret;

use crate::credentials::models::{CredentialRecord, Field, FormState};
use crate::credentials::notice::Notice;
use crate::store::Lookup;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum View {
    Form,
    ConfirmSave,
}

pub struct App {
    pub form: FormState,
    pub focus: Field,
    pub view: View,
    pub reveal_password: bool,
    pending: Option<CredentialRecord>,
    toast: Option<String>,
    toast_ticks: u16,
}

impl App {
    pub fn new(form: FormState) -> Self {
        Self {
            form,
            focus: Field::Website,
            view: View::Form,
            reveal_password: false,
            pending: None,
            toast: None,
            toast_ticks: 0,
        }
    }

    pub fn toast(&mut self, msg: String) {
        self.toast = Some(msg);
        self.toast_ticks = 15; // ~3s at 200ms tick
    }

    pub fn toast_message(&self) -> Option<&str> {
        self.toast.as_deref()
    }

    pub fn tick(&mut self) {
        if self.toast_ticks > 0 {
            self.toast_ticks -= 1;
            if self.toast_ticks == 0 {
                self.toast = None;
            }
        }
    }

    pub fn notify(&mut self, notice: &Notice) {
        let text = match notice {
            Notice::MissingFields(err) => err.to_string(),
            Notice::Found(rec) => format!("Found {}: password copied", rec.website),
            other => other.message(),
        };
        self.toast(text);
    }

    // Form editing
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            Field::Website => Field::Email,
            Field::Email => Field::Username,
            Field::Username => Field::Password,
            Field::Password => Field::Website,
        };
    }

    pub fn prev_field(&mut self) {
        self.focus = match self.focus {
            Field::Website => Field::Password,
            Field::Email => Field::Website,
            Field::Username => Field::Email,
            Field::Password => Field::Username,
        };
    }

    pub fn push_char(&mut self, c: char) {
        self.form.field_mut(self.focus).push(c);
    }

    pub fn backspace(&mut self) {
        self.form.field_mut(self.focus).pop();
    }

    /// The generated password replaces whatever was in the field.
    pub fn set_password(&mut self, password: &str) {
        self.form.password = password.to_string();
        self.toast("Password generated and copied to clipboard".to_string());
    }

    pub fn begin_confirm(&mut self, record: CredentialRecord) {
        self.pending = Some(record);
        self.view = View::ConfirmSave;
    }

    pub fn pending(&self) -> Option<&CredentialRecord> {
        self.pending.as_ref()
    }

    pub fn take_pending(&mut self) -> Option<CredentialRecord> {
        self.view = View::Form;
        self.pending.take()
    }

    pub fn cancel_confirm(&mut self) {
        self.pending = None;
        self.view = View::Form;
        self.toast("Save cancelled".to_string());
    }

    pub fn saved(&mut self) {
        self.form.reset();
        self.focus = Field::Website;
        self.notify(&Notice::Saved);
    }

    pub fn apply_lookup(&mut self, website: &str, outcome: Lookup) {
        let notice = match outcome {
            Lookup::Found(record) => {
                self.form.fill_from(&record);
                Notice::Found(record)
            }
            Lookup::NotFound => Notice::NotFound(website.to_string()),
            Lookup::StoreAbsent => Notice::StoreAbsent,
        };
        self.notify(&notice);
    }

    pub fn password_display(&self) -> String {
        if self.reveal_password {
            self.form.password.clone()
        } else {
            "*".repeat(self.form.password.chars().count())
        }
    }

    pub fn pending_password(&self) -> Option<&str> {
        self.pending.as_ref().map(|r| r.password.expose_secret())
    }
}
