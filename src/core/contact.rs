//! Contact form controller
//!
//! Nothing is delivered anywhere. A valid submission moves the form to
//! `Submitting`; the session clears it after `SEND_DELAY` and shows the
//! confirmation for `CONFIRMATION_DELAY` before returning to `Editing`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::content::{ContactChannel, ContactContent};

/// Simulated delivery time
pub const SEND_DELAY: Duration = Duration::from_millis(2000);

/// How long the confirmation stays up
pub const CONFIRMATION_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Editing,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFormData {
    fn field_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        }
    }

    /// Fields that fail validation, in form order
    pub fn invalid_fields(&self) -> Vec<ContactField> {
        let mut invalid = Vec::new();
        if self.name.trim().is_empty() {
            invalid.push(ContactField::Name);
        }
        if !looks_like_email(self.email.trim()) {
            invalid.push(ContactField::Email);
        }
        if self.subject.trim().is_empty() {
            invalid.push(ContactField::Subject);
        }
        if self.message.trim().is_empty() {
            invalid.push(ContactField::Message);
        }
        invalid
    }
}

/// `local@domain.tld` with no whitespace
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            let well_formed_domain = domain
                .split_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty());
            !local.is_empty() && !domain.contains('@') && well_formed_domain
        }
        None => false,
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Invalid contact form fields: {0:?}")]
    Invalid(Vec<ContactField>),
}

/// Result of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The send timer should be started
    Started,
    /// Already submitting; nothing changed
    Ignored,
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    data: ContactFormData,
    status: ContactStatus,
    /// Bumped on every submission so stale confirmation timers can be told apart
    generation: u64,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            data: ContactFormData::default(),
            status: ContactStatus::Editing,
            generation: 0,
        }
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ContactStatus {
        self.status
    }

    pub fn data(&self) -> &ContactFormData {
        &self.data
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Edit a field. Ignored while the form is being sent.
    pub fn update_field(&mut self, field: ContactField, value: impl Into<String>) -> bool {
        if self.status == ContactStatus::Submitting {
            return false;
        }
        *self.data.field_mut(field) = value.into();
        true
    }

    pub fn submit(&mut self) -> Result<SubmitOutcome, ContactError> {
        if self.status == ContactStatus::Submitting {
            return Ok(SubmitOutcome::Ignored);
        }
        let invalid = self.data.invalid_fields();
        if !invalid.is_empty() {
            return Err(ContactError::Invalid(invalid));
        }
        self.status = ContactStatus::Submitting;
        self.generation += 1;
        Ok(SubmitOutcome::Started)
    }

    /// Send timer fired: clear the form and show the confirmation
    pub fn finish_sending(&mut self) {
        if self.status == ContactStatus::Submitting {
            self.data = ContactFormData::default();
            self.status = ContactStatus::Submitted;
        }
    }

    /// Confirmation timer fired. Only the timer of the latest submission
    /// hides the confirmation.
    pub fn dismiss_confirmation(&mut self, generation: u64) {
        if self.status == ContactStatus::Submitted && self.generation == generation {
            self.status = ContactStatus::Editing;
        }
    }

    pub fn view(&self, content: &ContactContent) -> ContactView {
        ContactView {
            form: self.data.clone(),
            status: self.status,
            can_submit: self.status != ContactStatus::Submitting,
            confirmation: (self.status == ContactStatus::Submitted)
                .then(|| content.confirmation.clone()),
            channels: content.channels.clone(),
            availability: content.availability.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactView {
    pub form: ContactFormData,
    pub status: ContactStatus,
    pub can_submit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<String>,
    pub channels: Vec<ContactChannel>,
    pub availability: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.update_field(ContactField::Name, "Ada");
        form.update_field(ContactField::Email, "ada@example.com");
        form.update_field(ContactField::Subject, "Hello");
        form.update_field(ContactField::Message, "Let's build something");
        form
    }

    #[test]
    fn test_empty_form_lists_every_field() {
        let mut form = ContactForm::new();
        let err = form.submit().unwrap_err();
        assert_eq!(
            err,
            ContactError::Invalid(vec![
                ContactField::Name,
                ContactField::Email,
                ContactField::Subject,
                ContactField::Message,
            ])
        );
        assert_eq!(form.status(), ContactStatus::Editing);
    }

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a b@c.de"));
        assert!(!looks_like_email("a@@b.co"));
        assert!(!looks_like_email("a@.co"));
    }

    #[test]
    fn test_submit_lifecycle() {
        let mut form = filled();
        assert_eq!(form.submit(), Ok(SubmitOutcome::Started));
        assert_eq!(form.status(), ContactStatus::Submitting);

        assert!(!form.update_field(ContactField::Name, "Grace"));
        assert_eq!(form.submit(), Ok(SubmitOutcome::Ignored));

        form.finish_sending();
        assert_eq!(form.status(), ContactStatus::Submitted);
        assert_eq!(form.data(), &ContactFormData::default());

        form.dismiss_confirmation(form.generation());
        assert_eq!(form.status(), ContactStatus::Editing);
    }

    #[test]
    fn test_stale_confirmation_timer_ignored() {
        let mut form = filled();
        form.submit().unwrap();
        let first = form.generation();
        form.finish_sending();

        // A second message sent while the first confirmation is showing
        form.update_field(ContactField::Name, "Ada");
        form.update_field(ContactField::Email, "ada@example.com");
        form.update_field(ContactField::Subject, "Again");
        form.update_field(ContactField::Message, "One more thing");
        form.submit().unwrap();
        form.finish_sending();

        form.dismiss_confirmation(first);
        assert_eq!(form.status(), ContactStatus::Submitted);
    }

    #[test]
    fn test_view_shows_confirmation_only_when_submitted() {
        let content = ContactContent {
            confirmation: "Thanks!".into(),
            ..ContactContent::default()
        };
        let mut form = filled();
        assert!(form.view(&content).confirmation.is_none());

        form.submit().unwrap();
        assert!(!form.view(&content).can_submit);

        form.finish_sending();
        assert_eq!(form.view(&content).confirmation.as_deref(), Some("Thanks!"));
    }
}
