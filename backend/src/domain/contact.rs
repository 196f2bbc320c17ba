//! Contact-form messages and outgoing mail.

use super::Email;

/// Longest accepted contact message body.
pub const MESSAGE_MAX: usize = 10_000;

/// Why a contact submission or mail request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    #[error("missing required fields")]
    MissingFields,
    #[error("email must look like name@domain")]
    InvalidEmail,
    #[error("message must be at most {max} characters")]
    MessageTooLong { max: usize },
    #[error("recipient, subject, and a text or html body are required")]
    IncompleteMail,
}

/// Raw contact-form fields.
#[derive(Debug, Clone, Default)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

/// A validated contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn try_from_draft(draft: ContactDraft) -> Result<Self, ContactValidationError> {
        let name = draft.name.trim();
        let subject = draft.subject.trim();
        let message = draft.message.trim();
        if [name, draft.email.trim(), subject, message]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err(ContactValidationError::MissingFields);
        }
        if message.chars().count() > MESSAGE_MAX {
            return Err(ContactValidationError::MessageTooLong { max: MESSAGE_MAX });
        }
        let email = Email::parse(&draft.email).map_err(|_| ContactValidationError::InvalidEmail)?;

        Ok(Self {
            name: name.to_owned(),
            email,
            phone: draft
                .phone
                .map(|phone| phone.trim().to_owned())
                .filter(|phone| !phone.is_empty()),
            subject: subject.to_owned(),
            message: message.to_owned(),
        })
    }

    /// Render the submission as a mail to the shop inbox, with a plain and
    /// an HTML body. Line breaks in the message survive in both.
    pub fn to_mail(&self, inbox: &str) -> OutgoingMail {
        let phone = self.phone.as_deref().unwrap_or("-");
        let text = format!(
            "Name: {}\nEmail: {}\nPhone: {phone}\nSubject: {}\n\n{}\n",
            self.name, self.email, self.subject, self.message
        );
        let html = format!(
            "<p><b>Name:</b> {}</p><p><b>Email:</b> {}</p><p><b>Phone:</b> {}</p>\
             <p><b>Message:</b><br>{}</p>",
            html_escape(&self.name),
            html_escape(self.email.as_ref()),
            html_escape(phone),
            html_escape(&self.message).replace('\n', "<br>"),
        );
        OutgoingMail {
            to: inbox.to_owned(),
            subject: format!("Contact form: {}", self.subject),
            text: Some(text),
            html: Some(html),
            reply_to: Some(self.email.to_string()),
        }
    }
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// A message handed to the mail notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub text: Option<String>,
    pub html: Option<String>,
    pub reply_to: Option<String>,
}

impl OutgoingMail {
    /// Validate an administrator-composed mail. At least one body is needed.
    pub fn compose(
        to: &str,
        subject: &str,
        text: Option<String>,
        html: Option<String>,
    ) -> Result<Self, ContactValidationError> {
        let non_blank = |body: Option<String>| body.filter(|value| !value.trim().is_empty());
        let text = non_blank(text);
        let html = non_blank(html);
        let subject = subject.trim();
        if to.trim().is_empty() || subject.is_empty() || (text.is_none() && html.is_none()) {
            return Err(ContactValidationError::IncompleteMail);
        }
        let to = Email::parse(to).map_err(|_| ContactValidationError::InvalidEmail)?;
        Ok(Self {
            to: to.into(),
            subject: subject.to_owned(),
            text,
            html,
            reply_to: None,
        })
    }
}
