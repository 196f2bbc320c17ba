//! Driving port for the contact form and administrator mail.
use async_trait::async_trait;

use crate::domain::{ContactMessage, Error, OutgoingMail};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Forward a contact-form submission to the shop inbox.
    async fn submit(&self, message: ContactMessage) -> Result<(), Error>;

    /// Send an administrator-composed mail. Fails with
    /// `service_unavailable` when no relay is configured.
    async fn send_mail(&self, mail: OutgoingMail) -> Result<(), Error>;
}
