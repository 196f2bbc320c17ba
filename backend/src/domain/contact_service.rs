//! Contact-form forwarding and administrator mail.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::port_error_mapping::map_mail_error;
use super::ports::{ContactService, MailNotifier};
use super::{ContactMessage, Error, OutgoingMail};

#[derive(Clone)]
pub struct ContactServiceImpl {
    notifier: Arc<dyn MailNotifier>,
    inbox: String,
}

impl ContactServiceImpl {
    /// `inbox` receives every contact-form submission.
    pub fn new(notifier: Arc<dyn MailNotifier>, inbox: impl Into<String>) -> Self {
        Self {
            notifier,
            inbox: inbox.into(),
        }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn submit(&self, message: ContactMessage) -> Result<(), Error> {
        let mail = message.to_mail(&self.inbox);
        self.notifier.send(&mail).await.map_err(map_mail_error)?;
        info!(subject = %message.subject, "contact message forwarded");
        Ok(())
    }

    async fn send_mail(&self, mail: OutgoingMail) -> Result<(), Error> {
        if !self.notifier.delivers() {
            return Err(Error::service_unavailable("email service is not configured"));
        }
        self.notifier.send(&mail).await.map_err(map_mail_error)?;
        info!(to = %mail.to, "administrator mail sent");
        Ok(())
    }
}
