use async_trait::async_trait;
use tracing::info;

use crate::domain::OutgoingMail;
use crate::domain::ports::{MailNotifier, MailNotifierError};

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMailNotifier;

#[async_trait]
impl MailNotifier for LoggingMailNotifier {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailNotifierError> {
        info!(
            to = %mail.to,
            subject = %mail.subject,
            reply_to = mail.reply_to.as_deref().unwrap_or("-"),
            has_html = mail.html.is_some(),
            "mail recorded without delivery"
        );
        Ok(())
    }

    fn delivers(&self) -> bool {
        false
    }
}
