//! Outgoing mail port.
use async_trait::async_trait;

use crate::domain::OutgoingMail;

use super::define_port_error;

define_port_error! {
    pub enum MailNotifierError {
        /// No delivery channel is configured.
        NotConfigured {} => "email service is not configured",
        Delivery { message: String } => "mail delivery failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailNotifier: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailNotifierError>;

    /// Whether mail actually leaves the process. Adapters that only record
    /// messages report `false`.
    fn delivers(&self) -> bool;
}
