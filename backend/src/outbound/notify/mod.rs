//! Mail notifier adapters.
//!
//! [`LoggingMailNotifier`] records messages in the log and reports that it
//! does not deliver, which keeps the contact form working without a mail
//! provider. [`HttpRelayMailNotifier`] posts each message as JSON to a relay
//! endpoint that performs the actual delivery.

mod http_relay;
mod logging;

pub use http_relay::HttpRelayMailNotifier;
pub use logging::LoggingMailNotifier;
