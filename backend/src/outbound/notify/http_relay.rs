//! Reqwest-backed mail relay adapter.
//!
//! The relay receives `{"from","to","subject","text","html","replyTo"}` and
//! answers 2xx once it has accepted the message.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::OutgoingMail;
use crate::domain::ports::{MailNotifier, MailNotifierError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

impl<'a> RelayMessage<'a> {
    fn new(from: &'a str, mail: &'a OutgoingMail) -> Self {
        Self {
            from,
            to: &mail.to,
            subject: &mail.subject,
            text: mail.text.as_deref(),
            html: mail.html.as_deref(),
            reply_to: mail.reply_to.as_deref(),
        }
    }
}

pub struct HttpRelayMailNotifier {
    client: Client,
    endpoint: Url,
    from: String,
}

impl HttpRelayMailNotifier {
    /// Build a notifier posting to `endpoint` with a ten second timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, from: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(endpoint, from, DEFAULT_TIMEOUT)
    }

    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(
        endpoint: Url,
        from: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            from: from.into(),
        })
    }
}

#[async_trait]
impl MailNotifier for HttpRelayMailNotifier {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailNotifierError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&RelayMessage::new(&self.from, mail))
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "mail relay unreachable");
                MailNotifierError::delivery(err.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(to = %mail.to, "mail accepted by relay");
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(map_status_error(status, &body))
    }

    fn delivers(&self) -> bool {
        true
    }
}

fn map_status_error(status: StatusCode, body: &str) -> MailNotifierError {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let preview: String = body
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(PREVIEW_CHAR_LIMIT)
        .collect();
    if preview.is_empty() {
        MailNotifierError::delivery(format!("relay answered {}", status.as_u16()))
    } else {
        MailNotifierError::delivery(format!("relay answered {}: {preview}", status.as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn payload_omits_absent_bodies() {
        let mail = OutgoingMail {
            to: "ana@example.com".to_owned(),
            subject: "Поръчка".to_owned(),
            text: None,
            html: Some("<p>Благодарим</p>".to_owned()),
            reply_to: None,
        };
        let payload =
            serde_json::to_value(RelayMessage::new("shop@luxury.com", &mail)).expect("payload");

        assert_eq!(
            payload,
            json!({
                "from": "shop@luxury.com",
                "to": "ana@example.com",
                "subject": "Поръчка",
                "html": "<p>Благодарим</p>"
            })
        );
    }

    #[rstest]
    #[case(StatusCode::BAD_GATEWAY, "  upstream \n down ", "relay answered 502: upstream down")]
    #[case(StatusCode::UNAUTHORIZED, "", "relay answered 401")]
    fn status_errors_carry_a_compact_preview(
        #[case] status: StatusCode,
        #[case] body: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(
            map_status_error(status, body),
            MailNotifierError::delivery(expected)
        );
    }

    #[tokio::test]
    async fn unreachable_relay_is_a_delivery_error() {
        let endpoint = Url::parse("http://127.0.0.1:9/mail").expect("url");
        let notifier =
            HttpRelayMailNotifier::with_timeout(endpoint, "shop@luxury.com", Duration::from_secs(2))
                .expect("client");
        let mail = OutgoingMail {
            to: "ana@example.com".to_owned(),
            subject: "Hi".to_owned(),
            text: Some("body".to_owned()),
            html: None,
            reply_to: None,
        };

        let err = notifier.send(&mail).await.expect_err("nothing listens");
        assert!(matches!(err, MailNotifierError::Delivery { .. }));
        assert!(notifier.delivers());
    }
}
