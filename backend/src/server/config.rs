//! Application settings loaded via OrthoConfig and the assembled server
//! configuration handed to [`super::create_server`].

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use storefront::domain::{Email, UserValidationError};
use storefront::inbound::http::session_config::SessionSettings;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ADMIN_EMAIL: &str = "admin@luxury.com";
const DEFAULT_CONTACT_INBOX: &str = "kondor_am@abv.bg";
const DEFAULT_MAIL_FROM: &str = "no-reply@luxury.com";

/// Settings read from CLI flags, `STOREFRONT_*` variables, and the config file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOREFRONT")]
pub struct AppConfig {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// Postgres connection string. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Registering with this address grants administrator rights.
    pub admin_email: Option<String>,
    /// Recipient of contact form submissions.
    pub contact_inbox: Option<String>,
    /// HTTP mail relay endpoint; mail is only logged when unset.
    pub mail_relay_url: Option<String>,
    /// Sender address passed to the relay.
    pub mail_from: Option<String>,
    /// Insert the demo administrator and catalogue on an empty store.
    #[ortho_config(default = false)]
    pub seed_demo_data: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid {field} '{value}': {source}")]
    Email {
        field: &'static str,
        value: String,
        #[source]
        source: UserValidationError,
    },
    #[error("invalid mail relay url '{value}': {source}")]
    MailRelay {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

fn parse_email(field: &'static str, value: &str) -> Result<Email, ConfigError> {
    Email::parse(value).map_err(|source| ConfigError::Email {
        field,
        value: value.to_owned(),
        source,
    })
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::BindAddr`] when the address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| ConfigError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Email`] for a malformed address.
    pub fn admin_email(&self) -> Result<Email, ConfigError> {
        parse_email(
            "admin email",
            self.admin_email.as_deref().unwrap_or(DEFAULT_ADMIN_EMAIL),
        )
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Email`] for a malformed address.
    pub fn contact_inbox(&self) -> Result<Email, ConfigError> {
        parse_email(
            "contact inbox",
            self.contact_inbox.as_deref().unwrap_or(DEFAULT_CONTACT_INBOX),
        )
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::MailRelay`] when the relay URL does not parse.
    pub fn mail_relay_url(&self) -> Result<Option<Url>, ConfigError> {
        self.mail_relay_url
            .as_deref()
            .map(|value| {
                Url::parse(value).map_err(|source| ConfigError::MailRelay {
                    value: value.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    pub fn mail_from(&self) -> &str {
        self.mail_from.as_deref().unwrap_or(DEFAULT_MAIL_FROM)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }
}
