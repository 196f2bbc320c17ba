//! Session helpers keeping handlers free of actix-session details.
//!
//! The session cookie is encrypted, so the stored user id and admin flag are
//! trusted as issued at login.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, User, UserId};

/// Name of the session cookie issued at login.
pub const SESSION_COOKIE: &str = "token";

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const IS_ADMIN_KEY: &str = "is_admin";

/// The authenticated principal read back from the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUser {
    pub id: UserId,
    pub is_admin: bool,
}

/// Newtype wrapper exposing storefront-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record `user` as logged in, rotating the session to avoid fixation.
    pub fn persist_user(&self, user: &User) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user.id.to_string())
            .and_then(|()| self.0.insert(IS_ADMIN_KEY, user.is_admin))
            .map_err(|err| Error::internal(format!("failed to persist session: {err}")))
    }

    /// Drop every session key and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }

    /// Current principal, if the cookie carries a well-formed one.
    pub fn user(&self) -> Result<Option<SessionUser>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|err| Error::internal(format!("failed to read session: {err}")))?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let id = match raw.parse::<UserId>() {
            Ok(id) => id,
            Err(err) => {
                warn!(error = %err, "invalid user id in session cookie");
                return Ok(None);
            }
        };
        let is_admin = self
            .0
            .get::<bool>(IS_ADMIN_KEY)
            .map_err(|err| Error::internal(format!("failed to read session: {err}")))?
            .unwrap_or(false);
        Ok(Some(SessionUser { id, is_admin }))
    }

    /// Require a logged-in user or fail with `401 Unauthorized`.
    pub fn require_user(&self) -> Result<SessionUser, Error> {
        self.user()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require an administrator: `401` without a session, `403` otherwise.
    pub fn require_admin(&self) -> Result<SessionUser, Error> {
        let user = self.require_user()?;
        if user.is_admin {
            Ok(user)
        } else {
            Err(Error::forbidden("admins only"))
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Self::new) })
    }
}
