//! Translation of driven-port failures into domain errors.
//!
//! Connection problems surface as `service_unavailable`; query failures are
//! logged and become redacted `internal_error`s.

use tracing::{debug, error};

use super::Error;
use super::ports::{
    CatalogueRepositoryError, MailNotifierError, OrderRepositoryError, PasswordHasherError,
    UserRepositoryError,
};

pub(crate) fn map_catalogue_error(err: CatalogueRepositoryError) -> Error {
    match err {
        CatalogueRepositoryError::Connection { message } => {
            debug!(%message, "catalogue store unreachable");
            Error::service_unavailable("catalogue store is unavailable")
        }
        CatalogueRepositoryError::Query { message } => {
            error!(%message, "catalogue store query failed");
            Error::internal(message)
        }
        CatalogueRepositoryError::Duplicate { message } => Error::conflict(message),
        CatalogueRepositoryError::MissingParent { message } => Error::not_found(message),
    }
}

pub(crate) fn map_user_error(err: UserRepositoryError) -> Error {
    match err {
        UserRepositoryError::Connection { message } => {
            debug!(%message, "user store unreachable");
            Error::service_unavailable("user store is unavailable")
        }
        UserRepositoryError::Query { message } => {
            error!(%message, "user store query failed");
            Error::internal(message)
        }
        UserRepositoryError::DuplicateEmail {} | UserRepositoryError::DuplicateUsername {} => {
            Error::conflict(err.to_string())
        }
    }
}

pub(crate) fn map_order_error(err: OrderRepositoryError) -> Error {
    match err {
        OrderRepositoryError::Connection { message } => {
            debug!(%message, "order store unreachable");
            Error::service_unavailable("order store is unavailable")
        }
        OrderRepositoryError::Query { message } => {
            error!(%message, "order store query failed");
            Error::internal(message)
        }
    }
}

pub(crate) fn map_hasher_error(err: PasswordHasherError) -> Error {
    error!(error = %err, "password hasher failed");
    Error::internal(err.to_string())
}

pub(crate) fn map_mail_error(err: MailNotifierError) -> Error {
    match err {
        MailNotifierError::NotConfigured {} => Error::service_unavailable(err.to_string()),
        MailNotifierError::Delivery { message } => {
            error!(%message, "mail delivery failed");
            Error::internal(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case(CatalogueRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(CatalogueRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(CatalogueRepositoryError::duplicate("name taken"), ErrorCode::Conflict)]
    #[case(CatalogueRepositoryError::missing_parent("category not found"), ErrorCode::NotFound)]
    fn catalogue_errors(#[case] err: CatalogueRepositoryError, #[case] code: ErrorCode) {
        assert_eq!(map_catalogue_error(err).code(), code);
    }

    #[test]
    fn duplicate_username_names_the_field() {
        let mapped = map_user_error(UserRepositoryError::duplicate_username());
        assert_eq!(mapped.code(), ErrorCode::Conflict);
        assert_eq!(mapped.message(), "username is already taken");
    }

    #[rstest]
    #[case(MailNotifierError::not_configured(), ErrorCode::ServiceUnavailable)]
    #[case(MailNotifierError::delivery("502 from relay"), ErrorCode::InternalError)]
    fn mail_errors(#[case] err: MailNotifierError, #[case] code: ErrorCode) {
        assert_eq!(map_mail_error(err).code(), code);
    }
}
