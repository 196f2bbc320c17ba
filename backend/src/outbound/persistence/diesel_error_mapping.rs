//! Diesel and pool error translation shared by the repositories.
//!
//! Unique violations are recognised by constraint name so the domain can
//! tell which rule was broken.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;
use crate::domain::ports::{CatalogueRepositoryError, OrderRepositoryError, UserRepositoryError};

const USERS_EMAIL_KEY: &str = "users_email_key";
const USERS_USERNAME_KEY: &str = "users_username_key";
const CATEGORIES_NAME_KEY: &str = "categories_name_key";
const SUBCATEGORIES_NAME_KEY: &str = "subcategories_category_name_key";

/// Coarse classification of a Diesel failure.
enum Failure {
    Connection(&'static str),
    Query(String),
    Unique(Option<String>),
    ForeignKey,
}

fn classify(error: DieselError, operation: &str) -> Failure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(%error, %operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            Failure::Unique(info.constraint_name().map(str::to_owned))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => Failure::ForeignKey,
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            Failure::Connection("database connection error")
        }
        DieselError::NotFound => Failure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => Failure::Query("database query error".to_owned()),
        _ => Failure::Query(format!("{operation} failed")),
    }
}

pub(super) fn user_pool_error(error: PoolError) -> UserRepositoryError {
    UserRepositoryError::connection(error.message())
}

pub(super) fn user_diesel_error(error: DieselError, operation: &str) -> UserRepositoryError {
    match classify(error, operation) {
        Failure::Connection(message) => UserRepositoryError::connection(message),
        Failure::Query(message) => UserRepositoryError::query(message),
        Failure::Unique(Some(name)) if name == USERS_USERNAME_KEY => {
            UserRepositoryError::duplicate_username()
        }
        Failure::Unique(Some(name)) if name == USERS_EMAIL_KEY => {
            UserRepositoryError::duplicate_email()
        }
        Failure::Unique(other) => {
            UserRepositoryError::query(format!("unexpected unique violation: {other:?}"))
        }
        Failure::ForeignKey => UserRepositoryError::query("unexpected foreign key violation"),
    }
}

pub(super) fn catalogue_pool_error(error: PoolError) -> CatalogueRepositoryError {
    CatalogueRepositoryError::connection(error.message())
}

pub(super) fn catalogue_diesel_error(
    error: DieselError,
    operation: &str,
) -> CatalogueRepositoryError {
    match classify(error, operation) {
        Failure::Connection(message) => CatalogueRepositoryError::connection(message),
        Failure::Query(message) => CatalogueRepositoryError::query(message),
        Failure::Unique(Some(name)) if name == CATEGORIES_NAME_KEY => {
            CatalogueRepositoryError::duplicate("category name already exists")
        }
        Failure::Unique(Some(name)) if name == SUBCATEGORIES_NAME_KEY => {
            CatalogueRepositoryError::duplicate("subcategory name already exists in this category")
        }
        Failure::Unique(_) => CatalogueRepositoryError::duplicate("record already exists"),
        Failure::ForeignKey => {
            CatalogueRepositoryError::missing_parent("referenced category no longer exists")
        }
    }
}

pub(super) fn order_pool_error(error: PoolError) -> OrderRepositoryError {
    OrderRepositoryError::connection(error.message())
}

pub(super) fn order_diesel_error(error: DieselError, operation: &str) -> OrderRepositoryError {
    match classify(error, operation) {
        Failure::Connection(message) => OrderRepositoryError::connection(message),
        Failure::Query(message) => OrderRepositoryError::query(message),
        Failure::Unique(_) => OrderRepositoryError::query("order already stored"),
        Failure::ForeignKey => OrderRepositoryError::query("order references an unknown user"),
    }
}

/// Postgres `COUNT(*)` is `BIGINT`; ports count in `u64`.
pub(super) fn count_from_db(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    use super::*;

    struct Violation(&'static str);

    impl DatabaseErrorInformation for Violation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some(self.0)
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique(constraint: &'static str) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(Violation(constraint)),
        )
    }

    #[rstest]
    #[case(USERS_EMAIL_KEY, UserRepositoryError::duplicate_email())]
    #[case(USERS_USERNAME_KEY, UserRepositoryError::duplicate_username())]
    fn user_unique_violations_name_the_field(
        #[case] constraint: &'static str,
        #[case] expected: UserRepositoryError,
    ) {
        assert_eq!(user_diesel_error(unique(constraint), "insert user"), expected);
    }

    #[rstest]
    fn subcategory_violation_mentions_the_category() {
        let err = catalogue_diesel_error(unique(SUBCATEGORIES_NAME_KEY), "insert subcategory");
        assert_eq!(
            err,
            CatalogueRepositoryError::duplicate("subcategory name already exists in this category")
        );
    }

    #[rstest]
    fn foreign_key_violations_report_the_missing_parent() {
        let err = catalogue_diesel_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                Box::new(Violation("subcategories_category_id_fkey")),
            ),
            "insert subcategory",
        );
        assert!(matches!(err, CatalogueRepositoryError::MissingParent { .. }));
    }

    #[rstest]
    fn closed_connections_are_connection_errors() {
        let err = catalogue_diesel_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::ClosedConnection,
                Box::new("server closed the connection".to_owned()),
            ),
            "list categories",
        );
        assert!(matches!(err, CatalogueRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn pool_errors_keep_the_driver_message() {
        let err = order_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, OrderRepositoryError::connection("timed out"));
    }
}
