//! Sign-up and sign-in inputs.
//!
//! Handlers turn raw payloads into these types before calling
//! [`AccountService`](super::ports::AccountService), so services never see
//! unvalidated strings. Passwords are held in [`Zeroizing`] buffers.

use zeroize::Zeroizing;

use super::user::{Email, UserValidationError, Username};

/// Shortest accepted password, counted in characters.
pub const PASSWORD_MIN: usize = 6;

/// Why a login payload was rejected before any lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("username is required")]
    MissingUsername,
    #[error("password is required")]
    MissingPassword,
}

/// Username and password submitted to the login endpoint.
///
/// The username is trimmed and lower-cased to match how it was stored at
/// registration. The password is kept verbatim.
///
/// # Examples
/// ```
/// use storefront::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Admin ", "admin123").unwrap();
/// assert_eq!(creds.username(), "admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim().to_lowercase();
        if username.is_empty() {
            return Err(LoginValidationError::MissingUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::MissingPassword);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Why a registration payload was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    #[error(transparent)]
    Field(#[from] UserValidationError),
    #[error("password is required")]
    MissingPassword,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

impl RegistrationValidationError {
    /// Name of the offending payload field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Field(UserValidationError::MissingEmail | UserValidationError::InvalidEmail) => {
                "email"
            }
            Self::Field(_) => "username",
            Self::MissingPassword | Self::PasswordTooShort { .. } => "password",
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Field(UserValidationError::MissingEmail | UserValidationError::MissingUsername)
            | Self::MissingPassword => "missing",
            Self::Field(UserValidationError::InvalidEmail) => "invalid_format",
            Self::Field(UserValidationError::UsernameTooShort { .. })
            | Self::PasswordTooShort { .. } => "too_short",
            Self::Field(UserValidationError::UsernameTooLong { .. }) => "too_long",
        }
    }
}

/// Raw registration fields as received from a client.
#[derive(Debug, Clone, Default)]
pub struct RegistrationDraft {
    pub email: String,
    pub username: String,
    pub password: Zeroizing<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Validated sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: Email,
    pub username: Username,
    password: Zeroizing<String>,
    pub first_name: String,
    pub last_name: String,
}

impl Registration {
    /// Validate every field, reporting the first failure in
    /// email, username, password order.
    pub fn try_from_draft(draft: RegistrationDraft) -> Result<Self, RegistrationValidationError> {
        let RegistrationDraft {
            email,
            username,
            password,
            first_name,
            last_name,
        } = draft;

        let email = Email::parse(&email)?;
        let username = Username::parse(&username)?;
        if password.is_empty() {
            return Err(RegistrationValidationError::MissingPassword);
        }
        if password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }

        Ok(Self {
            email,
            username,
            password,
            first_name: first_name.map(|v| v.trim().to_owned()).unwrap_or_default(),
            last_name: last_name.map(|v| v.trim().to_owned()).unwrap_or_default(),
        })
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn draft(email: &str, username: &str, password: &str) -> RegistrationDraft {
        RegistrationDraft {
            email: email.to_owned(),
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            first_name: Some("  Мария ".to_owned()),
            last_name: None,
        }
    }

    #[rstest]
    #[case("", "maria", "secret1", "email", "missing")]
    #[case("maria", "maria", "secret1", "email", "invalid_format")]
    #[case("m@example.com", "", "secret1", "username", "missing")]
    #[case("m@example.com", "mi", "secret1", "username", "too_short")]
    #[case("m@example.com", "maria", "", "password", "missing")]
    #[case("m@example.com", "maria", "12345", "password", "too_short")]
    fn reports_field_and_code(
        #[case] email: &str,
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let err = Registration::try_from_draft(draft(email, username, password))
            .expect_err("draft must be rejected");
        assert_eq!(err.field(), field);
        assert_eq!(err.code(), code);
    }

    #[test]
    fn normalises_accepted_draft() {
        let registration =
            Registration::try_from_draft(draft(" Maria@Example.com", "Maria", "secret1"))
                .expect("valid draft");
        assert_eq!(registration.email.as_ref(), "maria@example.com");
        assert_eq!(registration.username.as_ref(), "maria");
        assert_eq!(registration.first_name, "Мария");
        assert_eq!(registration.last_name, "");
        assert_eq!(registration.password(), "secret1");
    }

    #[rstest]
    #[case("", "pw", LoginValidationError::MissingUsername)]
    #[case("  ", "pw", LoginValidationError::MissingUsername)]
    #[case("ivan", "", LoginValidationError::MissingPassword)]
    fn login_requires_both_fields(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        assert_eq!(
            LoginCredentials::try_from_parts(username, password),
            Err(expected)
        );
    }
}
