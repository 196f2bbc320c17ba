//! Account handlers.
//!
//! ```text
//! POST /api/auth/register {"email":"ana@example.com","username":"ana","password":"secret1"}
//! POST /api/auth/login    {"username":"ana","password":"secret1"}
//! POST /api/auth/logout
//! GET  /api/auth/profile
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, Registration, RegistrationDraft,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{MessageResponse, UserResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{login_error, registration_error};

/// Sign-up body. Missing fields deserialise as empty and fail validation.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<RegisterRequest> for RegistrationDraft {
    fn from(body: RegisterRequest) -> Self {
        Self {
            email: body.email,
            username: body.username,
            password: Zeroizing::new(body.password),
            first_name: body.first_name,
            last_name: body.last_name,
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(body: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&body.username, &body.password)
    }
}

/// Create an account. The configured admin email registers as administrator.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email or username taken", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from_draft(payload.into_inner().into())
        .map_err(registration_error)?;
    let user = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Verify credentials and issue the session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner()).map_err(login_error)?;
    let user = state.accounts.login(credentials).await?;
    session.persist_user(&user)?;
    Ok(web::Json(UserResponse::from(user)))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Session cleared", body = MessageResponse)),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> web::Json<MessageResponse> {
    session.purge();
    web::Json(MessageResponse::new("logged out"))
}

/// The logged-in account.
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Account no longer exists", body = Error)
    ),
    tags = ["auth"],
    operation_id = "profile"
)]
#[get("/auth/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let principal = session.require_user()?;
    let user = state.accounts.profile(&principal.id).await?;
    Ok(web::Json(UserResponse::from(user)))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
