//! Contact form handler.
//!
//! ```text
//! POST /api/contact {"name":"Ана","email":"ana@example.com","subject":"Въпрос","message":"..."}
//! ```

use actix_web::{post, web};
use serde::Deserialize;

use crate::domain::{ContactDraft, ContactMessage, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::contact_error;

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl From<ContactRequest> for ContactDraft {
    fn from(body: ContactRequest) -> Self {
        Self {
            name: body.name,
            email: body.email,
            phone: body.phone,
            subject: body.subject,
            message: body.message,
        }
    }
}

/// Forward a visitor's message to the shop inbox.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message accepted", body = MessageResponse),
        (status = 400, description = "Missing required fields", body = Error),
        (status = 500, description = "Mail delivery failed", body = Error)
    ),
    tags = ["contact"],
    operation_id = "submitContact",
    security([])
)]
#[post("/contact")]
pub async fn submit_contact(
    state: web::Data<HttpState>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let message =
        ContactMessage::try_from_draft(payload.into_inner().into()).map_err(contact_error)?;
    state.contact.submit(message).await?;
    Ok(web::Json(MessageResponse::new("message sent")))
}
