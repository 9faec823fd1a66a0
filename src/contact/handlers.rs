use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument};

use crate::{error::ApiError, response::ApiResponse, state::AppState};

use super::dto::ContactRequest;
use super::repo::Contact;

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/contact", get(list_contacts).post(submit_contact))
}

#[instrument(skip(state, payload))]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Contact>>), ApiError> {
    let (Some(name), Some(email), Some(message)) = (
        payload.name.filter(|s| !s.is_empty()),
        payload.email.filter(|s| !s.is_empty()),
        payload.message.filter(|s| !s.is_empty()),
    ) else {
        return Err(ApiError::validation(
            "Name, email, and message are required",
        ));
    };

    if !is_valid_email(&email) {
        return Err(ApiError::validation("Invalid email format"));
    }

    let contact = Contact::create(&state.db, &name, &email, &message)
        .await
        .map_err(ApiError::internal("Failed to send message"))?;

    info!(contact_id = contact.id, "contact message stored");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(contact, "Message sent successfully")),
    ))
}

// TODO: require an admin token here once the admin panel starts sending one;
// the current consumer fetches this list without authentication.
#[instrument(skip(state))]
pub async fn list_contacts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Contact>>>, ApiError> {
    let contacts = Contact::list(&state.db)
        .await
        .map_err(ApiError::internal("Failed to fetch contacts"))?;
    Ok(Json(ApiResponse::ok(
        contacts,
        "Contacts fetched successfully",
    )))
}
