mod dto;
mod handlers;

pub mod repo;

pub use repo::Contact;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
