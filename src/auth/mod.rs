mod dto;
mod handlers;

pub mod jwt;
pub mod password;
pub mod repo;

pub use jwt::{AuthClaims, Claims, JwtKeys};
pub use repo::{Role, User};

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
