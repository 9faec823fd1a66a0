use serde::{Deserialize, Serialize};

use crate::auth::repo::{Role, User};

/// Request body for login. Fields are optional so presence checks can answer
/// with the contract's 400 message instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Request body for registration (PUT on the login route).
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

/// The part of a user the client may see.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

/// Payload of a successful login.
#[derive(Debug, Serialize)]
pub struct LoginData {
    pub user: UserSummary,
    pub token: String,
}
