use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginData, LoginRequest, RegisterRequest, UserSummary},
        jwt::JwtKeys,
        password,
        repo::{Role, User},
    },
    error::ApiError,
    response::ApiResponse,
    state::AppState,
};

/// Registration reuses the login route as PUT, matching the admin UI.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login).put(register))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginData>>, ApiError> {
    let (Some(username), Some(password)) = (
        payload.username.filter(|s| !s.is_empty()),
        payload.password.filter(|s| !s.is_empty()),
    ) else {
        return Err(ApiError::validation("Username and password are required"));
    };

    let user = User::find_by_username(&state.db, &username)
        .await
        .map_err(ApiError::internal("Login failed"))?;

    let Some(user) = user else {
        warn!(username = %username, "login with unknown username");
        return Err(ApiError::auth("Invalid credentials"));
    };

    let ok = password::verify_password(&password, &user.password_hash)
        .map_err(ApiError::internal("Login failed"))?;
    if !ok {
        warn!(user_id = user.id, "login with invalid password");
        return Err(ApiError::auth("Invalid credentials"));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys
        .sign(user.id, &user.username, user.role)
        .map_err(ApiError::internal("Login failed"))?;

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Json(ApiResponse::ok(
        LoginData {
            user: UserSummary::from(user),
            token,
        },
        "Login successful",
    )))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserSummary>>), ApiError> {
    let (Some(username), Some(password), Some(email)) = (
        payload.username.filter(|s| !s.is_empty()),
        payload.password.filter(|s| !s.is_empty()),
        payload.email.filter(|s| !s.is_empty()),
    ) else {
        return Err(ApiError::validation(
            "Username, password, and email are required",
        ));
    };

    if User::find_by_username_or_email(&state.db, &username, &email)
        .await
        .map_err(ApiError::internal("Registration failed"))?
        .is_some()
    {
        warn!(username = %username, "registration for existing user");
        return Err(ApiError::conflict("User already exists"));
    }

    let hash =
        password::hash_password(&password).map_err(ApiError::internal("Registration failed"))?;

    // Initial-setup semantics: accounts created here administer the site.
    let user = User::create(&state.db, &username, &email, &hash, Role::Admin)
        .await
        .map_err(ApiError::internal("Registration failed"))?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            UserSummary::from(user),
            "User created successfully",
        )),
    ))
}
