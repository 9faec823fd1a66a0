use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{auth::AuthClaims, error::ApiError, response::ApiResponse, state::AppState};

use super::dto::{CreateProjectRequest, DeleteProjectParams, UpdateProjectRequest};
use super::repo::{NewProject, Project, ProjectChanges};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/projects",
        get(list_projects)
            .post(create_project)
            .put(update_project)
            .delete(delete_project),
    )
}

#[instrument(skip(state))]
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Project>>>, ApiError> {
    let projects = Project::list(&state.db)
        .await
        .map_err(ApiError::internal("Failed to fetch projects"))?;
    Ok(Json(ApiResponse::ok(
        projects,
        "Projects fetched successfully",
    )))
}

#[instrument(skip(state, claims, payload))]
pub async fn create_project(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Project>>), ApiError> {
    claims.require_admin()?;

    let (Some(title), Some(description), Some(category)) = (
        payload.title.filter(|s| !s.is_empty()),
        payload.description.filter(|s| !s.is_empty()),
        payload.category.filter(|s| !s.is_empty()),
    ) else {
        return Err(ApiError::validation(
            "Title, description, and category are required",
        ));
    };

    let project = Project::create(
        &state.db,
        NewProject {
            title,
            description,
            category,
            image: payload.image.filter(|s| !s.is_empty()),
            link: payload.link.filter(|s| !s.is_empty()),
            featured: payload.featured,
        },
    )
    .await
    .map_err(ApiError::internal("Failed to create project"))?;

    info!(project_id = project.id, "project created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(project, "Project created successfully")),
    ))
}

#[instrument(skip(state, claims, payload))]
pub async fn update_project(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    claims.require_admin()?;

    let id = payload
        .id
        .filter(|&id| id != 0)
        .ok_or_else(|| ApiError::validation("Project ID is required"))?;

    let changes = ProjectChanges {
        title: payload.title,
        description: payload.description,
        image: payload.image,
        category: payload.category,
        link: payload.link,
        featured: payload.featured,
    };

    let project = Project::update_by_id(&state.db, id, changes)
        .await
        .map_err(ApiError::internal("Failed to update project"))?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;

    info!(project_id = project.id, "project updated");
    Ok(Json(ApiResponse::ok(
        project,
        "Project updated successfully",
    )))
}

#[instrument(skip(state, claims))]
pub async fn delete_project(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Query(params): Query<DeleteProjectParams>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    claims.require_admin()?;

    let id = params
        .id
        .as_deref()
        .and_then(|raw| raw.parse::<i32>().ok())
        .filter(|&id| id != 0)
        .ok_or_else(|| ApiError::validation("Project ID is required"))?;

    let project = Project::delete_by_id(&state.db, id)
        .await
        .map_err(ApiError::internal("Failed to delete project"))?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;

    info!(project_id = project.id, "project deleted");
    Ok(Json(ApiResponse::ok(
        project,
        "Project deleted successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtKeys, Role};
    use axum::body::{to_bytes, Body};
    use axum::extract::FromRef;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn app() -> (Router, JwtKeys) {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        (routes().with_state(state), keys)
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_rejects_missing_token() {
        let (app, _) = app();
        let response = app
            .oneshot(json_request("POST", "/projects", None, r#"{}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Authentication required");
    }

    #[tokio::test]
    async fn create_rejects_garbage_token() {
        let (app, _) = app();
        let response = app
            .oneshot(json_request(
                "POST",
                "/projects",
                Some("not-a-token"),
                r#"{}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_rejects_non_admin_token() {
        let (app, keys) = app();
        let token = keys.sign(7, "visitor", Role::User).unwrap();
        let response = app
            .oneshot(json_request(
                "POST",
                "/projects",
                Some(&token),
                r#"{"title":"x","description":"y","category":"z"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Authentication required");
    }

    #[tokio::test]
    async fn create_requires_title_description_category() {
        let (app, keys) = app();
        let token = keys.sign(1, "admin", Role::Admin).unwrap();
        let response = app
            .oneshot(json_request(
                "POST",
                "/projects",
                Some(&token),
                r#"{"title":"Only a title"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Title, description, and category are required");
    }

    #[tokio::test]
    async fn update_requires_id() {
        let (app, keys) = app();
        let token = keys.sign(1, "admin", Role::Admin).unwrap();
        let response = app
            .oneshot(json_request(
                "PUT",
                "/projects",
                Some(&token),
                r#"{"title":"renamed"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Project ID is required");
    }

    #[tokio::test]
    async fn update_treats_zero_id_as_missing() {
        let (app, keys) = app();
        let token = keys.sign(1, "admin", Role::Admin).unwrap();
        let response = app
            .oneshot(json_request(
                "PUT",
                "/projects",
                Some(&token),
                r#"{"id":0,"title":"renamed"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_requires_id_param() {
        let (app, keys) = app();
        let token = keys.sign(1, "admin", Role::Admin).unwrap();
        let response = app
            .oneshot(json_request("DELETE", "/projects", Some(&token), ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Project ID is required");
    }

    #[tokio::test]
    async fn delete_rejects_non_numeric_id() {
        let (app, keys) = app();
        let token = keys.sign(1, "admin", Role::Admin).unwrap();
        let response = app
            .oneshot(json_request(
                "DELETE",
                "/projects?id=abc",
                Some(&token),
                "",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
