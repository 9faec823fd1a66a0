use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub link: Option<String>,
    pub featured: Option<bool>,
}

/// Body of a partial update; absent fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub link: Option<String>,
    pub featured: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteProjectParams {
    pub id: Option<String>,
}
