use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

pub const PLACEHOLDER_IMAGE: &str = "/api/placeholder/400/300";
pub const DEFAULT_LINK: &str = "#";

/// Portfolio entry as served to the public site. Wire format is camelCase
/// with RFC 3339 timestamps.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub link: String,
    pub featured: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: Option<String>,
    pub link: Option<String>,
    pub featured: Option<bool>,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub link: Option<String>,
    pub featured: Option<bool>,
}

impl Project {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Project>> {
        let rows = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, image, category, link, featured, created_at, updated_at
            FROM projects
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count(db: &PgPool) -> anyhow::Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(db)
            .await?;
        Ok(count)
    }

    pub async fn create(db: &PgPool, new: NewProject) -> anyhow::Result<Project> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (title, description, image, category, link, featured)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, image, category, link, featured, created_at, updated_at
            "#,
        )
        .bind(new.title)
        .bind(new.description)
        .bind(new.image.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()))
        .bind(new.category)
        .bind(new.link.unwrap_or_else(|| DEFAULT_LINK.to_string()))
        .bind(new.featured.unwrap_or(false))
        .fetch_one(db)
        .await?;
        Ok(project)
    }

    /// Returns `None` when no row matches `id`.
    pub async fn update_by_id(
        db: &PgPool,
        id: i32,
        changes: ProjectChanges,
    ) -> anyhow::Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                image = COALESCE($4, image),
                category = COALESCE($5, category),
                link = COALESCE($6, link),
                featured = COALESCE($7, featured),
                updated_at = now()
            WHERE id = $1
            RETURNING id, title, description, image, category, link, featured, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.image)
        .bind(changes.category)
        .bind(changes.link)
        .bind(changes.featured)
        .fetch_optional(db)
        .await?;
        Ok(project)
    }

    /// Returns the deleted row, or `None` when no row matches `id`.
    pub async fn delete_by_id(db: &PgPool, id: i32) -> anyhow::Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            DELETE FROM projects
            WHERE id = $1
            RETURNING id, title, description, image, category, link, featured, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(project)
    }
}
