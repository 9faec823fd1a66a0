use sqlx::PgPool;
use tracing::{info, instrument};

use crate::auth::password;
use crate::auth::{Role, User};
use crate::config::AppConfig;
use crate::projects::{NewProject, Project};

/// Idempotent startup seeding: an admin account plus a starter project set.
/// The admin upsert never overwrites an existing row; projects are only
/// inserted into an empty table.
#[instrument(skip(db, config))]
pub async fn run(db: &PgPool, config: &AppConfig) -> anyhow::Result<()> {
    let hash = password::hash_password(&config.admin.password)?;
    let admin = User::upsert(
        db,
        &config.admin.username,
        &config.admin.email,
        &hash,
        Role::Admin,
    )
    .await?;
    info!(user_id = admin.id, username = %admin.username, "admin user ready");

    if Project::count(db).await? == 0 {
        for project in initial_projects() {
            Project::create(db, project).await?;
        }
        info!("seeded initial projects");
    } else {
        info!("projects already exist, skipping seeding");
    }

    Ok(())
}

fn initial_projects() -> Vec<NewProject> {
    vec![
        NewProject {
            title: "Site design for IT company".into(),
            description: "A modern website design for a technology company featuring clean UI and responsive design.".into(),
            category: "Website".into(),
            image: None,
            link: None,
            featured: Some(true),
        },
        NewProject {
            title: "Travel app design".into(),
            description: "Mobile application design for travel booking with intuitive user experience.".into(),
            category: "App Design".into(),
            image: None,
            link: None,
            featured: Some(true),
        },
        NewProject {
            title: "E-commerce platform".into(),
            description: "Full-stack e-commerce solution with modern design and advanced features.".into(),
            category: "Full Stack".into(),
            image: None,
            link: None,
            featured: Some(false),
        },
        NewProject {
            title: "Portfolio Website".into(),
            description: "Personal portfolio website built with Next.js, TypeScript, and GSAP animations.".into(),
            category: "Full Stack".into(),
            image: None,
            link: None,
            featured: Some(true),
        },
    ]
}
