//! Integration tests for the Postgres repositories.
//!
//! These need a live database (`DATABASE_URL`) and are ignored by default:
//! `cargo test -p planvision-db -- --ignored`.

use assert_matches::assert_matches;
use planvision_db::models::image_type::CreateImageType;
use planvision_db::models::input_image::CreateInputImage;
use planvision_db::models::project::{CreateProject, UpdateProject};
use planvision_db::models::render_config::{CreateRenderConfig, RenderConfig, UpdateRenderConfig};
use planvision_db::models::style::CreateStyle;
use planvision_db::models::user::CreateUser;
use planvision_db::repositories::CrudRepository;
use planvision_db::{DbError, Repositories};
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn project_crud_round_trip(pool: PgPool) {
    let repos = Repositories::postgres(pool);

    let project = repos
        .projects
        .create(&CreateProject {
            name: "Loft".into(),
            user_id: None,
        })
        .await
        .unwrap();

    let renamed = repos
        .projects
        .update(
            project.id,
            &UpdateProject {
                name: Some("Loft v2".into()),
            },
        )
        .await
        .unwrap()
        .expect("project exists");
    assert_eq!(renamed.name, "Loft v2");

    assert!(repos.projects.delete(project.id).await.unwrap());
    assert!(repos.projects.find_by_id(project.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_user_email_is_a_unique_violation(pool: PgPool) {
    let repos = Repositories::postgres(pool);
    let input = CreateUser {
        email: "dup@example.com".into(),
        name: "Dup".into(),
    };
    repos.users.create(&input).await.unwrap();

    let err = repos.users.create(&input).await.unwrap_err();
    assert_matches!(err, DbError::UniqueViolation(name) if name == "uq_users_email");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn render_config_with_unknown_project_is_a_foreign_key_violation(pool: PgPool) {
    let repos = Repositories::postgres(pool);
    let user = repos
        .users
        .create(&CreateUser {
            email: "fk@example.com".into(),
            name: "Fk".into(),
        })
        .await
        .unwrap();
    let image = repos
        .input_images
        .create(&CreateInputImage {
            url: "https://cdn.example.com/plan.png".into(),
            user_id: user.id,
        })
        .await
        .unwrap();
    let image_type = repos
        .image_types
        .create(&CreateImageType {
            label: "Floor plan".into(),
            value: "floor_plan_2d".into(),
            description: None,
        })
        .await
        .unwrap();

    let err = repos
        .render_configs
        .create(&CreateRenderConfig {
            project_id: Uuid::new_v4(),
            input_image_id: image.id,
            image_type_id: image_type.id,
            style_id: None,
            colors: Some(vec!["#FFFFFF".into()]),
            perspective: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, DbError::ForeignKeyViolation(_));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn style_image_type_ids_round_trip(pool: PgPool) {
    let repos = Repositories::postgres(pool);
    let type_id = Uuid::new_v4();
    let style = repos
        .styles
        .create(&CreateStyle {
            name: "Scandinavian".into(),
            thumbnail_url: "https://cdn.example.com/scandi.png".into(),
            prompt_fragment: "light oak, white walls".into(),
            image_type_ids: vec![type_id],
        })
        .await
        .unwrap();

    let fetched = repos.styles.find_by_id(style.id).await.unwrap().unwrap();
    assert_eq!(fetched.image_type_ids, vec![type_id]);
    assert!(fetched.applies_to(Some(type_id)));
    assert!(!fetched.applies_to(Some(Uuid::new_v4())));
}

/// A render config with every parent row it references.
async fn seed_render_config(repos: &Repositories) -> RenderConfig {
    let user = repos
        .users
        .create(&CreateUser {
            email: "rules@example.com".into(),
            name: "Rules".into(),
        })
        .await
        .unwrap();
    let project = repos
        .projects
        .create(&CreateProject {
            name: "Loft".into(),
            user_id: Some(user.id),
        })
        .await
        .unwrap();
    let image = repos
        .input_images
        .create(&CreateInputImage {
            url: "https://cdn.example.com/plan.png".into(),
            user_id: user.id,
        })
        .await
        .unwrap();
    let image_type = repos
        .image_types
        .create(&CreateImageType {
            label: "Floor plan".into(),
            value: "floor_plan_2d".into(),
            description: None,
        })
        .await
        .unwrap();
    repos
        .render_configs
        .create(&CreateRenderConfig {
            project_id: project.id,
            input_image_id: image.id,
            image_type_id: image_type.id,
            style_id: None,
            colors: None,
            perspective: Some("eye level".into()),
        })
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn referenced_image_type_delete_is_restricted(pool: PgPool) {
    let repos = Repositories::postgres(pool);
    let config = seed_render_config(&repos).await;

    let err = repos
        .image_types
        .delete(config.image_type_id)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::ForeignKeyViolation(name) if name == "render_configs_image_type_id_fkey"
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn project_delete_cascades_to_render_configs(pool: PgPool) {
    let repos = Repositories::postgres(pool);
    let config = seed_render_config(&repos).await;

    assert!(repos.projects.delete(config.project_id).await.unwrap());
    assert!(repos.render_configs.find_by_id(config.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn style_delete_nulls_render_config_style(pool: PgPool) {
    let repos = Repositories::postgres(pool);
    let config = seed_render_config(&repos).await;
    let style = repos
        .styles
        .create(&CreateStyle {
            name: "Scandinavian".into(),
            thumbnail_url: "https://cdn.example.com/scandi.png".into(),
            prompt_fragment: "light oak, white walls".into(),
            image_type_ids: vec![config.image_type_id],
        })
        .await
        .unwrap();
    repos
        .render_configs
        .update(
            config.id,
            &UpdateRenderConfig {
                style_id: Some(Some(style.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(repos.styles.delete(style.id).await.unwrap());
    let config = repos.render_configs.find_by_id(config.id).await.unwrap().unwrap();
    assert_eq!(config.style_id, None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn explicit_null_clears_render_config_perspective(pool: PgPool) {
    let repos = Repositories::postgres(pool);
    let config = seed_render_config(&repos).await;

    let cleared = repos
        .render_configs
        .update(
            config.id,
            &UpdateRenderConfig {
                perspective: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.perspective, None);
    assert_eq!(cleared.image_type_id, config.image_type_id);
}
