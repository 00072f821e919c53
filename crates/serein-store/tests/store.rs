//! Integration tests for the relational store.
//!
//! These tests require a running PostgreSQL instance reachable via the
//! `DATABASE_URL` environment variable; migrations are applied on
//! connect.
//!
//! Run with: `cargo test -p serein-store --test store -- --ignored`

use sqlx::PgPool;
use uuid::Uuid;

use serein_core::{AccountStatus, Role};
use serein_inventory::RiskBand;
use serein_store::users::{NewUser, UserUpdate};
use serein_store::{responses, seed, users, StoreError};

async fn connect() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for store tests");
    let pool = serein_store::pool::connect(&url, 5)
        .await
        .expect("database connection should succeed");
    seed::ensure_seed(&pool, "admin@serein.test")
        .await
        .expect("seeding should succeed");
    pool
}

fn unique_email() -> String {
    format!("user-{}@serein.test", Uuid::new_v4())
}

async fn create_user(pool: &PgPool) -> Uuid {
    let created = users::create(
        pool,
        NewUser {
            email: unique_email(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone: None,
            role: None,
        },
    )
    .await
    .expect("user creation should succeed");
    created.user.id
}

#[tokio::test]
#[ignore]
async fn record_then_fetch_recomputes_the_same_score() {
    let pool = connect().await;
    let user_id = create_user(&pool).await;

    // death of spouse + divorce + imprisonment
    let recorded = responses::record(&pool, user_id, &[1, 2, 4]).await.unwrap();
    assert_eq!(recorded.score.total, 236);
    assert_eq!(recorded.score.band, RiskBand::Elevated);

    let detail = responses::fetch(&pool, recorded.response.id).await.unwrap();
    assert_eq!(detail.score.total, 236);
    assert_eq!(detail.score.band, RiskBand::Elevated);
    assert_eq!(detail.events.len(), 3);
    assert_eq!(detail.response.user_id, user_id);
}

#[tokio::test]
#[ignore]
async fn empty_selection_is_rejected_before_writing() {
    let pool = connect().await;
    let user_id = create_user(&pool).await;

    let err = responses::record(&pool, user_id, &[]).await.unwrap_err();
    assert!(matches!(err, StoreError::EmptySelection));
}

#[tokio::test]
#[ignore]
async fn unknown_caller_is_rejected() {
    let pool = connect().await;

    let err = responses::record(&pool, Uuid::new_v4(), &[1])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::UserNotFound { .. }));
}

#[tokio::test]
#[ignore]
async fn unknown_event_ids_produce_no_child_rows() {
    let pool = connect().await;
    let user_id = create_user(&pool).await;

    let recorded = responses::record(&pool, user_id, &[2, 9999])
        .await
        .unwrap();
    assert_eq!(recorded.score.total, 73);

    let detail = responses::fetch(&pool, recorded.response.id).await.unwrap();
    assert_eq!(detail.events.len(), 1);
    assert_eq!(detail.events[0].id, 2);
}

#[tokio::test]
#[ignore]
async fn duplicate_selections_count_once() {
    let pool = connect().await;
    let user_id = create_user(&pool).await;

    let recorded = responses::record(&pool, user_id, &[2, 2, 2]).await.unwrap();
    assert_eq!(recorded.score.total, 73);

    let detail = responses::fetch(&pool, recorded.response.id).await.unwrap();
    assert_eq!(detail.events.len(), 1);
}

#[tokio::test]
#[ignore]
async fn deleting_a_submission_cascades_to_event_rows() {
    let pool = connect().await;
    let user_id = create_user(&pool).await;

    let recorded = responses::record(&pool, user_id, &[1, 2]).await.unwrap();
    let response_id = recorded.response.id;

    responses::delete(&pool, response_id).await.unwrap();

    let err = responses::fetch(&pool, response_id).await.unwrap_err();
    assert!(matches!(err, StoreError::ResponseNotFound { .. }));

    let orphans: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM event_responses WHERE response_id = $1")
            .bind(response_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(orphans, 0);
}

#[tokio::test]
#[ignore]
async fn deleting_a_user_cascades_to_submissions() {
    let pool = connect().await;
    let user_id = create_user(&pool).await;

    let recorded = responses::record(&pool, user_id, &[1]).await.unwrap();

    users::delete(&pool, user_id).await.unwrap();

    let err = responses::fetch(&pool, recorded.response.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ResponseNotFound { .. }));
}

#[tokio::test]
#[ignore]
async fn promote_then_demote_roundtrip() {
    let pool = connect().await;
    let user_id = create_user(&pool).await;

    let roles = users::promote(&pool, user_id).await.unwrap();
    assert!(roles.contains(&Role::Admin));
    assert!(roles.contains(&Role::User));

    let roles = users::demote(&pool, user_id).await.unwrap();
    assert!(!roles.contains(&Role::Admin));
    assert!(roles.contains(&Role::User));
}

#[tokio::test]
#[ignore]
async fn duplicate_email_is_rejected() {
    let pool = connect().await;
    let email = unique_email();

    let first = NewUser {
        email: email.clone(),
        first_name: "First".to_string(),
        last_name: "User".to_string(),
        phone: None,
        role: None,
    };
    users::create(&pool, first.clone()).await.unwrap();

    let err = users::create(&pool, first).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEmail { .. }));
}

#[tokio::test]
#[ignore]
async fn update_replaces_profile_and_role() {
    let pool = connect().await;
    let user_id = create_user(&pool).await;

    let updated = users::update(
        &pool,
        user_id,
        UserUpdate {
            email: unique_email(),
            first_name: "Renamed".to_string(),
            last_name: "Account".to_string(),
            phone: Some("0600000000".to_string()),
            status: AccountStatus::Suspended,
            role: Some(Role::Admin),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.user.first_name, "Renamed");
    assert_eq!(updated.user.status, AccountStatus::Suspended);
    assert_eq!(updated.roles, vec![Role::Admin]);
}
