use sqlx::PgPool;
use uuid::Uuid;

use serein_inventory::canonical_events;

use crate::error::StoreError;

/// Idempotent startup seeding: the canonical stress-event inventory and
/// a bootstrap admin account under the configured email.
pub async fn ensure_seed(pool: &PgPool, admin_email: &str) -> Result<(), StoreError> {
    for event in canonical_events() {
        sqlx::query(
            "INSERT INTO stress_events (id, label, points) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(event.id)
        .bind(&event.label)
        .bind(event.points)
        .execute(pool)
        .await?;
    }

    let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(admin_email)
        .fetch_optional(pool)
        .await?;

    let admin_id = match existing {
        Some(id) => id,
        None => {
            let id = Uuid::new_v4();
            sqlx::query(
                "INSERT INTO users (id, email, first_name, last_name) \
                 VALUES ($1, $2, 'Admin', 'Serein')",
            )
            .bind(id)
            .bind(admin_email)
            .execute(pool)
            .await?;
            tracing::info!(email = admin_email, "bootstrap admin created");
            id
        }
    };

    sqlx::query(
        "INSERT INTO user_roles (user_id, role) VALUES ($1, 'admin') ON CONFLICT DO NOTHING",
    )
    .bind(admin_id)
    .execute(pool)
    .await?;

    Ok(())
}
