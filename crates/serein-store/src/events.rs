use sqlx::PgPool;

use serein_core::StressEvent;

use crate::error::StoreError;

/// List the stress-event inventory, heaviest first.
pub async fn list(pool: &PgPool) -> Result<Vec<StressEvent>, StoreError> {
    let events = sqlx::query_as::<_, StressEvent>(
        "SELECT id, label, points FROM stress_events ORDER BY points DESC, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(events)
}
