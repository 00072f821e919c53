use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use serein_core::{QuestionnaireResponse, StressEvent};
use serein_inventory::{score_selection, StressScore};

use crate::error::StoreError;

/// Outcome of recording one submission.
#[derive(Debug, Clone)]
pub struct RecordedResponse {
    pub response: QuestionnaireResponse,
    pub score: StressScore,
}

/// One stored submission with its selected events and recomputed score.
#[derive(Debug, Clone)]
pub struct ResponseDetail {
    pub response: QuestionnaireResponse,
    pub events: Vec<StressEvent>,
    pub score: StressScore,
}

/// Record a submission: one parent row plus one child row per selected
/// known event, in a single transaction, then return the computed score.
///
/// Rejected before anything is written: an empty selection, and a caller
/// id with no matching user. Event ids the inventory does not contain are
/// skipped and produce no child row.
pub async fn record(
    pool: &PgPool,
    user_id: Uuid,
    event_ids: &[i32],
) -> Result<RecordedResponse, StoreError> {
    if event_ids.is_empty() {
        return Err(StoreError::EmptySelection);
    }

    let mut tx = pool.begin().await?;

    let user_exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;
    if !user_exists {
        return Err(StoreError::UserNotFound { id: user_id });
    }

    // One row per *distinct known* id, so duplicate selections cannot
    // trip the composite key.
    let known: Vec<StressEvent> =
        sqlx::query_as("SELECT id, label, points FROM stress_events WHERE id = ANY($1)")
            .bind(event_ids.to_vec())
            .fetch_all(&mut *tx)
            .await?;

    let response: QuestionnaireResponse = sqlx::query_as(
        "INSERT INTO questionnaire_responses (id, user_id, submitted_at) \
         VALUES ($1, $2, $3) RETURNING id, user_id, submitted_at",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    for event in &known {
        sqlx::query("INSERT INTO event_responses (response_id, event_id) VALUES ($1, $2)")
            .bind(response.id)
            .bind(event.id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    let points: HashMap<i32, i32> = known.iter().map(|e| (e.id, e.points)).collect();
    let score = score_selection(event_ids, |id| points.get(&id).copied());

    tracing::info!(
        response_id = %response.id,
        user_id = %user_id,
        total = score.total,
        "submission recorded"
    );

    Ok(RecordedResponse { response, score })
}

/// All submissions, newest first.
pub async fn list_all(pool: &PgPool) -> Result<Vec<QuestionnaireResponse>, StoreError> {
    let responses = sqlx::query_as::<_, QuestionnaireResponse>(
        "SELECT id, user_id, submitted_at FROM questionnaire_responses \
         ORDER BY submitted_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(responses)
}

/// One user's submissions, newest first.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<QuestionnaireResponse>, StoreError> {
    let responses = sqlx::query_as::<_, QuestionnaireResponse>(
        "SELECT id, user_id, submitted_at FROM questionnaire_responses \
         WHERE user_id = $1 ORDER BY submitted_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(responses)
}

/// Fetch one submission with its events; the score is recomputed from
/// the event rows, never read from storage.
pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<ResponseDetail, StoreError> {
    let response: QuestionnaireResponse = sqlx::query_as(
        "SELECT id, user_id, submitted_at FROM questionnaire_responses WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::ResponseNotFound { id })?;

    let events: Vec<StressEvent> = sqlx::query_as(
        "SELECT e.id, e.label, e.points FROM event_responses er \
         JOIN stress_events e ON e.id = er.event_id \
         WHERE er.response_id = $1 ORDER BY e.points DESC, e.id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let points: HashMap<i32, i32> = events.iter().map(|e| (e.id, e.points)).collect();
    let ids: Vec<i32> = events.iter().map(|e| e.id).collect();
    let score = score_selection(&ids, |id| points.get(&id).copied());

    Ok(ResponseDetail {
        response,
        events,
        score,
    })
}

/// Delete a submission; its event rows go with it by cascade.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM questionnaire_responses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::ResponseNotFound { id });
    }

    tracing::info!(response_id = %id, "submission deleted");
    Ok(())
}
