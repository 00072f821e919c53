use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One questionnaire submission. Totals are never stored on this row;
/// they are recomputed from the selected events on every read.
///
/// Selected events live in the `event_responses` association table
/// (composite key, cascade on delete) and surface as joined
/// [`StressEvent`](crate::models::StressEvent) rows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionnaireResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub submitted_at: DateTime<Utc>,
}
