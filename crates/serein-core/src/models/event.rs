use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One life event from the stress inventory. Immutable reference data,
/// seeded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StressEvent {
    pub id: i32,
    pub label: String,
    pub points: i32,
}
