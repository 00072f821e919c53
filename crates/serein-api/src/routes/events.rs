use axum::extract::State;
use axum::Json;

use serein_core::StressEvent;
use serein_store::events;

use crate::error::ApiError;
use crate::state::AppState;

/// The stress-event inventory, heaviest first. Public reference data.
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<StressEvent>>, ApiError> {
    let events = events::list(&state.pool).await?;
    Ok(Json(events))
}
