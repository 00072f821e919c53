use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user not found: {id}")]
    UserNotFound { id: Uuid },

    #[error("response not found: {id}")]
    ResponseNotFound { id: Uuid },

    #[error("no events selected")]
    EmptySelection,

    #[error("email already registered: {email}")]
    DuplicateEmail { email: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}
