use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use serein_core::{AccountStatus, Role, User, UserWithRoles};

use crate::error::StoreError;

/// Fields for a new account. The initial role defaults to `User` when
/// none is given.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Option<Role>,
}

/// Full profile replacement for an existing account. `role`, when given,
/// replaces the whole role set.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub status: AccountStatus,
    pub role: Option<Role>,
}

/// All accounts with their role sets, oldest first.
pub async fn list(pool: &PgPool) -> Result<Vec<UserWithRoles>, StoreError> {
    let users: Vec<User> = sqlx::query_as(
        "SELECT id, email, first_name, last_name, phone, status, created_at \
         FROM users ORDER BY created_at, id",
    )
    .fetch_all(pool)
    .await?;

    let rows: Vec<(Uuid, Role)> = sqlx::query_as("SELECT user_id, role FROM user_roles")
        .fetch_all(pool)
        .await?;

    let mut by_user: HashMap<Uuid, Vec<Role>> = HashMap::new();
    for (user_id, role) in rows {
        by_user.entry(user_id).or_default().push(role);
    }

    Ok(users
        .into_iter()
        .map(|user| {
            let roles = by_user.remove(&user.id).unwrap_or_default();
            UserWithRoles { user, roles }
        })
        .collect())
}

/// One account with its roles.
pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<UserWithRoles, StoreError> {
    let user: User = sqlx::query_as(
        "SELECT id, email, first_name, last_name, phone, status, created_at \
         FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::UserNotFound { id })?;

    let roles = roles_of(pool, id).await?;
    Ok(UserWithRoles { user, roles })
}

/// The role set currently assigned to an account.
pub async fn roles_of(pool: &PgPool, user_id: Uuid) -> Result<Vec<Role>, StoreError> {
    let roles: Vec<Role> =
        sqlx::query_scalar("SELECT role FROM user_roles WHERE user_id = $1 ORDER BY role")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

    Ok(roles)
}

/// Create an account and assign its initial role in one transaction.
pub async fn create(pool: &PgPool, new: NewUser) -> Result<UserWithRoles, StoreError> {
    let mut tx = pool.begin().await?;

    let user: User = sqlx::query_as(
        "INSERT INTO users (id, email, first_name, last_name, phone) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, email, first_name, last_name, phone, status, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(&new.email)
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.phone)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| map_unique_email(e, &new.email))?;

    let role = new.role.unwrap_or(Role::User);
    sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
        .bind(user.id)
        .bind(role)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(user_id = %user.id, email = %user.email, "user created");
    Ok(UserWithRoles {
        user,
        roles: vec![role],
    })
}

/// Replace an account's profile, and its role set when the update names
/// a role.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    changes: UserUpdate,
) -> Result<UserWithRoles, StoreError> {
    let mut tx = pool.begin().await?;

    let user: User = sqlx::query_as(
        "UPDATE users SET email = $2, first_name = $3, last_name = $4, phone = $5, status = $6 \
         WHERE id = $1 \
         RETURNING id, email, first_name, last_name, phone, status, created_at",
    )
    .bind(id)
    .bind(&changes.email)
    .bind(&changes.first_name)
    .bind(&changes.last_name)
    .bind(&changes.phone)
    .bind(changes.status)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| map_unique_email(e, &changes.email))?
    .ok_or(StoreError::UserNotFound { id })?;

    if let Some(role) = changes.role {
        sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
            .bind(id)
            .bind(role)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    let roles = roles_of(pool, id).await?;
    Ok(UserWithRoles { user, roles })
}

/// Delete an account. Role rows and submissions cascade.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::UserNotFound { id });
    }

    tracing::info!(user_id = %id, "user deleted");
    Ok(())
}

/// Grant the admin capability. No-op when already held.
pub async fn promote(pool: &PgPool, id: Uuid) -> Result<Vec<Role>, StoreError> {
    ensure_exists(pool, id).await?;

    sqlx::query(
        "INSERT INTO user_roles (user_id, role) VALUES ($1, 'admin') ON CONFLICT DO NOTHING",
    )
    .bind(id)
    .execute(pool)
    .await?;

    tracing::info!(user_id = %id, "promoted to admin");
    roles_of(pool, id).await
}

/// Revoke the admin capability, keeping the base role in place.
pub async fn demote(pool: &PgPool, id: Uuid) -> Result<Vec<Role>, StoreError> {
    ensure_exists(pool, id).await?;

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM user_roles WHERE user_id = $1 AND role = 'admin'")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query(
        "INSERT INTO user_roles (user_id, role) VALUES ($1, 'user') ON CONFLICT DO NOTHING",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    tracing::info!(user_id = %id, "demoted to user");
    roles_of(pool, id).await
}

async fn ensure_exists(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;

    if exists {
        Ok(())
    } else {
        Err(StoreError::UserNotFound { id })
    }
}

fn map_unique_email(e: sqlx::Error, email: &str) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateEmail {
            email: email.to_string(),
        },
        _ => StoreError::Database(e),
    }
}
