//! serein-store
//!
//! PostgreSQL persistence. Thin async wrappers around `sqlx`: pool and
//! migration plumbing, idempotent startup seeding, and one module of
//! free functions per aggregate (users, events, responses). Transactional
//! guarantees are the database's; this crate only decides transaction
//! boundaries.

pub mod error;
pub mod events;
pub mod pool;
pub mod responses;
pub mod seed;
pub mod users;

pub use error::StoreError;
