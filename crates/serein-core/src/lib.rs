//! serein-core
//!
//! Pure domain types shared by every Serein crate: users and their
//! capability roles, the stress-event inventory rows, and questionnaire
//! submissions. No I/O — this is the shared vocabulary of the system.

pub mod models;

pub use models::{AccountStatus, QuestionnaireResponse, Role, StressEvent, User, UserWithRoles};
