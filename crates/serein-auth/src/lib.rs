//! serein-auth
//!
//! Bearer-token identity and the capability gate. Tokens are HS256 JWTs
//! carrying the user id and role set; authorization reduces to checking
//! the decoded capability set against the role an operation demands.

pub mod error;
pub mod gate;
pub mod jwt;

pub use error::AuthError;
pub use gate::CapabilitySet;
pub use jwt::{sign_token, validate_token, Claims};
