pub mod events;
pub mod health;
pub mod responses;
pub mod users;
