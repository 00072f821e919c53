//! serein-inventory
//!
//! The life-events stress inventory. Pure data and pure functions — the
//! canonical event catalog, the risk-band table, and the score
//! calculator. No async, no database; persistence lives in
//! `serein-store`.

pub mod catalog;
pub mod scoring;

pub use catalog::{canonical_events, point_value};
pub use scoring::{score_selection, RiskBand, StressScore};
