//! Domain values shared by DAOs and services.
//!
//! # Invariants
//! - Surrogate keys and natural keys are distinct newtypes, so a lookup
//!   by key can never be confused with a lookup by name.
//! - Entity values are immutable once constructed.

pub mod category;
pub mod secret;
