//! Core use-case services.
//!
//! # Responsibility
//! - Layer domain rules (uniqueness pre-checks, existence checks) over DAO
//!   primitives.
//! - Keep consumers decoupled from SQL and row shapes.

pub mod category_service;
