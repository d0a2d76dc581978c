//! Secret identity as seen by the category layer.
//!
//! Secret business rules live outside this crate; categories only need the
//! key to follow `secret_category` links.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Surrogate primary key of a `secret` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretKey(pub i64);

impl Display for SecretKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
