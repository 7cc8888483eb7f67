//! Domain operations for the concert catalogue: creating and editing
//! artists and concerts, the attend/favourite membership toggles, and
//! account signup and login.
//!
//! Every mutating operation runs in its own database transaction.

pub mod accounts;
pub mod artists;
pub mod concerts;
pub mod error;
pub mod membership;

pub use error::{AuthFailure, CatalogError, Result};
pub use membership::{Association, MembershipOutcome, Toggle};

/// One page of a listing plus the total number of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}
