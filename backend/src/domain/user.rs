//! User identity as seen by this backend.
//!
//! Credential storage and token issuance live in the upstream identity
//! service; this backend only needs the user row for ownership checks and
//! the admin role flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Primary key, matching the subject asserted by the identity service.
    pub id: i32,
    /// Display handle.
    pub username: String,
    /// Grants access to the admin surface when true.
    pub is_admin: bool,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}
