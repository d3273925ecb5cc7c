//! Driving port guarding the admin surface.
//!
//! Admin handlers call the gate explicitly before doing any work, keeping
//! the authorisation step visible at the call site instead of hiding it in
//! middleware.

use async_trait::async_trait;

use crate::domain::access::AccessDecision;
use crate::domain::Error;

/// Domain use-case port deciding whether a subject may use admin endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessGate: Send + Sync {
    /// Check the subject against the user directory and its admin flag.
    async fn check_admin(&self, user_id: i32) -> Result<AccessDecision, Error>;
}
