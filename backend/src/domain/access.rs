//! Access-control decisions for the admin surface.
//!
//! The gate is an explicit step composed before admin handlers rather than
//! an implicit interceptor: handlers ask for a decision and map
//! [`AccessDecision::Forbidden`] to a 403 themselves, keeping the control
//! flow visible at the call site.

use super::user::User;

/// Outcome of an admin access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// The caller exists and carries the admin role.
    Allowed(User),
    /// The caller is unknown or lacks the admin role.
    Forbidden,
}

impl AccessDecision {
    /// True when access was granted.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }
}
