//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;
use pagination::{Page, PageParams};

use crate::domain::user::User;

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
}

impl UserRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Read-only storage port for user rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by id.
    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, UserRepositoryError>;

    /// List users, oldest first, one page at a time.
    async fn list(&self, page: PageParams) -> Result<Page<User>, UserRepositoryError>;
}
