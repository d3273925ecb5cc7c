//! Driving port for the admin user directory listing.

use async_trait::async_trait;
use pagination::{Page, PageParams};

use crate::domain::user::User;
use crate::domain::Error;

/// Domain use-case port for listing registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// List users, oldest first, one page at a time.
    async fn list_users(&self, page: PageParams) -> Result<Page<User>, Error>;
}
