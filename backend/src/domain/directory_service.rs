//! User directory domain service.
//!
//! Backs two driving ports from the same repository: the admin access gate
//! and the admin user listing.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageParams};

use crate::domain::access::AccessDecision;
use crate::domain::ports::{AccessGate, UserRepository, UserRepositoryError, UsersQuery};
use crate::domain::user::User;
use crate::domain::Error;

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// User directory service implementing the access gate and listing ports.
#[derive(Clone)]
pub struct UserDirectoryService<R> {
    user_repo: Arc<R>,
}

impl<R> UserDirectoryService<R> {
    /// Create a new directory service with the user repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> AccessGate for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn check_admin(&self, user_id: i32) -> Result<AccessDecision, Error> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?;
        // An unknown subject and a known non-admin get the same answer so
        // the response does not leak which user ids exist.
        Ok(match user {
            Some(user) if user.is_admin => AccessDecision::Allowed(user),
            _ => AccessDecision::Forbidden,
        })
    }
}

#[async_trait]
impl<R> UsersQuery for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn list_users(&self, page: PageParams) -> Result<Page<User>, Error> {
        self.user_repo
            .list(page)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    //! Tests for the user directory service.
    use std::sync::Arc;

    use chrono::Utc;
    use mockall::predicate::eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::ErrorCode;

    fn user(id: i32, is_admin: bool) -> User {
        User {
            id,
            username: format!("user{id}"),
            is_admin,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn admin_users_are_allowed() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(user(id, true))));

        let gate = UserDirectoryService::new(Arc::new(repo));
        let decision = gate.check_admin(1).await.expect("gate answers");
        assert!(decision.is_allowed());
    }

    #[rstest]
    #[case::non_admin(Some(false))]
    #[case::unknown(None)]
    #[tokio::test]
    async fn non_admins_and_unknown_subjects_are_forbidden(#[case] known: Option<bool>) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |id| Ok(known.map(|is_admin| user(id, is_admin))));

        let gate = UserDirectoryService::new(Arc::new(repo));
        let decision = gate.check_admin(2).await.expect("gate answers");
        assert_eq!(decision, AccessDecision::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_map_to_service_unavailable() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Err(UserRepositoryError::connection("pool exhausted")));

        let gate = UserDirectoryService::new(Arc::new(repo));
        let error = gate.check_admin(1).await.expect_err("storage down");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
