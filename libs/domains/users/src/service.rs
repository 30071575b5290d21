use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserDto};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List every user
    pub async fn find_all(&self) -> UserResult<Vec<User>> {
        Ok(self.repository.find().await?)
    }

    /// Get a user by id, failing with [`UserError::NotFound`] if absent
    pub async fn find_one(&self, id: i32) -> UserResult<User> {
        self.repository
            .find_one_by_id_or_fail(id)
            .await
            .map_err(UserError::from_lookup)
    }

    /// Create a new user
    pub async fn create(&self, dto: UserDto) -> UserResult<User> {
        Ok(self.repository.save(dto).await?)
    }

    /// Overwrite an existing user.
    ///
    /// Nothing is written unless the user exists.
    pub async fn update(&self, id: i32, dto: UserDto) -> UserResult<()> {
        self.find_one(id).await?;
        self.repository.update(id, dto).await?;
        Ok(())
    }

    /// Delete a user. Deleting an unknown id succeeds.
    pub async fn delete(&self, id: i32) -> UserResult<()> {
        self.repository.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepositoryError;
    use crate::repository::MockUserRepository;
    use mockall::predicate::eq;
    use sea_orm::DbErr;

    fn dto() -> UserDto {
        UserDto {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "s3cret".to_string(),
        }
    }

    fn user(id: i32) -> User {
        User::from_dto(id, dto())
    }

    #[tokio::test]
    async fn test_create_saves_dto() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_save()
            .with(eq(dto()))
            .times(1)
            .returning(|dto| Ok(User::from_dto(1, dto)));

        let service = UserService::new(mock_repo);
        let created = service.create(dto()).await.unwrap();

        assert_eq!(created, user(1));
    }

    #[tokio::test]
    async fn test_find_all_returns_repository_list() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find()
            .times(1)
            .returning(|| Ok(vec![user(1), user(2)]));

        let service = UserService::new(mock_repo);
        let users = service.find_all().await.unwrap();

        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn test_find_one_looks_up_by_id() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_one_by_id_or_fail()
            .with(eq(1))
            .times(1)
            .returning(|id| Ok(user(id)));

        let service = UserService::new(mock_repo);
        assert_eq!(service.find_one(1).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_find_one_missing_is_user_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_one_by_id_or_fail()
            .returning(|id| Err(RepositoryError::NotFound(id)));

        let service = UserService::new(mock_repo);
        let err = service.find_one(1).await.unwrap_err();

        assert!(matches!(err, UserError::NotFound));
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_find_one_passes_other_errors_through() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_one_by_id_or_fail()
            .returning(|_| Err(DbErr::Custom("connection reset".into()).into()));

        let service = UserService::new(mock_repo);
        let err = service.find_one(1).await.unwrap_err();

        assert!(matches!(
            err,
            UserError::Repository(RepositoryError::Database(DbErr::Custom(ref msg))) if msg == "connection reset"
        ));
    }

    #[tokio::test]
    async fn test_update_checks_existence_then_writes() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_one_by_id_or_fail()
            .with(eq(1))
            .times(1)
            .returning(|id| Ok(user(id)));
        mock_repo
            .expect_update()
            .with(eq(1), eq(dto()))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = UserService::new(mock_repo);
        service.update(1, dto()).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_missing_user_never_writes() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_one_by_id_or_fail()
            .returning(|id| Err(RepositoryError::NotFound(id)));
        mock_repo.expect_update().never();

        let service = UserService::new(mock_repo);
        let err = service.update(1, dto()).await.unwrap_err();

        assert!(matches!(err, UserError::NotFound));
    }

    #[tokio::test]
    async fn test_update_lookup_failure_never_writes() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_one_by_id_or_fail()
            .returning(|_| Err(DbErr::Custom("timeout".into()).into()));
        mock_repo.expect_update().never();

        let service = UserService::new(mock_repo);
        let err = service.update(1, dto()).await.unwrap_err();

        assert!(matches!(
            err,
            UserError::Repository(RepositoryError::Database(DbErr::Custom(ref msg))) if msg == "timeout"
        ));
    }

    #[tokio::test]
    async fn test_delete_skips_existence_check() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_one_by_id_or_fail().never();
        mock_repo
            .expect_delete()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(mock_repo);
        service.delete(1).await.unwrap();
    }
}
