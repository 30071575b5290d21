use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::entity::{self, ActiveModel, Column, Entity as UserEntity};
use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{User, UserDto};
use crate::repository::UserRepository;

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find(&self) -> RepositoryResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_one_by_id_or_fail(&self, id: i32) -> RepositoryResult<User> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(User::from)
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn save(&self, dto: UserDto) -> RepositoryResult<User> {
        let model: entity::Model = ActiveModel::from(dto).insert(&self.db).await?;

        tracing::info!(user_id = %model.id, "Created user");
        Ok(model.into())
    }

    async fn update(&self, id: i32, dto: UserDto) -> RepositoryResult<()> {
        let result = UserEntity::update_many()
            .set(ActiveModel::from(dto))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        tracing::info!(user_id = %id, rows = result.rows_affected, "Updated user");
        Ok(())
    }

    async fn delete(&self, id: i32) -> RepositoryResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        tracing::info!(user_id = %id, rows = result.rows_affected, "Deleted user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn model(id: i32, first_name: &str) -> entity::Model {
        entity::Model {
            id,
            first_name: first_name.to_string(),
            last_name: "Lovelace".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            password: "s3cret".to_string(),
        }
    }

    fn dto() -> UserDto {
        UserDto {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "s3cret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Ada"), model(2, "Grace")]])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let users = repo.find().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 1);
        assert_eq!(users[1].first_name, "Grace");
    }

    #[tokio::test]
    async fn test_find_one_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let err = repo.find_one_by_id_or_fail(7).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(7)));
    }

    #[tokio::test]
    async fn test_find_one_propagates_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".into())])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let err = repo.find_one_by_id_or_fail(1).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Database(DbErr::Custom(_))));
    }

    #[tokio::test]
    async fn test_save_returns_inserted_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(5, "Ada")]])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let user = repo.save(dto()).await.unwrap();
        assert_eq!(user.id, 5);
        assert_eq!(user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_update_and_delete_succeed_without_matching_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgUserRepository::new(db);

        repo.update(3, dto()).await.unwrap();
        repo.delete(3).await.unwrap();
    }
}
