use async_trait::async_trait;
use sea_orm::DbErr;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{User, UserDto};

/// Persistence port for users
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, ordered by id
    async fn find(&self) -> RepositoryResult<Vec<User>>;

    /// The user with `id`, or [`RepositoryError::NotFound`]
    async fn find_one_by_id_or_fail(&self, id: i32) -> RepositoryResult<User>;

    /// Insert a new user and return it with its assigned id
    async fn save(&self, dto: UserDto) -> RepositoryResult<User>;

    /// Overwrite every field of the user with `id`. No-op if absent.
    async fn update(&self, id: i32, dto: UserDto) -> RepositoryResult<()>;

    /// Remove the user with `id`. No-op if absent.
    async fn delete(&self, id: i32) -> RepositoryResult<()>;
}

#[derive(Debug)]
struct Store {
    users: BTreeMap<i32, User>,
    next_id: i32,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Ids start at 1 and are never reused, matching a database sequence.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find(&self) -> RepositoryResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().cloned().collect())
    }

    async fn find_one_by_id_or_fail(&self, id: i32) -> RepositoryResult<User> {
        let store = self.store.read().await;
        store
            .users
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn save(&self, dto: UserDto) -> RepositoryResult<User> {
        let mut store = self.store.write().await;

        let id = store.next_id;
        store.next_id = id.checked_add(1).ok_or_else(|| {
            RepositoryError::Database(DbErr::Custom("user id sequence exhausted".to_string()))
        })?;

        let user = User::from_dto(id, dto);
        store.users.insert(id, user.clone());

        tracing::info!(user_id = %id, "Created user");
        Ok(user)
    }

    async fn update(&self, id: i32, dto: UserDto) -> RepositoryResult<()> {
        let mut store = self.store.write().await;

        if let Some(user) = store.users.get_mut(&id) {
            user.apply(dto);
            tracing::info!(user_id = %id, "Updated user");
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> RepositoryResult<()> {
        let mut store = self.store.write().await;

        if store.users.remove(&id).is_some() {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(())
    }
}
