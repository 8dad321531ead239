use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User, UserChanges, UserField, UserFields};

/// Repository trait for User persistence
///
/// Implementations must reject writes that would give two users the same
/// email or user name, reporting the specific conflict. Callers' own
/// lookups are only a fast path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find the single user matching `field`
    async fn find_by_field(&self, field: UserField) -> UserResult<Option<User>>;

    /// Insert a user; the store assigns the id
    async fn create(&self, user: NewUser) -> UserResult<User>;

    /// Overwrite an existing user
    async fn update(&self, id: i32, changes: UserChanges) -> UserResult<User>;
}

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<i32, User>,
    last_id: i32,
}

impl Store {
    /// First conflict with a user other than `except`, user name checked first
    fn conflict(&self, fields: &UserFields, except: Option<i32>) -> Option<UserError> {
        let others = || self.users.values().filter(move |u| Some(u.id) != except);

        if others().any(|u| u.user_name == fields.user_name) {
            return Some(UserError::UsernameAlreadyTaken(fields.user_name.clone()));
        }
        if others().any(|u| u.email == fields.email) {
            return Some(UserError::EmailAlreadyInUse(fields.email.clone()));
        }
        None
    }
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Uniqueness is checked under the write lock, so concurrent creates cannot
/// both win.
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
    async fn find_by_field(&self, field: UserField) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        let user = match field {
            UserField::Id(id) => store.users.get(&id),
            UserField::Email(email) => store.users.values().find(|u| u.email == email),
            UserField::UserName(name) => store.users.values().find(|u| u.user_name == name),
        };
        Ok(user.cloned())
    }

    async fn create(&self, user: NewUser) -> UserResult<User> {
        let mut store = self.store.write().await;

        if let Some(conflict) = store.conflict(&user.fields, None) {
            return Err(conflict);
        }

        store.last_id += 1;
        let created = User {
            id: store.last_id,
            email: user.fields.email,
            user_name: user.fields.user_name,
            first_name: Some(user.fields.first_name),
            last_name: Some(user.fields.last_name),
            password: user.password,
        };
        store.users.insert(created.id, created.clone());

        tracing::info!(user_id = created.id, "Created user");
        Ok(created)
    }

    async fn update(&self, id: i32, changes: UserChanges) -> UserResult<User> {
        let mut store = self.store.write().await;

        if !store.users.contains_key(&id) {
            return Err(UserError::NotFound(format!("id {}", id)));
        }
        if let Some(conflict) = store.conflict(&changes.fields, Some(id)) {
            return Err(conflict);
        }

        let user = store
            .users
            .get_mut(&id)
            .ok_or_else(|| UserError::NotFound(format!("id {}", id)))?;
        changes.apply(user);

        tracing::info!(user_id = id, "Updated user");
        Ok(user.clone())
    }
}
