use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, EditUser, NewUser, UserField, UserResponse};
use crate::password::generate_password;
use crate::repository::UserRepository;

/// Service layer for the user workflows
///
/// Each operation validates, then checks uniqueness (user name before
/// email), then writes. The checks are a fast path only; the repository
/// still rejects conflicting writes that race past them.
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

    async fn is_taken(&self, field: UserField, except: Option<i32>) -> UserResult<bool> {
        let holder = self.repository.find_by_field(field).await?;
        Ok(holder.is_some_and(|user| Some(user.id) != except))
    }

    /// Create a user with a generated password
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        let fields = input.into_fields()?;

        if self
            .is_taken(UserField::UserName(fields.user_name.clone()), None)
            .await?
        {
            return Err(UserError::UsernameAlreadyTaken(fields.user_name));
        }
        if self
            .is_taken(UserField::Email(fields.email.clone()), None)
            .await?
        {
            return Err(UserError::EmailAlreadyInUse(fields.email));
        }

        let created = self
            .repository
            .create(NewUser {
                fields,
                password: generate_password(),
            })
            .await?;
        Ok(created.into())
    }

    /// Overwrite user `id` with a full replacement record
    pub async fn update_user(&self, id: i32, input: EditUser) -> UserResult<UserResponse> {
        let changes = input.into_changes()?;

        if self
            .repository
            .find_by_field(UserField::Id(id))
            .await?
            .is_none()
        {
            return Err(UserError::NotFound(format!("id {}", id)));
        }

        let fields = &changes.fields;
        if self
            .is_taken(UserField::UserName(fields.user_name.clone()), Some(id))
            .await?
        {
            return Err(UserError::UsernameAlreadyTaken(fields.user_name.clone()));
        }
        if self
            .is_taken(UserField::Email(fields.email.clone()), Some(id))
            .await?
        {
            return Err(UserError::EmailAlreadyInUse(fields.email.clone()));
        }

        let updated = self.repository.update(id, changes).await?;
        Ok(updated.into())
    }

    /// Get a user by email; an empty email matches nobody
    pub async fn get_user_by_email(&self, email: &str) -> UserResult<UserResponse> {
        if email.is_empty() {
            return Err(UserError::NotFound("empty email".to_string()));
        }

        let user = self
            .repository
            .find_by_field(UserField::Email(email.to_string()))
            .await?
            .ok_or_else(|| UserError::NotFound(format!("email '{}'", email)))?;

        Ok(user.into())
    }
}
