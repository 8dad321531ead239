use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{UserError, UserResult};

/// User record as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    /// Unique across users
    pub email: String,
    /// Unique across users
    pub user_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Generated at creation; never leaves the service
    #[serde(skip_serializing)]
    pub password: String,
}

/// Outward representation of a user. Has no password field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub user_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            user_name: user.user_name,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Body of `POST /users/new`
///
/// Every field is required; `null` counts as missing. Unknown fields,
/// including `password`, are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[validate(required)]
    pub user_name: Option<String>,
    #[validate(required)]
    pub email: Option<String>,
    #[validate(required)]
    pub first_name: Option<String>,
    #[validate(required)]
    pub last_name: Option<String>,
}

/// Body of `POST /users/edits/{userId}`
///
/// A full replacement record. `password`, when present, is stored as sent.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditUser {
    #[validate(required)]
    pub user_name: Option<String>,
    #[validate(required)]
    pub email: Option<String>,
    #[validate(required)]
    pub first_name: Option<String>,
    #[validate(required)]
    pub last_name: Option<String>,
    pub password: Option<String>,
}

/// The four required profile fields, once known to be present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub user_name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserFields {
    fn require(
        user_name: Option<String>,
        email: Option<String>,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> UserResult<Self> {
        match (user_name, email, first_name, last_name) {
            (Some(user_name), Some(email), Some(first_name), Some(last_name)) => Ok(Self {
                user_name,
                email,
                first_name,
                last_name,
            }),
            _ => Err(UserError::Validation("missing required field".to_string())),
        }
    }
}

impl CreateUser {
    pub fn into_fields(self) -> UserResult<UserFields> {
        self.validate()?;
        UserFields::require(self.user_name, self.email, self.first_name, self.last_name)
    }
}

impl EditUser {
    pub fn into_changes(self) -> UserResult<UserChanges> {
        self.validate()?;
        let fields =
            UserFields::require(self.user_name, self.email, self.first_name, self.last_name)?;
        Ok(UserChanges {
            fields,
            password: self.password,
        })
    }
}

/// Insert payload handed to the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub fields: UserFields,
    pub password: String,
}

/// Full overwrite of a user's fields; `password: None` keeps the stored one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub fields: UserFields,
    pub password: Option<String>,
}

impl UserChanges {
    pub fn apply(self, user: &mut User) {
        user.user_name = self.fields.user_name;
        user.email = self.fields.email;
        user.first_name = Some(self.fields.first_name);
        user.last_name = Some(self.fields.last_name);
        if let Some(password) = self.password {
            user.password = password;
        }
    }
}

/// Lookup key for [`UserRepository::find_by_field`](crate::repository::UserRepository::find_by_field)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserField {
    Id(i32),
    Email(String),
    UserName(String),
}
