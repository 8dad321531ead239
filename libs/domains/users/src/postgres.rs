use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, SqlErr,
};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{NewUser, User, UserChanges, UserField, UserFields},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository
///
/// The table's `users_username_key` / `users_email_key` constraints are the
/// source of truth for uniqueness; violations come back as the matching
/// conflict error.
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(e: DbErr) -> UserError {
    UserError::Internal(format!("Database error: {}", e))
}

/// Map a failed insert/update to a conflict when it tripped a unique constraint.
fn write_error(e: DbErr, fields: &UserFields) -> UserError {
    let violation = match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => Some(msg),
        _ => {
            let msg = e.to_string();
            (msg.contains("duplicate key") || msg.contains("unique constraint")).then_some(msg)
        }
    };

    match violation {
        Some(msg) if msg.contains("username") => {
            UserError::UsernameAlreadyTaken(fields.user_name.clone())
        }
        Some(msg) if msg.contains("email") => UserError::EmailAlreadyInUse(fields.email.clone()),
        _ => db_error(e),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_field(&self, field: UserField) -> UserResult<Option<User>> {
        let query = match field {
            UserField::Id(id) => entity::Entity::find_by_id(id),
            UserField::Email(email) => {
                entity::Entity::find().filter(entity::Column::Email.eq(email))
            }
            UserField::UserName(name) => {
                entity::Entity::find().filter(entity::Column::Username.eq(name))
            }
        };

        let model = query.one(&self.db).await.map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn create(&self, user: NewUser) -> UserResult<User> {
        let fields = user.fields.clone();
        let active_model: entity::ActiveModel = user.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, &fields))?;

        tracing::info!(user_id = model.id, "Created user");
        Ok(model.into())
    }

    async fn update(&self, id: i32, changes: UserChanges) -> UserResult<User> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| UserError::NotFound(format!("id {}", id)))?;

        let fields = changes.fields;
        let mut active_model = model.into_active_model();
        active_model.username = Set(fields.user_name.clone());
        active_model.email = Set(fields.email.clone());
        active_model.first_name = Set(Some(fields.first_name.clone()));
        active_model.last_name = Set(Some(fields.last_name.clone()));
        if let Some(password) = changes.password {
            active_model.password = Set(password);
        }

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, &fields))?;

        tracing::info!(user_id = id, "Updated user");
        Ok(updated.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, RuntimeErr};

    fn model(id: i32, username: &str, email: &str) -> entity::Model {
        entity::Model {
            id,
            email: email.to_string(),
            username: username.to_string(),
            first_name: Some("A".to_string()),
            last_name: Some("L".to_string()),
            password: "generated1".to_string(),
        }
    }

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            fields: UserFields {
                user_name: username.to_string(),
                email: email.to_string(),
                first_name: "A".to_string(),
                last_name: "L".to_string(),
            },
            password: "generated1".to_string(),
        }
    }

    fn unique_violation(constraint: &str) -> DbErr {
        DbErr::Query(RuntimeErr::Internal(format!(
            "duplicate key value violates unique constraint \"{}\"",
            constraint
        )))
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(3, "alice", "a@x.com")]])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let user = repo
            .find_by_field(UserField::Email("a@x.com".into()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(user.user_name, "alice");
    }

    #[tokio::test]
    async fn test_find_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let user = repo.find_by_field(UserField::Id(9)).await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_create_returns_inserted_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "alice", "a@x.com")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 1,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let user = repo.create(new_user("alice", "a@x.com")).await.unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_create_maps_username_constraint() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([unique_violation("users_username_key")])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let result = repo.create(new_user("alice", "a@x.com")).await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyTaken(ref n)) if n == "alice"));
    }

    #[tokio::test]
    async fn test_create_maps_email_constraint() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([unique_violation("users_email_key")])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let result = repo.create(new_user("alice", "a@x.com")).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyInUse(ref e)) if e == "a@x.com"));
    }

    #[tokio::test]
    async fn test_other_errors_are_internal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Query(RuntimeErr::Internal(
                "connection reset by peer".to_string(),
            ))])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let result = repo.find_by_field(UserField::UserName("alice".into())).await;
        assert!(matches!(result, Err(UserError::Internal(_))));
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let changes = UserChanges {
            fields: new_user("alice", "a@x.com").fields,
            password: None,
        };
        let result = repo.update(5, changes).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![model(2, "alice", "a@x.com")],
                vec![model(2, "alice2", "b@x.com")],
            ])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let changes = UserChanges {
            fields: new_user("alice2", "b@x.com").fields,
            password: Some("chosen".to_string()),
        };
        let user = repo.update(2, changes).await.unwrap();

        assert_eq!(user.user_name, "alice2");
        assert_eq!(user.email, "b@x.com");
    }

    #[tokio::test]
    async fn test_update_maps_email_constraint() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(2, "alice", "a@x.com")]])
            .append_query_errors([unique_violation("users_email_key")])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let changes = UserChanges {
            fields: new_user("alice", "taken@x.com").fields,
            password: None,
        };
        let result = repo.update(2, changes).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyInUse(_))));
    }

    #[tokio::test]
    async fn test_update_maps_username_constraint() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(2, "alice", "a@x.com")]])
            .append_query_errors([unique_violation("users_username_key")])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let changes = UserChanges {
            fields: new_user("bob", "a@x.com").fields,
            password: None,
        };
        let result = repo.update(2, changes).await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyTaken(ref n)) if n == "bob"));
    }
}
