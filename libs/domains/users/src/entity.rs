use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{NewUser, User};

/// Sea-ORM Entity for the users table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            user_name: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            password: model.password,
        }
    }
}

impl From<NewUser> for ActiveModel {
    fn from(input: NewUser) -> Self {
        ActiveModel {
            email: Set(input.fields.email),
            username: Set(input.fields.user_name),
            first_name: Set(Some(input.fields.first_name)),
            last_name: Set(Some(input.fields.last_name)),
            password: Set(input.password),
            ..Default::default()
        }
    }
}
