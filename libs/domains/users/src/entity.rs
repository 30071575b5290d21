use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{User, UserDto};

/// Sea-ORM Entity for the users table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            password: model.password,
        }
    }
}

// Insert model; the database assigns the id.
impl From<UserDto> for ActiveModel {
    fn from(dto: UserDto) -> Self {
        ActiveModel {
            id: NotSet,
            first_name: Set(dto.first_name),
            last_name: Set(dto.last_name),
            email: Set(dto.email),
            password: Set(dto.password),
        }
    }
}
