use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Assigned by storage on create, never changes
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Stored and returned as given
    pub password: String,
}

impl User {
    /// Build the record `dto` becomes once storage assigns `id`.
    pub fn from_dto(id: i32, dto: UserDto) -> Self {
        Self {
            id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            password: dto.password,
        }
    }

    /// Overwrite every field except `id`.
    pub fn apply(&mut self, dto: UserDto) {
        self.first_name = dto.first_name;
        self.last_name = dto.last_name;
        self.email = dto.email;
        self.password = dto.password;
    }
}

/// Request body for both create and update. All fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Ada")]
    pub first_name: String,

    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Lovelace")]
    pub last_name: String,

    #[validate(email, length(max = 255))]
    #[schema(example = "ada@example.com")]
    pub email: String,

    #[validate(length(min = 1, max = 255))]
    #[schema(example = "s3cret")]
    pub password: String,
}
