use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::users::UserEntity;

#[derive(Debug, Clone, Deserialize)]
pub struct SendOtpModel {
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyOtpModel {
    pub phone: Option<String>,
    pub otp: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminLoginModel {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
}

impl From<UserEntity> for UserDto {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            phone: entity.phone,
        }
    }
}
