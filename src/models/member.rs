//! Member model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Member model from database
///
/// The password column is write-only and never leaves the store through
/// this type.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub contact: String,
}

/// Create member request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    #[validate(length(min = 1, message = "Member id must not be empty"))]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: Option<String>,
    #[validate(length(min = 1, message = "Contact must not be empty"))]
    pub contact: Option<String>,
}

/// Validated insert payload
#[derive(Debug, Clone)]
pub struct NewMember {
    pub id: String,
    pub name: String,
    pub password: String,
    pub contact: String,
}

impl CreateMember {
    /// Extract the insert payload; absent required fields are a Validation error
    pub fn into_new(self) -> AppResult<NewMember> {
        Ok(NewMember {
            id: self
                .id
                .ok_or_else(|| AppError::Validation("id is required".to_string()))?,
            name: self
                .name
                .ok_or_else(|| AppError::Validation("name is required".to_string()))?,
            password: self
                .password
                .ok_or_else(|| AppError::Validation("password is required".to_string()))?,
            contact: self
                .contact
                .ok_or_else(|| AppError::Validation("contact is required".to_string()))?,
        })
    }
}
