//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: String,
    pub category: String,
    pub name: String,
    pub author: String,
    pub copies: i32,
}

/// Create book request
///
/// All fields are required; the id is caller-supplied and must be unique.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Book id must not be empty"))]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: Option<String>,
    #[validate(length(min = 1, message = "Category must not be empty"))]
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Copies must be non-negative"))]
    pub copies: Option<i32>,
}

/// Validated insert payload
#[derive(Debug, Clone)]
pub struct NewBook {
    pub id: String,
    pub category: String,
    pub name: String,
    pub author: String,
    pub copies: i32,
}

impl CreateBook {
    /// Extract the insert payload; absent required fields are a Validation error
    pub fn into_new(self) -> AppResult<NewBook> {
        Ok(NewBook {
            id: self
                .id
                .ok_or_else(|| AppError::Validation("id is required".to_string()))?,
            name: self
                .name
                .ok_or_else(|| AppError::Validation("name is required".to_string()))?,
            author: self
                .author
                .ok_or_else(|| AppError::Validation("author is required".to_string()))?,
            category: self
                .category
                .ok_or_else(|| AppError::Validation("category is required".to_string()))?,
            copies: self
                .copies
                .ok_or_else(|| AppError::Validation("copies is required".to_string()))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> CreateBook {
        CreateBook {
            id: Some("B1".to_string()),
            name: Some("The Rust Programming Language".to_string()),
            author: Some("Klabnik & Nichols".to_string()),
            category: Some("Programming".to_string()),
            copies: Some(3),
        }
    }

    #[test]
    fn full_request_extracts() {
        let book = full_request().into_new().expect("all fields present");
        assert_eq!(book.id, "B1");
        assert_eq!(book.copies, 3);
    }

    #[test]
    fn missing_field_is_a_validation_error() {
        let mut request = full_request();
        request.author = None;
        let err = request.into_new().expect_err("author is missing");
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn blank_name_fails_validation() {
        let mut request = full_request();
        request.name = Some(String::new());
        assert!(request.validate().is_err());
    }

    #[test]
    fn negative_copies_fails_validation() {
        let mut request = full_request();
        request.copies = Some(-1);
        assert!(request.validate().is_err());
    }
}
