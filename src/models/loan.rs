//! Loan (issue/return) model and related types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Loan lifecycle status
///
/// A loan is created Issued and transitions to Returned exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "loan_status")]
pub enum LoanStatus {
    Issued,
    Returned,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Issued => "Issued",
            LoanStatus::Returned => "Returned",
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Active loan joined with book and member names for display
///
/// Dates serialize as ISO-8601; fine serializes as a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ActiveLoan {
    pub id: i32,
    pub book_id: String,
    pub book_name: String,
    pub member_id: String,
    pub member_name: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub fine: Decimal,
}

/// Issue request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IssueLoan {
    #[validate(length(min = 1, message = "Book id must not be empty"))]
    pub book_id: Option<String>,
    #[validate(length(min = 1, message = "Member id must not be empty"))]
    pub member_id: Option<String>,
    /// Due date (ISO 8601 date)
    pub due_date: Option<NaiveDate>,
}

/// Validated issue payload
#[derive(Debug, Clone)]
pub struct NewLoan {
    pub book_id: String,
    pub member_id: String,
    pub due_date: NaiveDate,
}

impl IssueLoan {
    /// Extract the issue payload; absent required fields are a Validation error
    pub fn into_new(self) -> AppResult<NewLoan> {
        Ok(NewLoan {
            book_id: self
                .book_id
                .ok_or_else(|| AppError::Validation("book_id is required".to_string()))?,
            member_id: self
                .member_id
                .ok_or_else(|| AppError::Validation("member_id is required".to_string()))?,
            due_date: self
                .due_date
                .ok_or_else(|| AppError::Validation("due_date is required".to_string()))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_serde() {
        let json = serde_json::to_string(&LoanStatus::Issued).expect("serializes");
        assert_eq!(json, "\"Issued\"");
        let status: LoanStatus = serde_json::from_str("\"Returned\"").expect("deserializes");
        assert_eq!(status, LoanStatus::Returned);
    }

    #[test]
    fn active_loan_serializes_dates_iso_and_fine_as_string() {
        let loan = ActiveLoan {
            id: 1,
            book_id: "B1".to_string(),
            book_name: "Dune".to_string(),
            member_id: "U1".to_string(),
            member_name: "Ada".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2024, 12, 1).expect("valid date"),
            due_date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
            fine: Decimal::new(1250, 2),
        };
        let value = serde_json::to_value(&loan).expect("serializes");
        assert_eq!(value["issue_date"], "2024-12-01");
        assert_eq!(value["due_date"], "2025-01-01");
        // Decimal must reach the wire as a string, not a binary float
        assert_eq!(value["fine"], "12.50");
    }

    #[test]
    fn missing_due_date_is_a_validation_error() {
        let request = IssueLoan {
            book_id: Some("B1".to_string()),
            member_id: Some("U1".to_string()),
            due_date: None,
        };
        let err = request.into_new().expect_err("due_date is missing");
        assert!(matches!(err, AppError::Validation(_)));
    }
}
