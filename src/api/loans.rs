//! Loan circulation endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::loan::{ActiveLoan, IssueLoan},
};

/// Issue response
#[derive(Serialize, ToSchema)]
pub struct IssueResponse {
    /// Loan ID assigned by the store
    pub id: i32,
    /// Due date (ISO 8601 date)
    pub due_date: NaiveDate,
    /// Status message
    pub message: String,
}

/// Return response
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Return status
    pub status: String,
    /// Loan ID
    pub loan_id: i32,
}

/// List active loans
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    responses(
        (status = 200, description = "Active loans with book and member names", body = Vec<ActiveLoan>),
        (status = 500, description = "Database error")
    )
)]
pub async fn list_loans(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<ActiveLoan>>> {
    let loans = state.services.circulation.list_active().await?;
    Ok(Json(loans))
}

/// Issue a book to a member
#[utoipa::path(
    post,
    path = "/issue",
    tag = "loans",
    request_body = IssueLoan,
    responses(
        (status = 201, description = "Book issued", body = IssueResponse),
        (status = 400, description = "Missing fields, no copies available, or unknown member"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn issue_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<IssueLoan>,
) -> AppResult<(StatusCode, Json<IssueResponse>)> {
    let (loan_id, due_date) = state.services.circulation.issue(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(IssueResponse {
            id: loan_id,
            due_date,
            message: "Book issued successfully".to_string(),
        }),
    ))
}

/// Return a borrowed book
#[utoipa::path(
    put,
    path = "/return/{loan_id}",
    tag = "loans",
    params(
        ("loan_id" = i32, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (status = 400, description = "Loan already returned"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    Path(loan_id): Path<i32>,
) -> AppResult<Json<ReturnResponse>> {
    state.services.circulation.return_loan(loan_id).await?;

    Ok(Json(ReturnResponse {
        status: "returned".to_string(),
        loan_id,
    }))
}
