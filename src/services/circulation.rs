//! Circulation service: loan issuance and return
//!
//! Issue and return each mutate a book's copy count together with a loan
//! row, so each runs in a single transaction and reads its target row
//! under FOR UPDATE before mutating. Concurrent issuance of the last copy
//! of a book serializes on that lock: the second transaction blocks until
//! the first commits, then observes copies = 0 and fails. Dropping the
//! transaction without committing rolls back every step.

use chrono::NaiveDate;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::loan::{ActiveLoan, IssueLoan, LoanStatus},
    repository::Repository,
};

#[derive(Clone)]
pub struct CirculationService {
    repository: Repository,
}

impl CirculationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List active loans with joined book and member names
    pub async fn list_active(&self) -> AppResult<Vec<ActiveLoan>> {
        self.repository.loans.list_active().await
    }

    /// Issue a book to a member
    ///
    /// Decrements the book's copy count and creates the loan row, or does
    /// neither.
    pub async fn issue(&self, request: IssueLoan) -> AppResult<(i32, NaiveDate)> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let loan = request.into_new()?;

        let mut tx = self.repository.pool.begin().await?;

        let copies = self
            .repository
            .books
            .lock_copies(&mut tx, &loan.book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", loan.book_id)))?;

        if copies <= 0 {
            return Err(AppError::Unavailable(format!(
                "No available copies of book {} to issue",
                loan.book_id
            )));
        }

        self.repository
            .books
            .adjust_copies(&mut tx, &loan.book_id, -1)
            .await?;

        let loan_id = self
            .repository
            .loans
            .insert_issued(&mut tx, &loan.book_id, &loan.member_id, loan.due_date)
            .await?;

        tx.commit().await?;

        Ok((loan_id, loan.due_date))
    }

    /// Return a loan, transitioning it Issued -> Returned exactly once
    ///
    /// Marks the loan returned and increments the book's copy count, or
    /// does neither.
    pub async fn return_loan(&self, loan_id: i32) -> AppResult<()> {
        let mut tx = self.repository.pool.begin().await?;

        let loan = self
            .repository
            .loans
            .lock_loan(&mut tx, loan_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", loan_id)))?;

        if loan.status == LoanStatus::Returned {
            return Err(AppError::AlreadyReturned(format!(
                "Loan {} has already been returned",
                loan_id
            )));
        }

        self.repository.loans.mark_returned(&mut tx, loan_id).await?;
        self.repository
            .books
            .adjust_copies(&mut tx, &loan.book_id, 1)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
