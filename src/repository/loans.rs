//! Loans repository for database operations
//!
//! Loan rows live in the issue_return table. The transactional pieces of
//! issue and return take the open transaction as an argument; the
//! circulation service owns the transaction boundaries.

use chrono::NaiveDate;
use sqlx::{Pool, Postgres, Row, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::loan::{ActiveLoan, LoanStatus},
};

/// Loan fields read under the row lock during return
#[derive(Debug)]
pub struct LockedLoan {
    pub book_id: String,
    pub status: LoanStatus,
}

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Active loans joined with book and member names, due date ascending
    pub async fn list_active(&self) -> AppResult<Vec<ActiveLoan>> {
        let loans = sqlx::query_as::<_, ActiveLoan>(
            r#"
            SELECT ir.id, ir.book_id, b.name AS book_name,
                   ir.member_id, m.name AS member_name,
                   ir.issue_date, ir.due_date, ir.fine
            FROM issue_return ir
            JOIN books b ON ir.book_id = b.id
            JOIN members m ON ir.member_id = m.id
            WHERE ir.status = 'Issued'
            ORDER BY ir.due_date
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    /// Insert a loan in state Issued inside an open transaction
    ///
    /// The issue date and status take their store defaults. An unknown
    /// member surfaces as a foreign-key violation, reported as Validation.
    pub async fn insert_issued(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book_id: &str,
        member_id: &str,
        due_date: NaiveDate,
    ) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO issue_return (book_id, member_id, due_date)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(book_id)
        .bind(member_id)
        .bind(due_date)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::Validation("Invalid book id or member id".to_string())
            }
            _ => AppError::from(e),
        })
    }

    /// Read a loan's book reference and status, taking an exclusive lock
    /// on the row for the duration of the transaction.
    pub async fn lock_loan(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        loan_id: i32,
    ) -> AppResult<Option<LockedLoan>> {
        let row = sqlx::query(
            "SELECT book_id, status FROM issue_return WHERE id = $1 FOR UPDATE",
        )
        .bind(loan_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.map(|r| LockedLoan {
            book_id: r.get("book_id"),
            status: r.get("status"),
        }))
    }

    /// Mark a loan returned as of today inside an open transaction
    pub async fn mark_returned(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        loan_id: i32,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE issue_return
            SET status = 'Returned', return_date = CURRENT_DATE
            WHERE id = $1
            "#,
        )
        .bind(loan_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
