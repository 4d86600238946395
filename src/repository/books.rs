//! Books repository for database operations

use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, NewBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all books ordered by name
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, category, name, author, copies FROM books ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Insert a new book
    pub async fn create(&self, book: &NewBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, category, name, author, copies)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, category, name, author, copies
            "#,
        )
        .bind(&book.id)
        .bind(&book.category)
        .bind(&book.name)
        .bind(&book.author)
        .bind(book.copies)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Book id {} already exists", book.id))
            }
            _ => AppError::from(e),
        })
    }

    /// Read a book's copy count, taking an exclusive lock on the row for
    /// the duration of the transaction.
    ///
    /// Concurrent issuers of the same book block here until the holder
    /// commits or rolls back.
    pub async fn lock_copies(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book_id: &str,
    ) -> AppResult<Option<i32>> {
        let copies = sqlx::query_scalar::<_, i32>(
            "SELECT copies FROM books WHERE id = $1 FOR UPDATE",
        )
        .bind(book_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(copies)
    }

    /// Adjust a book's copy count inside an open transaction
    pub async fn adjust_copies(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book_id: &str,
        delta: i32,
    ) -> AppResult<()> {
        sqlx::query("UPDATE books SET copies = copies + $2 WHERE id = $1")
            .bind(book_id)
            .bind(delta)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}
