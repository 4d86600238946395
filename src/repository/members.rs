//! Members repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::member::{Member, NewMember},
};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Postgres>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all members ordered by name; passwords stay in the store
    pub async fn list(&self) -> AppResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(
            "SELECT id, name, contact FROM members ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Insert a new member
    pub async fn create(&self, member: &NewMember) -> AppResult<Member> {
        sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (id, name, password, contact)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, contact
            "#,
        )
        .bind(&member.id)
        .bind(&member.name)
        .bind(&member.password)
        .bind(&member.contact)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Member id {} already exists", member.id))
            }
            _ => AppError::from(e),
        })
    }
}
