//! Membership service: the member directory

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member},
    repository::Repository,
};

#[derive(Clone)]
pub struct MembershipService {
    repository: Repository,
}

impl MembershipService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all members ordered by name
    pub async fn list_members(&self) -> AppResult<Vec<Member>> {
        self.repository.members.list().await
    }

    /// Register a new member
    pub async fn create_member(&self, request: CreateMember) -> AppResult<Member> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let member = request.into_new()?;

        self.repository.members.create(&member).await
    }
}
