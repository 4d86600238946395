//! Business logic services

pub mod catalog;
pub mod circulation;
pub mod membership;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub membership: membership::MembershipService,
    pub circulation: circulation::CirculationService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            membership: membership::MembershipService::new(repository.clone()),
            circulation: circulation::CirculationService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the store is reachable
    pub async fn ping_store(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
