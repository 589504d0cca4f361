use async_trait::async_trait;
use shared::{errors::RepositoryError, model::Product};
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

/// Products are owned by the catalog; this core only reads them to snapshot
/// prices.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError>;

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, RepositoryError>;
}
