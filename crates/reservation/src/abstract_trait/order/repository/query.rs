use async_trait::async_trait;
use shared::{
    domain::requests::{FindAllOrders, FindUserOrders},
    errors::RepositoryError,
    model::{Order, OrderWithUser},
};
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<(Vec<OrderWithUser>, i64), RepositoryError>;

    async fn find_by_user(
        &self,
        user_id: i32,
        req: &FindUserOrders,
    ) -> Result<(Vec<Order>, i64), RepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError>;
}
