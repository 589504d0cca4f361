use async_trait::async_trait;
use shared::{
    domain::{
        Actor,
        requests::{FindAllOrders, FindUserOrders},
        responses::{ApiResponse, ApiResponsePagination, OrderResponse},
    },
    errors::ServiceError,
};
use std::sync::Arc;

pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn find_all(
        &self,
        actor: Actor,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError>;

    async fn find_by_user(
        &self,
        actor: Actor,
        user_id: i32,
        req: &FindUserOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError>;

    async fn find_by_id(
        &self,
        actor: Actor,
        order_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
