use async_trait::async_trait;
use shared::{
    domain::{
        Actor,
        requests::{CreateOrderLineRequest, UpdateOrderLineRequest},
        responses::{ApiResponse, OrderLineResponse},
    },
    errors::ServiceError,
};
use std::sync::Arc;

pub type DynOrderLineService = Arc<dyn OrderLineServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderLineServiceTrait {
    async fn add_line(
        &self,
        actor: Actor,
        order_id: i32,
        req: &CreateOrderLineRequest,
    ) -> Result<ApiResponse<OrderLineResponse>, ServiceError>;

    async fn update_line(
        &self,
        actor: Actor,
        line_id: i32,
        req: &UpdateOrderLineRequest,
    ) -> Result<ApiResponse<OrderLineResponse>, ServiceError>;

    async fn delete_line(&self, actor: Actor, line_id: i32) -> Result<(), ServiceError>;
}
