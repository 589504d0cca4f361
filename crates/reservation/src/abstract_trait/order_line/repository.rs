use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::{
    errors::RepositoryError,
    model::{OrderLine, OrderLineWithOrder, OrderLineWithProduct},
};
use std::sync::Arc;

pub type DynOrderLineQueryRepository = Arc<dyn OrderLineQueryRepositoryTrait + Send + Sync>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderLineQueryRepositoryTrait {
    async fn find_by_order(
        &self,
        order_id: i32,
    ) -> Result<Vec<OrderLineWithProduct>, RepositoryError>;

    /// Batched variant for the listing endpoints, one round-trip for a page
    /// of orders.
    async fn find_by_orders(
        &self,
        order_ids: &[i32],
    ) -> Result<Vec<OrderLineWithProduct>, RepositoryError>;

    async fn find_by_id(&self, line_id: i32)
    -> Result<Option<OrderLineWithOrder>, RepositoryError>;
}

pub type DynOrderLineCommandRepository = Arc<dyn OrderLineCommandRepositoryTrait + Send + Sync>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderLineCommandRepositoryTrait {
    async fn create(
        &self,
        order_id: i32,
        product_id: i32,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<OrderLine, RepositoryError>;

    /// Quantity is the only mutable column; the price snapshot never moves.
    async fn update_quantity(
        &self,
        line_id: i32,
        quantity: i32,
    ) -> Result<OrderLine, RepositoryError>;

    async fn delete(&self, line_id: i32) -> Result<(), RepositoryError>;
}
