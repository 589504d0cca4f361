use async_trait::async_trait;
use shared::{
    domain::requests::{CreateOrderRecord, NewOrderLine},
    errors::RepositoryError,
    model::Order,
};
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Insert the order and all its lines in one transaction. A failed line
    /// insert must roll the order back.
    async fn create_order_with_lines(
        &self,
        order: &CreateOrderRecord,
        lines: &[NewOrderLine],
    ) -> Result<Order, RepositoryError>;

    /// Compare-and-set status change. Returns `None` when the row was not in
    /// `from` anymore, so exactly one concurrent transition can win.
    async fn transition_status(
        &self,
        order_id: i32,
        from: &str,
        to: &str,
    ) -> Result<Option<Order>, RepositoryError>;

    /// Webhook-driven confirmation: flips `pending` to `confirmed` and
    /// records the payment method label in the same statement.
    async fn confirm_payment(
        &self,
        order_id: i32,
        payment_method: Option<String>,
    ) -> Result<Option<Order>, RepositoryError>;
}
