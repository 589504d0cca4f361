use crate::{
    abstract_trait::{
        DynOrderLineCommandRepository, DynOrderLineQueryRepository, DynOrderQueryRepository,
        DynProductQueryRepository, OrderLineServiceTrait,
    },
    service::access,
};
use async_trait::async_trait;
use shared::{
    domain::{
        Actor,
        requests::{CreateOrderLineRequest, UpdateOrderLineRequest},
        responses::{ApiResponse, OrderLineResponse},
    },
    errors::ServiceError,
    model::{OrderLineWithOrder, OrderLineWithProduct, OrderStatus},
};
use tracing::info;

#[derive(Clone)]
pub struct OrderLineService {
    line_query: DynOrderLineQueryRepository,
    line_command: DynOrderLineCommandRepository,
    order_query: DynOrderQueryRepository,
    product_query: DynProductQueryRepository,
}

impl OrderLineService {
    pub fn new(
        line_query: DynOrderLineQueryRepository,
        line_command: DynOrderLineCommandRepository,
        order_query: DynOrderQueryRepository,
        product_query: DynProductQueryRepository,
    ) -> Self {
        Self {
            line_query,
            line_command,
            order_query,
            product_query,
        }
    }

    /// Load a line with its parent order and run the shared ownership and
    /// mutability gates.
    async fn load_mutable_line(
        &self,
        actor: Actor,
        line_id: i32,
        not_pending_msg: &str,
    ) -> Result<OrderLineWithOrder, ServiceError> {
        let line = self
            .line_query
            .find_by_id(line_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order line not found".into()))?;

        access::ensure_owner_or_admin(
            actor,
            line.order_user_id,
            "Unauthorized - You can only modify your own orders",
        )?;

        if line.order_status != OrderStatus::Pending.as_str() {
            return Err(ServiceError::BadRequest(not_pending_msg.into()));
        }

        Ok(line)
    }
}

#[async_trait]
impl OrderLineServiceTrait for OrderLineService {
    async fn add_line(
        &self,
        actor: Actor,
        order_id: i32,
        req: &CreateOrderLineRequest,
    ) -> Result<ApiResponse<OrderLineResponse>, ServiceError> {
        let order = self
            .order_query
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order not found".into()))?;

        access::ensure_owner_or_admin(
            actor,
            order.user_id,
            "Unauthorized - You can only modify your own orders",
        )?;

        if order.status != OrderStatus::Pending.as_str() {
            return Err(ServiceError::BadRequest(
                "Can only add lines to pending orders".into(),
            ));
        }

        let product = self
            .product_query
            .find_by_id(req.product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product not found".into()))?;

        // snapshot the current catalog price into the line
        let line = self
            .line_command
            .create(order_id, req.product_id, req.quantity, product.price)
            .await?;

        info!("✅ Line {} added to order {order_id}", line.id);

        let response = OrderLineResponse::from(OrderLineWithProduct {
            id: line.id,
            order_id: line.order_id,
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price: line.unit_price,
            product_name: product.name,
        });

        Ok(ApiResponse::success("Order line added successfully", response))
    }

    async fn update_line(
        &self,
        actor: Actor,
        line_id: i32,
        req: &UpdateOrderLineRequest,
    ) -> Result<ApiResponse<OrderLineResponse>, ServiceError> {
        let line = self
            .load_mutable_line(actor, line_id, "Can only modify lines in pending orders")
            .await?;

        let updated = self.line_command.update_quantity(line_id, req.quantity).await?;

        let response = OrderLineResponse::from(OrderLineWithProduct {
            id: updated.id,
            order_id: updated.order_id,
            product_id: updated.product_id,
            quantity: updated.quantity,
            // the snapshot never moves on update
            unit_price: updated.unit_price,
            product_name: line.product_name,
        });

        Ok(ApiResponse::success(
            "Order line updated successfully",
            response,
        ))
    }

    async fn delete_line(&self, actor: Actor, line_id: i32) -> Result<(), ServiceError> {
        self.load_mutable_line(actor, line_id, "Can only delete lines from pending orders")
            .await?;

        self.line_command.delete(line_id).await?;

        info!("🗑️ Line {line_id} deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::order::repository::MockOrderQueryRepositoryTrait;
    use crate::abstract_trait::order_line::{
        MockOrderLineCommandRepositoryTrait, MockOrderLineQueryRepositoryTrait,
    };
    use crate::abstract_trait::product::MockProductQueryRepositoryTrait;
    use chrono::{Duration, Utc};
    use mockall::predicate::eq;
    use rust_decimal::Decimal;
    use shared::domain::Role;
    use shared::model::{Order, OrderLine, Product};
    use std::sync::Arc;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    struct Mocks {
        line_query: MockOrderLineQueryRepositoryTrait,
        line_command: MockOrderLineCommandRepositoryTrait,
        order_query: MockOrderQueryRepositoryTrait,
        product_query: MockProductQueryRepositoryTrait,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                line_query: MockOrderLineQueryRepositoryTrait::new(),
                line_command: MockOrderLineCommandRepositoryTrait::new(),
                order_query: MockOrderQueryRepositoryTrait::new(),
                product_query: MockProductQueryRepositoryTrait::new(),
            }
        }

        fn build(self) -> OrderLineService {
            OrderLineService::new(
                Arc::new(self.line_query),
                Arc::new(self.line_command),
                Arc::new(self.order_query),
                Arc::new(self.product_query),
            )
        }
    }

    fn order(id: i32, user_id: i32, status: &str) -> Order {
        Order {
            id,
            status: status.into(),
            visit_date: Utc::now() + Duration::days(10),
            order_date: Utc::now(),
            vat: dec("5.5"),
            payment_method: None,
            ticket_code: format!("ZMB-2026-1000-{id}"),
            qr_code: format!("qr-{id}"),
            user_id,
        }
    }

    fn line_with_order(line_id: i32, owner: i32, status: &str) -> OrderLineWithOrder {
        OrderLineWithOrder {
            id: line_id,
            order_id: 1,
            product_id: 1,
            quantity: 2,
            unit_price: dec("20.00"),
            product_name: "Day pass".into(),
            order_user_id: owner,
            order_status: status.into(),
        }
    }

    #[tokio::test]
    async fn add_line_snapshots_current_price() {
        let mut mocks = Mocks::new();

        mocks
            .order_query
            .expect_find_by_id()
            .returning(|_| Ok(Some(order(1, 7, "pending"))));

        mocks.product_query.expect_find_by_id().returning(|id| {
            Ok(Some(Product {
                id,
                name: "Night pass".into(),
                price: dec("35.50"),
                status: "published".into(),
            }))
        });

        mocks
            .line_command
            .expect_create()
            .with(eq(1), eq(3), eq(1), eq(dec("35.50")))
            .returning(|order_id, product_id, quantity, unit_price| {
                Ok(OrderLine {
                    id: 10,
                    order_id,
                    product_id,
                    quantity,
                    unit_price,
                })
            });

        let svc = mocks.build();

        let resp = svc
            .add_line(
                Actor::new(7, Role::Member),
                1,
                &CreateOrderLineRequest {
                    product_id: 3,
                    quantity: 1,
                },
            )
            .await
            .unwrap();

        assert_eq!(resp.data.product_name, "Night pass");
        assert_eq!(resp.data.unit_price, dec("35.50"));
        assert_eq!(resp.data.line_total, dec("35.50"));
    }

    #[tokio::test]
    async fn add_line_to_missing_order_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.order_query.expect_find_by_id().returning(|_| Ok(None));

        let svc = mocks.build();

        let err = svc
            .add_line(
                Actor::new(7, Role::Member),
                99,
                &CreateOrderLineRequest {
                    product_id: 1,
                    quantity: 1,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(msg) if msg == "Order not found"));
    }

    #[tokio::test]
    async fn non_owner_cannot_add_line() {
        let mut mocks = Mocks::new();
        mocks
            .order_query
            .expect_find_by_id()
            .returning(|_| Ok(Some(order(1, 8, "pending"))));

        let svc = mocks.build();

        let err = svc
            .add_line(
                Actor::new(7, Role::Member),
                1,
                &CreateOrderLineRequest {
                    product_id: 1,
                    quantity: 1,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn add_line_rejected_when_order_not_pending() {
        let mut mocks = Mocks::new();
        mocks
            .order_query
            .expect_find_by_id()
            .returning(|_| Ok(Some(order(1, 7, "confirmed"))));

        let svc = mocks.build();

        let err = svc
            .add_line(
                Actor::new(7, Role::Member),
                1,
                &CreateOrderLineRequest {
                    product_id: 1,
                    quantity: 1,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::BadRequest(msg) if msg == "Can only add lines to pending orders"
        ));
    }

    #[tokio::test]
    async fn update_changes_quantity_but_not_price() {
        let mut mocks = Mocks::new();

        mocks
            .line_query
            .expect_find_by_id()
            .returning(|_| Ok(Some(line_with_order(10, 7, "pending"))));

        mocks
            .line_command
            .expect_update_quantity()
            .with(eq(10), eq(5))
            .returning(|line_id, quantity| {
                Ok(OrderLine {
                    id: line_id,
                    order_id: 1,
                    product_id: 1,
                    quantity,
                    unit_price: "20.00".parse().unwrap(),
                })
            });

        let svc = mocks.build();

        let resp = svc
            .update_line(
                Actor::new(7, Role::Member),
                10,
                &UpdateOrderLineRequest { quantity: 5 },
            )
            .await
            .unwrap();

        assert_eq!(resp.data.quantity, 5);
        assert_eq!(resp.data.unit_price, dec("20.00"));
        assert_eq!(resp.data.line_total, dec("100.00"));
    }

    #[tokio::test]
    async fn update_rejected_when_order_left_pending() {
        let mut mocks = Mocks::new();

        mocks
            .line_query
            .expect_find_by_id()
            .returning(|_| Ok(Some(line_with_order(10, 7, "confirmed"))));

        let svc = mocks.build();

        let err = svc
            .update_line(
                Actor::new(7, Role::Member),
                10,
                &UpdateOrderLineRequest { quantity: 5 },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::BadRequest(msg) if msg == "Can only modify lines in pending orders"
        ));
    }

    #[tokio::test]
    async fn delete_rejected_when_order_left_pending() {
        let mut mocks = Mocks::new();

        mocks
            .line_query
            .expect_find_by_id()
            .returning(|_| Ok(Some(line_with_order(10, 7, "canceled"))));

        let svc = mocks.build();

        let err = svc
            .delete_line(Actor::new(7, Role::Member), 10)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::BadRequest(msg) if msg == "Can only delete lines from pending orders"
        ));
    }

    #[tokio::test]
    async fn admin_can_delete_line_on_any_pending_order() {
        let mut mocks = Mocks::new();

        mocks
            .line_query
            .expect_find_by_id()
            .returning(|_| Ok(Some(line_with_order(10, 7, "pending"))));

        mocks
            .line_command
            .expect_delete()
            .with(eq(10))
            .returning(|_| Ok(()));

        let svc = mocks.build();

        svc.delete_line(Actor::new(1, Role::Admin), 10).await.unwrap();
    }

    #[tokio::test]
    async fn missing_line_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.line_query.expect_find_by_id().returning(|_| Ok(None));

        let svc = mocks.build();

        let err = svc
            .delete_line(Actor::new(1, Role::Admin), 10)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(msg) if msg == "Order line not found"));
    }
}
