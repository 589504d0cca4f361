use crate::{
    abstract_trait::{
        DynOrderCommandRepository, DynOrderLineQueryRepository, DynOrderQueryRepository,
        DynProductQueryRepository, DynUserQueryRepository, OrderCommandServiceTrait,
    },
    service::access,
};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use shared::{
    domain::{
        Actor,
        requests::{CreateOrderRecord, CreateOrderRequest, NewOrderLine, UpdateOrderStatusRequest},
        responses::{ApiResponse, OrderLineResponse, OrderResponse, UserSummary},
    },
    errors::{RepositoryError, ServiceError},
    model::{Order, OrderStatus},
    utils::{generate_qr_token, generate_ticket_code},
};
use std::collections::HashMap;
use tracing::{info, warn};

/// Ticket codes are only collision-resistant; the unique index is the real
/// guard, so a clashing insert gets a fresh code and another try.
const MAX_CODE_ATTEMPTS: u32 = 3;

#[derive(Clone)]
pub struct OrderCommandService {
    command: DynOrderCommandRepository,
    query: DynOrderQueryRepository,
    line_query: DynOrderLineQueryRepository,
    product_query: DynProductQueryRepository,
    user_query: DynUserQueryRepository,
    vat_default: Decimal,
}

pub struct OrderCommandServiceDeps {
    pub command: DynOrderCommandRepository,
    pub query: DynOrderQueryRepository,
    pub line_query: DynOrderLineQueryRepository,
    pub product_query: DynProductQueryRepository,
    pub user_query: DynUserQueryRepository,
    pub vat_default: Decimal,
}

impl OrderCommandService {
    pub fn new(deps: OrderCommandServiceDeps) -> Self {
        let OrderCommandServiceDeps {
            command,
            query,
            line_query,
            product_query,
            user_query,
            vat_default,
        } = deps;

        Self {
            command,
            query,
            line_query,
            product_query,
            user_query,
            vat_default,
        }
    }

    async fn snapshot_lines(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<Vec<NewOrderLine>, ServiceError> {
        let Some(items) = &req.order_lines else {
            return Ok(Vec::new());
        };

        let mut ids: Vec<i32> = items.iter().map(|item| item.product_id).collect();
        ids.sort_unstable();
        ids.dedup();

        // All-or-nothing: one missing product fails the whole order.
        let products = self.product_query.find_by_ids(&ids).await?;
        if products.len() != ids.len() {
            return Err(ServiceError::NotFound("One or more products not found".into()));
        }

        let prices: HashMap<i32, Decimal> = products.iter().map(|p| (p.id, p.price)).collect();

        Ok(items
            .iter()
            .map(|item| NewOrderLine {
                product_id: item.product_id,
                quantity: item.quantity,
                // snapshot: the live price is copied once and never re-read
                unit_price: prices[&item.product_id],
            })
            .collect())
    }

    async fn insert_with_fresh_codes(
        &self,
        req: &CreateOrderRequest,
        vat: Decimal,
        user_id: i32,
        lines: &[NewOrderLine],
    ) -> Result<Order, ServiceError> {
        let mut attempt = 0;
        loop {
            let record = CreateOrderRecord {
                status: OrderStatus::Pending.to_string(),
                visit_date: req.visit_date,
                vat,
                payment_method: req.payment_method.clone(),
                ticket_code: generate_ticket_code(Utc::now())
                    .map_err(|e| ServiceError::Internal(e.to_string()))?,
                qr_code: generate_qr_token().map_err(|e| ServiceError::Internal(e.to_string()))?,
                user_id,
            };

            match self.command.create_order_with_lines(&record, lines).await {
                Ok(order) => return Ok(order),
                Err(RepositoryError::AlreadyExists(msg)) if attempt + 1 < MAX_CODE_ATTEMPTS => {
                    warn!("⚠️ Ticket/QR code collision ({msg}), regenerating");
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn assemble_response(
        &self,
        order: Order,
        user: Option<UserSummary>,
    ) -> Result<OrderResponse, ServiceError> {
        let lines: Vec<OrderLineResponse> = self
            .line_query
            .find_by_order(order.id)
            .await?
            .into_iter()
            .map(OrderLineResponse::from)
            .collect();

        Ok(OrderResponse::assemble(order, user, lines))
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(
        &self,
        actor: Actor,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🏗️ Creating order requested by user_id={}", actor.id);

        // A member always orders for themselves, whatever the body says.
        let target_user_id = if actor.is_admin() {
            req.user_id.unwrap_or(actor.id)
        } else {
            actor.id
        };

        if req.visit_date <= Utc::now() {
            return Err(ServiceError::BadRequest(
                "Visit date must be in the future".into(),
            ));
        }

        let vat = req.vat.unwrap_or(self.vat_default);
        if vat < Decimal::ZERO || vat > Decimal::ONE_HUNDRED {
            return Err(ServiceError::BadRequest(
                "VAT must be between 0 and 100".into(),
            ));
        }

        let user = self
            .user_query
            .find_by_id(target_user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;

        let lines = self.snapshot_lines(req).await?;

        let order = self
            .insert_with_fresh_codes(req, vat, target_user_id, &lines)
            .await?;

        let response = self
            .assemble_response(order, Some(UserSummary::from(user)))
            .await?;

        Ok(ApiResponse::success("Order created successfully", response))
    }

    async fn update_status(
        &self,
        actor: Actor,
        order_id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let target = super::parse_status(&req.status)?;

        let order = self
            .query
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order not found".into()))?;

        access::ensure_owner_or_admin(
            actor,
            order.user_id,
            "Unauthorized - You can only modify your own orders",
        )?;

        let current = super::parse_status(&order.status)
            .map_err(|_| ServiceError::Internal(format!("Corrupt order status: {}", order.status)))?;

        // Table closure applies to every caller, admins included.
        if !current.can_transition_to(target) {
            return Err(ServiceError::BadRequest(format!(
                "Cannot transition from {current} to {target}"
            )));
        }

        // Members only get the one escape hatch: canceling their own pending
        // order. Everything else is an admin move.
        if !actor.is_admin() && !(current == OrderStatus::Pending && target == OrderStatus::Canceled)
        {
            return Err(ServiceError::Unauthorized(
                "Unauthorized - Members may only cancel their own pending orders".into(),
            ));
        }

        let updated = self
            .command
            .transition_status(order_id, current.as_str(), target.as_str())
            .await?;

        let order = match updated {
            Some(order) => order,
            None => {
                // Lost a race: report against whatever the row says now.
                let now_status = self
                    .query
                    .find_by_id(order_id)
                    .await?
                    .map(|o| o.status)
                    .unwrap_or_else(|| "unknown".into());
                return Err(ServiceError::BadRequest(format!(
                    "Cannot transition from {now_status} to {target}"
                )));
            }
        };

        info!("🔄 Order {order_id} status updated to {target}");

        let response = self.assemble_response(order, None).await?;

        Ok(ApiResponse::success(
            "Order status updated successfully",
            response,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::order::repository::{
        MockOrderCommandRepositoryTrait, MockOrderQueryRepositoryTrait,
    };
    use crate::abstract_trait::order_line::MockOrderLineQueryRepositoryTrait;
    use crate::abstract_trait::product::MockProductQueryRepositoryTrait;
    use crate::abstract_trait::user::MockUserQueryRepositoryTrait;
    use chrono::{DateTime, Duration, Utc};
    use mockall::predicate::eq;
    use shared::domain::Role;
    use shared::domain::requests::CreateOrderLineItem;
    use shared::model::{OrderLineWithProduct, Product, User};
    use std::sync::Arc;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    struct Mocks {
        command: MockOrderCommandRepositoryTrait,
        query: MockOrderQueryRepositoryTrait,
        line_query: MockOrderLineQueryRepositoryTrait,
        product_query: MockProductQueryRepositoryTrait,
        user_query: MockUserQueryRepositoryTrait,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                command: MockOrderCommandRepositoryTrait::new(),
                query: MockOrderQueryRepositoryTrait::new(),
                line_query: MockOrderLineQueryRepositoryTrait::new(),
                product_query: MockProductQueryRepositoryTrait::new(),
                user_query: MockUserQueryRepositoryTrait::new(),
            }
        }

        fn build(self) -> OrderCommandService {
            OrderCommandService::new(OrderCommandServiceDeps {
                command: Arc::new(self.command),
                query: Arc::new(self.query),
                line_query: Arc::new(self.line_query),
                product_query: Arc::new(self.product_query),
                user_query: Arc::new(self.user_query),
                vat_default: dec("5.5"),
            })
        }
    }

    fn sample_user(id: i32) -> User {
        User {
            id,
            firstname: "Ada".into(),
            lastname: "Lovelace".into(),
            email: "ada@example.com".into(),
            role: "member".into(),
        }
    }

    fn sample_product(id: i32, price: &str) -> Product {
        Product {
            id,
            name: "Day pass".into(),
            price: dec(price),
            status: "published".into(),
        }
    }

    fn persisted_order(id: i32, user_id: i32, status: &str, vat: &str) -> Order {
        Order {
            id,
            status: status.into(),
            visit_date: Utc::now() + Duration::days(10),
            order_date: Utc::now(),
            vat: dec(vat),
            payment_method: None,
            ticket_code: format!("ZMB-2026-1000-{id}"),
            qr_code: format!("qr-{id}"),
            user_id,
        }
    }

    fn persisted_line(order_id: i32, unit_price: &str, quantity: i32) -> OrderLineWithProduct {
        OrderLineWithProduct {
            id: 1,
            order_id,
            product_id: 1,
            quantity,
            unit_price: dec(unit_price),
            product_name: "Day pass".into(),
        }
    }

    fn create_request(visit_date: DateTime<Utc>) -> CreateOrderRequest {
        CreateOrderRequest {
            visit_date,
            vat: Some(dec("5.5")),
            payment_method: None,
            user_id: None,
            order_lines: Some(vec![CreateOrderLineItem {
                product_id: 1,
                quantity: 2,
            }]),
        }
    }

    #[tokio::test]
    async fn happy_path_snapshots_price_and_prices_response() {
        let mut mocks = Mocks::new();

        mocks
            .user_query
            .expect_find_by_id()
            .with(eq(7))
            .returning(|id| Ok(Some(sample_user(id))));

        mocks
            .product_query
            .expect_find_by_ids()
            .returning(|_| Ok(vec![sample_product(1, "20.00")]));

        mocks
            .command
            .expect_create_order_with_lines()
            .withf(|record, lines| {
                record.user_id == 7
                    && record.status == "pending"
                    && lines.len() == 1
                    && lines[0].unit_price == dec("20.00")
                    && lines[0].quantity == 2
            })
            .returning(|_, _| Ok(persisted_order(1, 7, "pending", "5.5")));

        mocks
            .line_query
            .expect_find_by_order()
            .returning(|_| Ok(vec![persisted_line(1, "20.00", 2)]));

        let svc = mocks.build();
        let actor = Actor::new(7, Role::Member);

        let resp = svc
            .create_order(actor, &create_request(Utc::now() + Duration::days(10)))
            .await
            .unwrap();

        let order = resp.data;
        assert_eq!(order.user_id, 7);
        assert_eq!(order.status, "pending");
        assert_eq!(order.subtotal, dec("40.00"));
        assert_eq!(order.vat_amount, dec("2.20"));
        assert_eq!(order.total, dec("42.20"));
    }

    #[tokio::test]
    async fn past_visit_date_rejected_before_any_write() {
        let svc = Mocks::new().build();
        let actor = Actor::new(7, Role::Member);

        let err = svc
            .create_order(actor, &create_request(Utc::now() - Duration::days(1)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::BadRequest(msg) if msg == "Visit date must be in the future"
        ));
    }

    #[tokio::test]
    async fn missing_product_fails_atomically() {
        let mut mocks = Mocks::new();

        mocks
            .user_query
            .expect_find_by_id()
            .returning(|id| Ok(Some(sample_user(id))));

        // Batch lookup comes back short: nothing may be written.
        mocks.product_query.expect_find_by_ids().returning(|_| Ok(vec![]));

        let svc = mocks.build();
        let actor = Actor::new(7, Role::Member);

        let err = svc
            .create_order(actor, &create_request(Utc::now() + Duration::days(10)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::NotFound(msg) if msg == "One or more products not found"
        ));
    }

    #[tokio::test]
    async fn member_cannot_order_for_someone_else() {
        let mut mocks = Mocks::new();

        // The forced target is the actor, so the lookup must be for id 7.
        mocks
            .user_query
            .expect_find_by_id()
            .with(eq(7))
            .returning(|id| Ok(Some(sample_user(id))));

        mocks
            .product_query
            .expect_find_by_ids()
            .returning(|_| Ok(vec![sample_product(1, "20.00")]));

        mocks
            .command
            .expect_create_order_with_lines()
            .withf(|record, _| record.user_id == 7)
            .returning(|_, _| Ok(persisted_order(1, 7, "pending", "5.5")));

        mocks
            .line_query
            .expect_find_by_order()
            .returning(|_| Ok(vec![persisted_line(1, "20.00", 2)]));

        let svc = mocks.build();
        let actor = Actor::new(7, Role::Member);

        let mut req = create_request(Utc::now() + Duration::days(10));
        req.user_id = Some(42);

        let resp = svc.create_order(actor, &req).await.unwrap();
        assert_eq!(resp.data.user_id, 7);
    }

    #[tokio::test]
    async fn admin_can_order_for_target_user() {
        let mut mocks = Mocks::new();

        mocks
            .user_query
            .expect_find_by_id()
            .with(eq(42))
            .returning(|id| Ok(Some(sample_user(id))));

        mocks
            .product_query
            .expect_find_by_ids()
            .returning(|_| Ok(vec![sample_product(1, "20.00")]));

        mocks
            .command
            .expect_create_order_with_lines()
            .withf(|record, _| record.user_id == 42)
            .returning(|_, _| Ok(persisted_order(1, 42, "pending", "5.5")));

        mocks
            .line_query
            .expect_find_by_order()
            .returning(|_| Ok(vec![persisted_line(1, "20.00", 2)]));

        let svc = mocks.build();
        let actor = Actor::new(1, Role::Admin);

        let mut req = create_request(Utc::now() + Duration::days(10));
        req.user_id = Some(42);

        let resp = svc.create_order(actor, &req).await.unwrap();
        assert_eq!(resp.data.user_id, 42);
    }

    #[tokio::test]
    async fn omitted_vat_falls_back_to_the_configured_default() {
        let mut mocks = Mocks::new();

        mocks
            .user_query
            .expect_find_by_id()
            .returning(|id| Ok(Some(sample_user(id))));

        mocks
            .product_query
            .expect_find_by_ids()
            .returning(|_| Ok(vec![sample_product(1, "20.00")]));

        mocks
            .command
            .expect_create_order_with_lines()
            .withf(|record, _| record.vat == dec("5.5"))
            .returning(|_, _| Ok(persisted_order(1, 7, "pending", "5.5")));

        mocks
            .line_query
            .expect_find_by_order()
            .returning(|_| Ok(vec![persisted_line(1, "20.00", 2)]));

        let svc = mocks.build();
        let actor = Actor::new(7, Role::Member);

        let mut req = create_request(Utc::now() + Duration::days(10));
        req.vat = None;

        svc.create_order(actor, &req).await.unwrap();
    }

    #[tokio::test]
    async fn out_of_range_vat_is_rejected() {
        let svc = Mocks::new().build();
        let actor = Actor::new(7, Role::Member);

        let mut req = create_request(Utc::now() + Duration::days(10));
        req.vat = Some(dec("120"));

        let err = svc.create_order(actor, &req).await.unwrap_err();

        assert!(matches!(
            err,
            ServiceError::BadRequest(msg) if msg == "VAT must be between 0 and 100"
        ));
    }

    #[tokio::test]
    async fn ticket_code_collision_is_retried() {
        let mut mocks = Mocks::new();

        mocks
            .user_query
            .expect_find_by_id()
            .returning(|id| Ok(Some(sample_user(id))));

        mocks
            .product_query
            .expect_find_by_ids()
            .returning(|_| Ok(vec![sample_product(1, "20.00")]));

        let mut call = 0;
        mocks
            .command
            .expect_create_order_with_lines()
            .times(2)
            .returning(move |_, _| {
                call += 1;
                if call == 1 {
                    Err(RepositoryError::AlreadyExists("ticket_code".into()))
                } else {
                    Ok(persisted_order(1, 7, "pending", "5.5"))
                }
            });

        mocks
            .line_query
            .expect_find_by_order()
            .returning(|_| Ok(vec![persisted_line(1, "20.00", 2)]));

        let svc = mocks.build();
        let actor = Actor::new(7, Role::Member);

        let resp = svc
            .create_order(actor, &create_request(Utc::now() + Duration::days(10)))
            .await
            .unwrap();

        assert_eq!(resp.data.id, 1);
    }

    #[tokio::test]
    async fn illegal_transition_rejected_even_for_admin() {
        let mut mocks = Mocks::new();

        mocks
            .query
            .expect_find_by_id()
            .returning(|_| Ok(Some(persisted_order(1, 7, "canceled", "5.5"))));

        let svc = mocks.build();
        let actor = Actor::new(1, Role::Admin);

        let err = svc
            .update_status(
                actor,
                1,
                &UpdateOrderStatusRequest {
                    status: "confirmed".into(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::BadRequest(msg) if msg == "Cannot transition from canceled to confirmed"
        ));
    }

    #[tokio::test]
    async fn member_cancels_own_pending_order() {
        let mut mocks = Mocks::new();

        mocks
            .query
            .expect_find_by_id()
            .returning(|_| Ok(Some(persisted_order(1, 7, "pending", "5.5"))));

        mocks
            .command
            .expect_transition_status()
            .withf(|id, from, to| *id == 1 && from == "pending" && to == "canceled")
            .returning(|_, _, _| Ok(Some(persisted_order(1, 7, "canceled", "5.5"))));

        mocks.line_query.expect_find_by_order().returning(|_| Ok(vec![]));

        let svc = mocks.build();
        let actor = Actor::new(7, Role::Member);

        let resp = svc
            .update_status(
                actor,
                1,
                &UpdateOrderStatusRequest {
                    status: "canceled".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(resp.data.status, "canceled");
    }

    #[tokio::test]
    async fn member_cannot_confirm_even_their_own_order() {
        let mut mocks = Mocks::new();

        mocks
            .query
            .expect_find_by_id()
            .returning(|_| Ok(Some(persisted_order(1, 7, "pending", "5.5"))));

        let svc = mocks.build();
        let actor = Actor::new(7, Role::Member);

        let err = svc
            .update_status(
                actor,
                1,
                &UpdateOrderStatusRequest {
                    status: "confirmed".into(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn member_cannot_cancel_foreign_order() {
        let mut mocks = Mocks::new();

        mocks
            .query
            .expect_find_by_id()
            .returning(|_| Ok(Some(persisted_order(1, 8, "pending", "5.5"))));

        let svc = mocks.build();
        let actor = Actor::new(7, Role::Member);

        let err = svc
            .update_status(
                actor,
                1,
                &UpdateOrderStatusRequest {
                    status: "canceled".into(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn losing_a_status_race_reports_current_state() {
        let mut mocks = Mocks::new();

        let mut read = 0;
        mocks.query.expect_find_by_id().returning(move |_| {
            read += 1;
            if read == 1 {
                Ok(Some(persisted_order(1, 7, "pending", "5.5")))
            } else {
                // someone confirmed it in between
                Ok(Some(persisted_order(1, 7, "confirmed", "5.5")))
            }
        });

        mocks
            .command
            .expect_transition_status()
            .returning(|_, _, _| Ok(None));

        let svc = mocks.build();
        let actor = Actor::new(1, Role::Admin);

        let err = svc
            .update_status(
                actor,
                1,
                &UpdateOrderStatusRequest {
                    status: "canceled".into(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::BadRequest(msg) if msg == "Cannot transition from confirmed to canceled"
        ));
    }

    #[tokio::test]
    async fn unknown_status_string_is_a_bad_request() {
        let svc = Mocks::new().build();
        let actor = Actor::new(1, Role::Admin);

        let err = svc
            .update_status(
                actor,
                1,
                &UpdateOrderStatusRequest {
                    status: "shipped".into(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::BadRequest(msg) if msg == "Unknown order status: shipped"
        ));
    }
}
