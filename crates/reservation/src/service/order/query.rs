use crate::{
    abstract_trait::{
        DynOrderLineQueryRepository, DynOrderQueryRepository, DynUserQueryRepository,
        OrderQueryServiceTrait,
    },
    service::access,
};
use async_trait::async_trait;
use shared::{
    domain::{
        Actor,
        requests::{FindAllOrders, FindUserOrders},
        responses::{
            ApiResponse, ApiResponsePagination, OrderLineResponse, OrderResponse, Pagination,
            UserSummary,
        },
    },
    errors::ServiceError,
};
use std::collections::HashMap;
use tracing::info;

#[derive(Clone)]
pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    line_query: DynOrderLineQueryRepository,
    user_query: DynUserQueryRepository,
}

impl OrderQueryService {
    pub fn new(
        query: DynOrderQueryRepository,
        line_query: DynOrderLineQueryRepository,
        user_query: DynUserQueryRepository,
    ) -> Self {
        Self {
            query,
            line_query,
            user_query,
        }
    }

    async fn lines_grouped_by_order(
        &self,
        order_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<OrderLineResponse>>, ServiceError> {
        let lines = self.line_query.find_by_orders(order_ids).await?;

        let mut grouped: HashMap<i32, Vec<OrderLineResponse>> = HashMap::new();
        for line in lines {
            grouped
                .entry(line.order_id)
                .or_default()
                .push(OrderLineResponse::from(line));
        }

        Ok(grouped)
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_all(
        &self,
        actor: Actor,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        access::ensure_admin(actor)?;

        if let Some(status) = &req.status {
            super::parse_status(status)?;
        }

        info!("📦 Listing orders page={} limit={}", req.page(), req.limit());

        let (rows, total) = self.query.find_all(req).await?;

        let order_ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut grouped = self.lines_grouped_by_order(&order_ids).await?;

        let data = rows
            .into_iter()
            .map(|row| {
                let user = UserSummary {
                    id: row.user_id,
                    firstname: row.firstname.clone(),
                    lastname: row.lastname.clone(),
                    email: row.email.clone(),
                };
                let lines = grouped.remove(&row.id).unwrap_or_default();
                OrderResponse::assemble(row.into_order(), Some(user), lines)
            })
            .collect();

        let pagination = Pagination::new(req.page(), req.limit(), total);

        Ok(ApiResponsePagination::success(
            "Orders fetched successfully",
            data,
            pagination,
        ))
    }

    async fn find_by_user(
        &self,
        actor: Actor,
        user_id: i32,
        req: &FindUserOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        access::ensure_owner_or_admin(
            actor,
            user_id,
            "Unauthorized - You can only view your own orders",
        )?;

        if let Some(status) = &req.status {
            super::parse_status(status)?;
        }

        let (orders, total) = self.query.find_by_user(user_id, req).await?;

        let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
        let mut grouped = self.lines_grouped_by_order(&order_ids).await?;

        let data = orders
            .into_iter()
            .map(|order| {
                let lines = grouped.remove(&order.id).unwrap_or_default();
                OrderResponse::assemble(order, None, lines)
            })
            .collect();

        let pagination = Pagination::new(req.page(), req.limit(), total);

        Ok(ApiResponsePagination::success(
            "Orders fetched successfully",
            data,
            pagination,
        ))
    }

    async fn find_by_id(
        &self,
        actor: Actor,
        order_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let order = self
            .query
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order not found".into()))?;

        access::ensure_owner_or_admin(
            actor,
            order.user_id,
            "Unauthorized - You can only view your own orders",
        )?;

        let lines: Vec<OrderLineResponse> = self
            .line_query
            .find_by_order(order.id)
            .await?
            .into_iter()
            .map(OrderLineResponse::from)
            .collect();

        let user = self
            .user_query
            .find_by_id(order.user_id)
            .await?
            .map(UserSummary::from);

        let response = OrderResponse::assemble(order, user, lines);

        Ok(ApiResponse::success("Order fetched successfully", response))
    }
}
