use super::ORDER_COLUMNS;
use crate::abstract_trait::OrderCommandRepositoryTrait;
use async_trait::async_trait;
use shared::{
    config::ConnectionPool,
    domain::requests::{CreateOrderRecord, NewOrderLine},
    errors::RepositoryError,
    model::Order,
};
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order_with_lines(
        &self,
        order: &CreateOrderRecord,
        lines: &[NewOrderLine],
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            INSERT INTO orders (status, visit_date, vat, payment_method, ticket_code, qr_code, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ORDER_COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, Order>(&sql)
            .bind(&order.status)
            .bind(order.visit_date)
            .bind(order.vat)
            .bind(order.payment_method.as_deref())
            .bind(&order.ticket_code)
            .bind(&order.qr_code)
            .bind(order.user_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to create order for user {}: {:?}",
                    order.user_id, err
                );
                RepositoryError::from(err)
            })?;

        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO order_lines (order_id, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(created.id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .execute(&mut *tx)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to insert line (product {}) for order {}: {:?}",
                    line.product_id, created.id, err
                );
                RepositoryError::from(err)
            })?;
        }

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "✅ Created order ID {} with {} lines for user {}",
            created.id,
            lines.len(),
            created.user_id
        );
        Ok(created)
    }

    async fn transition_status(
        &self,
        order_id: i32,
        from: &str,
        to: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // CAS on status: the WHERE clause makes the losing writer a no-op.
        let sql = format!(
            r#"
            UPDATE orders
            SET status = $3
            WHERE id = $1 AND status = $2
            RETURNING {ORDER_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, Order>(&sql)
            .bind(order_id)
            .bind(from)
            .bind(to)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to transition order {order_id}: {e:?}");
                RepositoryError::from(e)
            })?;

        if updated.is_some() {
            info!("🔄 Order {order_id} moved {from} -> {to}");
        }

        Ok(updated)
    }

    async fn confirm_payment(
        &self,
        order_id: i32,
        payment_method: Option<String>,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            UPDATE orders
            SET status = 'confirmed',
                payment_method = COALESCE($2, payment_method)
            WHERE id = $1 AND status = 'pending'
            RETURNING {ORDER_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, Order>(&sql)
            .bind(order_id)
            .bind(payment_method)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to confirm payment for order {order_id}: {e:?}");
                RepositoryError::from(e)
            })?;

        if updated.is_some() {
            info!("✅ Order {order_id} confirmed by payment notification");
        }

        Ok(updated)
    }
}
