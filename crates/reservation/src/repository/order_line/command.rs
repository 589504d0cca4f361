use crate::abstract_trait::OrderLineCommandRepositoryTrait;
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::{config::ConnectionPool, errors::RepositoryError, model::OrderLine};
use tracing::{error, info};

const LINE_COLUMNS: &str = "id, order_id, product_id, quantity, unit_price";

#[derive(Clone)]
pub struct OrderLineCommandRepository {
    db: ConnectionPool,
}

impl OrderLineCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderLineCommandRepositoryTrait for OrderLineCommandRepository {
    async fn create(
        &self,
        order_id: i32,
        product_id: i32,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<OrderLine, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            INSERT INTO order_lines (order_id, product_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4)
            RETURNING {LINE_COLUMNS}
            "#
        );

        let line = sqlx::query_as::<_, OrderLine>(&sql)
            .bind(order_id)
            .bind(product_id)
            .bind(quantity)
            .bind(unit_price)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to add line to order {order_id}: {e:?}");
                RepositoryError::from(e)
            })?;

        info!("✅ Added line {} to order {order_id}", line.id);
        Ok(line)
    }

    async fn update_quantity(
        &self,
        line_id: i32,
        quantity: i32,
    ) -> Result<OrderLine, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            UPDATE order_lines
            SET quantity = $2
            WHERE id = $1
            RETURNING {LINE_COLUMNS}
            "#
        );

        let line = sqlx::query_as::<_, OrderLine>(&sql)
            .bind(line_id)
            .bind(quantity)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to update order line {line_id}: {e:?}");
                RepositoryError::from(e)
            })?;

        info!("🔄 Updated order line {line_id} quantity to {quantity}");
        Ok(line)
    }

    async fn delete(&self, line_id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM order_lines WHERE id = $1")
            .bind(line_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete order line {line_id}: {e:?}");
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted order line {line_id}");
        Ok(())
    }
}
