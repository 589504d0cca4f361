use crate::abstract_trait::OrderLineQueryRepositoryTrait;
use async_trait::async_trait;
use shared::{
    config::ConnectionPool,
    errors::RepositoryError,
    model::{OrderLineWithOrder, OrderLineWithProduct},
};
use tracing::error;

const LINE_WITH_PRODUCT: &str = r#"
    SELECT
        l.id, l.order_id, l.product_id, l.quantity, l.unit_price,
        p.name AS product_name
    FROM order_lines l
    JOIN products p ON p.id = l.product_id
"#;

#[derive(Clone)]
pub struct OrderLineQueryRepository {
    db: ConnectionPool,
}

impl OrderLineQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderLineQueryRepositoryTrait for OrderLineQueryRepository {
    async fn find_by_order(
        &self,
        order_id: i32,
    ) -> Result<Vec<OrderLineWithProduct>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("{LINE_WITH_PRODUCT} WHERE l.order_id = $1 ORDER BY l.id");

        sqlx::query_as::<_, OrderLineWithProduct>(&sql)
            .bind(order_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch lines for order {order_id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_by_orders(
        &self,
        order_ids: &[i32],
    ) -> Result<Vec<OrderLineWithProduct>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("{LINE_WITH_PRODUCT} WHERE l.order_id = ANY($1) ORDER BY l.id");

        sqlx::query_as::<_, OrderLineWithProduct>(&sql)
            .bind(order_ids)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch lines for {} orders: {e:?}", order_ids.len());
                RepositoryError::from(e)
            })
    }

    async fn find_by_id(
        &self,
        line_id: i32,
    ) -> Result<Option<OrderLineWithOrder>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, OrderLineWithOrder>(
            r#"
            SELECT
                l.id, l.order_id, l.product_id, l.quantity, l.unit_price,
                p.name AS product_name,
                o.user_id AS order_user_id,
                o.status AS order_status
            FROM order_lines l
            JOIN products p ON p.id = l.product_id
            JOIN orders o ON o.id = l.order_id
            WHERE l.id = $1
            "#,
        )
        .bind(line_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order line {line_id}: {e:?}");
            RepositoryError::from(e)
        })
    }
}
