use super::ORDER_COLUMNS;
use crate::abstract_trait::OrderQueryRepositoryTrait;
use async_trait::async_trait;
use shared::{
    config::ConnectionPool,
    domain::requests::{FindAllOrders, FindUserOrders},
    errors::RepositoryError,
    model::{Order, OrderWithUser},
};
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<(Vec<OrderWithUser>, i64), RepositoryError> {
        info!("📦 Fetching orders page={} limit={}", req.page(), req.limit());

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // Identifiers cannot be bound; OrderSort::sql is a closed set.
        let sql = format!(
            r#"
            SELECT
                o.id, o.status, o.visit_date, o.order_date, o.vat, o.payment_method,
                o.ticket_code, o.qr_code, o.user_id,
                u.firstname, u.lastname, u.email,
                COUNT(*) OVER() AS total_count
            FROM orders o
            JOIN users u ON u.id = o.user_id
            WHERE ($1::TEXT IS NULL OR o.status = $1)
              AND ($2::INT IS NULL OR o.user_id = $2)
              AND ($3::TIMESTAMPTZ IS NULL OR o.visit_date >= $3)
              AND ($4::TIMESTAMPTZ IS NULL OR o.visit_date <= $4)
              AND ($5::TIMESTAMPTZ IS NULL OR o.order_date >= $5)
              AND ($6::TIMESTAMPTZ IS NULL OR o.order_date <= $6)
              AND ($7::TEXT IS NULL OR o.payment_method = $7)
              AND ($8::TEXT IS NULL
                   OR o.payment_method ILIKE '%' || $8 || '%'
                   OR u.email ILIKE '%' || $8 || '%'
                   OR u.firstname ILIKE '%' || $8 || '%'
                   OR u.lastname ILIKE '%' || $8 || '%')
            ORDER BY {}
            LIMIT $9 OFFSET $10
            "#,
            req.sort().sql()
        );

        let rows = sqlx::query_as::<_, OrderWithUser>(&sql)
            .bind(req.status.as_deref())
            .bind(req.user_id)
            .bind(req.visit_date_from)
            .bind(req.visit_date_to)
            .bind(req.order_date_from)
            .bind(req.order_date_to)
            .bind(req.payment_method.as_deref())
            .bind(req.search.as_deref())
            .bind(req.limit() as i64)
            .bind(req.offset())
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch orders: {e:?}");
                RepositoryError::from(e)
            })?;

        let total = rows.first().map(|r| r.total_count).unwrap_or(0);

        Ok((rows, total))
    }

    async fn find_by_user(
        &self,
        user_id: i32,
        req: &FindUserOrders,
    ) -> Result<(Vec<Order>, i64), RepositoryError> {
        info!("📦 Fetching orders for user_id={user_id}");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            SELECT
                o.id, o.status, o.visit_date, o.order_date, o.vat, o.payment_method,
                o.ticket_code, o.qr_code, o.user_id,
                COUNT(*) OVER() AS total_count
            FROM orders o
            WHERE o.user_id = $1
              AND ($2::TEXT IS NULL OR o.status = $2)
            ORDER BY {}
            LIMIT $3 OFFSET $4
            "#,
            req.sort().sql()
        );

        #[derive(sqlx::FromRow)]
        struct OrderWithCount {
            id: i32,
            status: String,
            visit_date: chrono::DateTime<chrono::Utc>,
            order_date: chrono::DateTime<chrono::Utc>,
            vat: rust_decimal::Decimal,
            payment_method: Option<String>,
            ticket_code: String,
            qr_code: String,
            user_id: i32,
            total_count: i64,
        }

        let rows = sqlx::query_as::<_, OrderWithCount>(&sql)
            .bind(user_id)
            .bind(req.status.as_deref())
            .bind(req.limit() as i64)
            .bind(req.offset())
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch orders for user {user_id}: {e:?}");
                RepositoryError::from(e)
            })?;

        let total = rows.first().map(|r| r.total_count).unwrap_or(0);

        let orders = rows
            .into_iter()
            .map(|r| Order {
                id: r.id,
                status: r.status,
                visit_date: r.visit_date,
                order_date: r.order_date,
                vat: r.vat,
                payment_method: r.payment_method,
                ticket_code: r.ticket_code,
                qr_code: r.qr_code,
                user_id: r.user_id,
            })
            .collect();

        Ok((orders, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");

        sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch order {id}: {e:?}");
                RepositoryError::from(e)
            })
    }
}
