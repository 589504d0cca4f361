use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE: i32 = 1;
pub const DEFAULT_LIMIT: i32 = 20;
pub const MAX_LIMIT: i32 = 100;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct CreateOrderRequest {
    pub visit_date: DateTime<Utc>,

    /// VAT percentage; falls back to the configured default when omitted.
    pub vat: Option<Decimal>,

    #[validate(length(min = 2, message = "Payment method must have at least 2 characters"))]
    pub payment_method: Option<String>,

    /// Only honored for admin callers; everyone else orders for themselves.
    #[validate(range(min = 1))]
    pub user_id: Option<i32>,

    #[validate(length(min = 1, message = "At least one product must be ordered"), nested)]
    pub order_lines: Option<Vec<CreateOrderLineItem>>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct CreateOrderLineItem {
    #[validate(range(min = 1))]
    pub product_id: i32,

    #[validate(range(min = 1, max = 20, message = "Quantity cannot exceed 20 tickets per line"))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct UpdateOrderStatusRequest {
    #[validate(length(min = 1))]
    pub status: String,
}

/// Fully resolved order row ready for insertion: codes generated, VAT
/// defaulted, owner arbitrated.
#[derive(Debug, Clone)]
pub struct CreateOrderRecord {
    pub status: String,
    pub visit_date: DateTime<Utc>,
    pub vat: Decimal,
    pub payment_method: Option<String>,
    pub ticket_code: String,
    pub qr_code: String,
    pub user_id: i32,
}

/// Line ready for insertion, unit price already snapshotted from the product.
#[derive(Debug, Clone)]
pub struct NewOrderLine {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Sort key accepted in the `"column:direction"` form of the listing routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSort {
    OrderDateAsc,
    #[default]
    OrderDateDesc,
    VisitDateAsc,
    VisitDateDesc,
}

impl OrderSort {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("order_date:asc") => OrderSort::OrderDateAsc,
            Some("order_date:desc") => OrderSort::OrderDateDesc,
            Some("visit_date:asc") => OrderSort::VisitDateAsc,
            Some("visit_date:desc") => OrderSort::VisitDateDesc,
            _ => OrderSort::default(),
        }
    }

    /// ORDER BY fragment; identifiers cannot be bound, so the repository
    /// interpolates this fixed set only.
    pub fn sql(&self) -> &'static str {
        match self {
            OrderSort::OrderDateAsc => "o.order_date ASC",
            OrderSort::OrderDateDesc => "o.order_date DESC",
            OrderSort::VisitDateAsc => "o.visit_date ASC",
            OrderSort::VisitDateDesc => "o.visit_date DESC",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default, ToSchema, IntoParams)]
pub struct FindAllOrders {
    pub status: Option<String>,

    #[validate(range(min = 1))]
    pub user_id: Option<i32>,

    pub visit_date_from: Option<DateTime<Utc>>,
    pub visit_date_to: Option<DateTime<Utc>>,
    pub order_date_from: Option<DateTime<Utc>>,
    pub order_date_to: Option<DateTime<Utc>>,

    pub payment_method: Option<String>,

    /// Case-insensitive match against payment method and owner email/names.
    #[validate(length(min = 1, max = 100))]
    pub search: Option<String>,

    #[validate(range(min = 1))]
    pub page: Option<i32>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i32>,

    /// One of `order_date:asc|order_date:desc|visit_date:asc|visit_date:desc`.
    pub sort: Option<String>,
}

impl FindAllOrders {
    pub fn page(&self) -> i32 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    pub fn limit(&self) -> i32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        ((self.page() - 1) as i64) * (self.limit() as i64)
    }

    pub fn sort(&self) -> OrderSort {
        OrderSort::from_param(self.sort.as_deref())
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default, ToSchema, IntoParams)]
pub struct FindUserOrders {
    pub status: Option<String>,

    #[validate(range(min = 1))]
    pub page: Option<i32>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i32>,

    pub sort: Option<String>,
}

impl FindUserOrders {
    pub fn page(&self) -> i32 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    pub fn limit(&self) -> i32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        ((self.page() - 1) as i64) * (self.limit() as i64)
    }

    pub fn sort(&self) -> OrderSort {
        OrderSort::from_param(self.sort.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_param_parsing() {
        assert_eq!(
            OrderSort::from_param(Some("visit_date:asc")),
            OrderSort::VisitDateAsc
        );
        assert_eq!(
            OrderSort::from_param(Some("order_date:asc")),
            OrderSort::OrderDateAsc
        );
        assert_eq!(OrderSort::from_param(None), OrderSort::OrderDateDesc);
        assert_eq!(
            OrderSort::from_param(Some("garbage")),
            OrderSort::OrderDateDesc
        );
    }

    #[test]
    fn paging_defaults_and_clamps() {
        let req = FindAllOrders::default();
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), 20);
        assert_eq!(req.offset(), 0);

        let req = FindAllOrders {
            page: Some(3),
            limit: Some(500),
            ..Default::default()
        };
        assert_eq!(req.limit(), 100);
        assert_eq!(req.offset(), 200);
    }
}
