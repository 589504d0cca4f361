mod command;
mod query;

pub use self::command::{OrderCommandService, OrderCommandServiceDeps};
pub use self::query::OrderQueryService;

use shared::{errors::ServiceError, model::OrderStatus};
use std::str::FromStr;

/// Parse a persisted or user-supplied status string, mapping failures to a
/// BadRequest so callers surface the message as-is.
pub(crate) fn parse_status(value: &str) -> Result<OrderStatus, ServiceError> {
    OrderStatus::from_str(value).map_err(ServiceError::BadRequest)
}
