mod api;
mod order;
mod pagination;
mod payment;

pub use self::api::{ApiResponse, ApiResponsePagination};
pub use self::order::{OrderLineResponse, OrderResponse, UserSummary};
pub use self::pagination::Pagination;
pub use self::payment::{CheckoutSessionResponse, WebhookAck};
