mod command;
mod query;

pub use self::command::OrderCommandRepository;
pub use self::query::OrderQueryRepository;

const ORDER_COLUMNS: &str =
    "id, status, visit_date, order_date, vat, payment_method, ticket_code, qr_code, user_id";
