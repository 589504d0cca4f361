mod command;
mod query;

pub use self::command::OrderLineCommandRepository;
pub use self::query::OrderLineQueryRepository;
