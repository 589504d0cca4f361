mod repository;
mod service;

pub use self::repository::{
    DynOrderLineCommandRepository, DynOrderLineQueryRepository, OrderLineCommandRepositoryTrait,
    OrderLineQueryRepositoryTrait,
};
pub use self::service::{DynOrderLineService, OrderLineServiceTrait};

#[cfg(test)]
pub use self::repository::{
    MockOrderLineCommandRepositoryTrait, MockOrderLineQueryRepositoryTrait,
};
