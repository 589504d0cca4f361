pub mod abstract_trait;
pub mod di;
pub mod handler;
pub mod middleware;
pub mod payment;
pub mod repository;
pub mod service;
pub mod state;
