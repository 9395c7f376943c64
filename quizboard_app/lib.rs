pub mod clock;
pub mod command_handlers;
pub mod config;
pub mod cqrs;
pub mod pagination;
pub mod queries_handlers;
#[cfg(any(test, feature = "test-utils"))]
pub mod ranking;
pub mod repository;
pub mod score_policy;
pub mod service;
pub mod test_utils;
pub mod uow;
