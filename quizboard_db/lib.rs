pub mod uow;

mod connection;
mod mapping;
mod models;
mod repository;

pub use connection::{DbPool, establish_connection_pool, establish_test_connection_pool};
pub use repository::*;
