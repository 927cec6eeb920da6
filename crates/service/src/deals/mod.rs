//! Deal domain: power-purchase-agreement records held in process memory.

pub mod filter;
pub mod memory_store;
pub mod model;
pub mod repository;
pub mod seed;
pub mod validation;

pub use filter::DealFilter;
pub use memory_store::InMemoryDealStore;
pub use model::{Deal, DealInput, REQUIRED_FIELDS};
pub use repository::DealStore;
pub use validation::validate;
