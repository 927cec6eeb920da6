//! Service layer for the deals API.
//! - Owns the in-memory deal collection behind the `DealStore` trait.
//! - Payload validation and capacity coercion live next to the model.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod deals;

pub use deals::{Deal, DealFilter, DealInput, DealStore, InMemoryDealStore};
pub use errors::ServiceError;
