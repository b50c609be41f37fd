//! Domain layer - entities, errors and the store abstraction

pub mod error;
pub mod store;
pub mod tier;
pub mod usage;

pub use error::DomainError;
pub use store::ThrottleStore;
pub use tier::{Speed, Tier};
pub use usage::AccountUsage;
