//! Store domain - external key-value store abstraction

mod repository;

pub use repository::ThrottleStore;
