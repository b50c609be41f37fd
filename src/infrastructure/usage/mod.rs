//! Usage counter implementation

mod counter;

pub use counter::{UsageCounter, ACCOUNT_PREFIX};
