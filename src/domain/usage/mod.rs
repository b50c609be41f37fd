//! Usage domain - per-account cumulative usage

mod entity;

pub use entity::AccountUsage;
