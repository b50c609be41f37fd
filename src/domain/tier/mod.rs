//! Tier domain - bandwidth speed levels and usage thresholds

mod entity;

pub use entity::{Speed, Tier};
