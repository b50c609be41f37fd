//! API layer - HTTP endpoints

pub mod health;
pub mod router;
pub mod state;
pub mod tier;
pub mod types;
pub mod usage;

pub use router::create_router;
pub use state::AppState;
