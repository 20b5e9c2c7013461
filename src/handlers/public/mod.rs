// handlers/public/mod.rs - Public handlers (no authentication)

pub mod health;

pub use health::{health, root};
