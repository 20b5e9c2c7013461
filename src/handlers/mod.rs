// handlers/mod.rs - Handlers grouped by security tier
//
// public    - no authentication (/, /health)
// protected - JWT authentication plus user validation (/category, /todo)

pub mod protected;
pub mod public;
