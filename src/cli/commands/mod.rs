pub mod migrate;
pub mod todo;
pub mod token;
pub mod user;
