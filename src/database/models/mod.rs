pub mod category;
pub mod todo;
pub mod user;

pub use category::{Category, CreateCategory};
pub use todo::{NewTodo, Todo};
pub use user::User;
