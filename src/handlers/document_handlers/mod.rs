pub mod crud;
pub mod list;

pub use crud::{assign, create, delete, new_form};
pub use list::list;
