pub mod blogs;
pub mod health;

pub use blogs::{create_blog, delete_blog, get_blog, list_blogs, update_blog};
pub use health::{health_check, root};
