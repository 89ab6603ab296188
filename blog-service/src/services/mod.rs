pub mod database;
pub mod memory;
pub mod store;

pub use database::MongoBlogStore;
pub use memory::InMemoryBlogStore;
pub use store::BlogStore;
