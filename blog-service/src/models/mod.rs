pub mod blog;

pub use blog::{BlogPost, BlogUpdate, UpdateSummary, bson_to_json, document_to_json};
