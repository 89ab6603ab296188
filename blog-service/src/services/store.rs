use crate::models::{BlogPost, BlogUpdate, UpdateSummary};
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson};

/// Access to the blogs collection.
///
/// Every method is a single pass-through to the backing store; nothing here
/// validates or reshapes documents.
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// All posts in the store's natural order.
    async fn list(&self) -> Result<Vec<BlogPost>, anyhow::Error>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<BlogPost>, anyhow::Error>;

    /// Insert a post verbatim and return the `_id` it was stored under.
    async fn insert(&self, post: BlogPost) -> Result<Bson, anyhow::Error>;

    /// Replace the update fields of the post with `id`. When no such post
    /// exists a new one is inserted under a store-assigned id, not `id`.
    async fn upsert(&self, id: ObjectId, update: BlogUpdate)
        -> Result<UpdateSummary, anyhow::Error>;

    /// Delete at most one post, returning how many were removed.
    async fn delete(&self, id: ObjectId) -> Result<u64, anyhow::Error>;

    async fn health_check(&self) -> Result<(), anyhow::Error>;
}
