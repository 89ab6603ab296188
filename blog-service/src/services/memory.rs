use crate::models::{BlogPost, BlogUpdate, UpdateSummary};
use crate::services::BlogStore;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson};
use std::sync::{Mutex, MutexGuard};

/// Process-local store with the same observable behavior as the MongoDB one.
/// Posts are kept in insertion order.
#[derive(Default)]
pub struct InMemoryBlogStore {
    posts: Mutex<Vec<BlogPost>>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn posts(&self) -> Result<MutexGuard<'_, Vec<BlogPost>>, anyhow::Error> {
        self.posts
            .lock()
            .map_err(|e| anyhow::anyhow!("In-memory blog store mutex poisoned: {}", e))
    }
}

fn has_id(post: &BlogPost, id: &Bson) -> bool {
    post.get("_id") == Some(id)
}

#[async_trait]
impl BlogStore for InMemoryBlogStore {
    async fn list(&self) -> Result<Vec<BlogPost>, anyhow::Error> {
        Ok(self.posts()?.clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<BlogPost>, anyhow::Error> {
        let id = Bson::ObjectId(id);
        Ok(self.posts()?.iter().find(|post| has_id(post, &id)).cloned())
    }

    async fn insert(&self, post: BlogPost) -> Result<Bson, anyhow::Error> {
        let mut posts = self.posts()?;

        let (id, post) = match post.get("_id") {
            Some(id) => (id.clone(), post),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                let mut stored = BlogPost::new();
                stored.insert("_id", id.clone());
                for (key, value) in post {
                    stored.insert(key, value);
                }
                (id, stored)
            }
        };

        if posts.iter().any(|existing| has_id(existing, &id)) {
            anyhow::bail!("E11000 duplicate key error: _id {}", id);
        }

        posts.push(post);
        Ok(id)
    }

    async fn upsert(
        &self,
        id: ObjectId,
        update: BlogUpdate,
    ) -> Result<UpdateSummary, anyhow::Error> {
        let mut posts = self.posts()?;
        let fields = update.fields();

        let target = Bson::ObjectId(id);
        if let Some(post) = posts.iter_mut().find(|post| has_id(post, &target)) {
            let mut modified = false;
            for (key, value) in fields {
                if post.get(&key) != Some(&value) {
                    post.insert(key, value);
                    modified = true;
                }
            }
            return Ok(UpdateSummary::updated(1, u64::from(modified)));
        }

        let new_id = ObjectId::new();
        let mut stored = BlogPost::new();
        stored.insert("_id", new_id);
        for (key, value) in fields {
            stored.insert(key, value);
        }
        posts.push(stored);

        Ok(UpdateSummary::upserted(new_id.to_hex()))
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, anyhow::Error> {
        let mut posts = self.posts()?;
        let target = Bson::ObjectId(id);

        match posts.iter().position(|post| has_id(post, &target)) {
            Some(index) => {
                posts.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn health_check(&self) -> Result<(), anyhow::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn insert_assigns_an_object_id() {
        let store = InMemoryBlogStore::new();
        let id = store.insert(doc! { "title": "A" }).await.unwrap();

        let oid = id.as_object_id().unwrap();
        let post = store.find_by_id(oid).await.unwrap().unwrap();
        assert_eq!(post.get_object_id("_id").unwrap(), oid);
        assert_eq!(post.get_str("title").unwrap(), "A");
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_ids() {
        let store = InMemoryBlogStore::new();
        let oid = ObjectId::new();
        store.insert(doc! { "_id": oid }).await.unwrap();

        assert!(store.insert(doc! { "_id": oid }).await.is_err());
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = InMemoryBlogStore::new();
        for title in ["first", "second", "third"] {
            store.insert(doc! { "title": title }).await.unwrap();
        }

        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .iter()
            .map(|post| post.get_str("title").unwrap().to_string())
            .collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn upsert_of_unchanged_fields_reports_no_modification() {
        let store = InMemoryBlogStore::new();
        let oid = ObjectId::new();
        let update = BlogUpdate {
            title: Some(Bson::String("same".to_string())),
            ..Default::default()
        };
        let mut existing = update.fields();
        existing.insert("_id", oid);
        store.insert(existing).await.unwrap();

        let summary = store.upsert(oid, update).await.unwrap();
        assert_eq!(summary, UpdateSummary::updated(1, 0));
    }

    #[tokio::test]
    async fn upsert_of_missing_id_inserts_under_a_new_id() {
        let store = InMemoryBlogStore::new();
        let requested = ObjectId::new();

        let summary = store
            .upsert(requested, BlogUpdate::default())
            .await
            .unwrap();

        let new_id = summary.upserted_id.unwrap();
        assert_ne!(new_id, requested.to_hex());
        assert!(store.find_by_id(requested).await.unwrap().is_none());
        let created = ObjectId::parse_str(&new_id).unwrap();
        assert!(store.find_by_id(created).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_removes_at_most_one() {
        let store = InMemoryBlogStore::new();
        let oid = store
            .insert(doc! { "title": "gone" })
            .await
            .unwrap()
            .as_object_id()
            .unwrap();

        assert_eq!(store.delete(oid).await.unwrap(), 1);
        assert_eq!(store.delete(oid).await.unwrap(), 0);
    }
}
