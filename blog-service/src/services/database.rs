use crate::models::{BlogPost, BlogUpdate, UpdateSummary};
use crate::services::BlogStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson},
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client as MongoClient, Collection,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoBlogStore {
    client: MongoClient,
    blogs: Collection<BlogPost>,
}

impl MongoBlogStore {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let mut client_options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        client_options.app_name = Some("blog-service".to_string());
        client_options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = MongoClient::with_options(client_options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let blogs = client.database(database).collection(collection);

        let store = Self { client, blogs };
        store.ping().await?;
        tracing::info!(
            database = %database,
            collection = %collection,
            "Pinged your deployment. Successfully connected to MongoDB"
        );

        Ok(store)
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB ping failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    /// Close all pooled connections.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        tracing::info!("MongoDB client closed");
    }
}

#[async_trait]
impl BlogStore for MongoBlogStore {
    async fn list(&self) -> Result<Vec<BlogPost>, anyhow::Error> {
        let cursor = self.blogs.find(None, None).await?;
        let posts: Vec<BlogPost> = cursor.try_collect().await?;
        Ok(posts)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<BlogPost>, anyhow::Error> {
        let post = self.blogs.find_one(doc! { "_id": id }, None).await?;
        Ok(post)
    }

    async fn insert(&self, post: BlogPost) -> Result<Bson, anyhow::Error> {
        let result = self.blogs.insert_one(post, None).await?;
        Ok(result.inserted_id)
    }

    async fn upsert(
        &self,
        id: ObjectId,
        update: BlogUpdate,
    ) -> Result<UpdateSummary, anyhow::Error> {
        let result = self
            .blogs
            .update_one(doc! { "_id": id }, update.to_set_document(), None)
            .await?;

        if result.matched_count > 0 {
            return Ok(UpdateSummary::updated(
                result.matched_count,
                result.modified_count,
            ));
        }

        // No match: the post is created under a fresh id, not the requested one.
        let inserted = self.blogs.insert_one(update.fields(), None).await?;
        let new_id = match inserted.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };
        tracing::info!(requested_id = %id, new_id = %new_id, "Upsert inserted a new blog");

        Ok(UpdateSummary::upserted(new_id))
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, anyhow::Error> {
        let result = self.blogs.delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count)
    }

    async fn health_check(&self) -> Result<(), anyhow::Error> {
        self.ping().await.map_err(anyhow::Error::from)
    }
}
