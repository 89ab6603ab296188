#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use blog_service::models::{BlogPost, BlogUpdate, UpdateSummary};
use blog_service::services::{BlogStore, InMemoryBlogStore};
use blog_service::{build_router, AppState};
use mongodb::bson::{oid::ObjectId, Bson};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Router backed by an empty in-memory store.
    pub fn spawn() -> Self {
        Self::with_store(Arc::new(InMemoryBlogStore::new()))
    }

    pub fn with_store(store: Arc<dyn BlogStore>) -> Self {
        Self {
            router: build_router(AppState::new(store)),
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body, text }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// Create a blog and return its id.
    pub async fn create_blog(&self, body: Value) -> String {
        let response = self.post("/blogs", body).await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body["insertedId"]
            .as_str()
            .expect("insertedId should be a string")
            .to_string()
    }
}

/// Store whose every call fails, for exercising the error responses.
pub struct FailingBlogStore;

#[async_trait]
impl BlogStore for FailingBlogStore {
    async fn list(&self) -> Result<Vec<BlogPost>, anyhow::Error> {
        anyhow::bail!("connection refused")
    }

    async fn find_by_id(&self, _id: ObjectId) -> Result<Option<BlogPost>, anyhow::Error> {
        anyhow::bail!("connection refused")
    }

    async fn insert(&self, _post: BlogPost) -> Result<Bson, anyhow::Error> {
        anyhow::bail!("connection refused")
    }

    async fn upsert(
        &self,
        _id: ObjectId,
        _update: BlogUpdate,
    ) -> Result<UpdateSummary, anyhow::Error> {
        anyhow::bail!("connection refused")
    }

    async fn delete(&self, _id: ObjectId) -> Result<u64, anyhow::Error> {
        anyhow::bail!("connection refused")
    }

    async fn health_check(&self) -> Result<(), anyhow::Error> {
        anyhow::bail!("connection refused")
    }
}
