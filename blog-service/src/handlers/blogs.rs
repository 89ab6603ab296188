//! CRUD handlers for the blogs collection.
//!
//! Handlers translate one request into one store call and render the result;
//! request bodies are passed through untouched.

use crate::error::BlogError;
use crate::models::{bson_to_json, document_to_json, BlogPost, BlogUpdate, UpdateSummary};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};

fn parse_id(id: &str) -> Result<ObjectId, BlogError> {
    ObjectId::parse_str(id).map_err(|_| {
        tracing::warn!(blog_id = %id, "Rejected malformed blog id");
        BlogError::InvalidId
    })
}

pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Value>, BlogError> {
    tracing::info!("Fetching all blogs");

    let posts = state.store.list().await.map_err(BlogError::FetchAll)?;

    Ok(Json(Value::Array(posts.into_iter().map(document_to_json).collect())))
}

pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, BlogError> {
    let blog_id = parse_id(&id)?;
    tracing::info!(blog_id = %blog_id, "Fetching blog");

    let post = state
        .store
        .find_by_id(blog_id)
        .await
        .map_err(BlogError::Fetch)?
        .ok_or(BlogError::NotFound)?;

    Ok(Json(document_to_json(post)))
}

pub async fn create_blog(
    State(state): State<AppState>,
    Json(post): Json<BlogPost>,
) -> Result<(StatusCode, Json<Value>), BlogError> {
    tracing::info!(fields = post.len(), "Creating blog");

    let inserted_id = state.store.insert(post).await.map_err(BlogError::Create)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "insertedId": bson_to_json(inserted_id) })),
    ))
}

pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<BlogPost>,
) -> Result<Json<UpdateSummary>, BlogError> {
    let blog_id = parse_id(&id)?;
    let update = BlogUpdate::from(body);
    tracing::info!(blog_id = %blog_id, "Updating blog");

    let summary = state
        .store
        .upsert(blog_id, update)
        .await
        .map_err(BlogError::Update)?;

    Ok(Json(summary))
}

pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, BlogError> {
    let blog_id = parse_id(&id)?;
    tracing::info!(blog_id = %blog_id, "Deleting blog");

    let deleted = state
        .store
        .delete(blog_id)
        .await
        .map_err(BlogError::Delete)?;

    if deleted == 0 {
        return Err(BlogError::NotFound);
    }

    Ok(Json(json!({ "message": "Blog deleted successfully" })))
}
