use mongodb::bson::{doc, Bson, Document};
use serde::Serialize;
use serde_json::{Map, Value};

/// A stored blog post. The collection is schemaless, so posts are kept as
/// raw documents and any shape the client sends is accepted.
pub type BlogPost = Document;

/// The fields written by `PUT /blogs/:id`.
///
/// Every field is replaced on update; a field absent from the request body is
/// written as `null`. Built from the request document, so only JSON objects
/// are accepted as bodies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogUpdate {
    pub title: Option<Bson>,
    pub image: Option<Bson>,
    pub short_description: Option<Bson>,
    pub category: Option<Bson>,
    pub introduction: Option<Bson>,
    pub body: Option<Bson>,
    pub conclusion: Option<Bson>,
    pub published_at: Option<Bson>,
    pub user_email: Option<Bson>,
    pub author: Option<Bson>,
}

impl From<Document> for BlogUpdate {
    fn from(mut body: Document) -> Self {
        let mut take = |key: &str| body.remove(key);
        Self {
            title: take("title"),
            image: take("image"),
            short_description: take("short_description"),
            category: take("category"),
            introduction: take("introduction"),
            body: take("body"),
            conclusion: take("conclusion"),
            published_at: take("publishedAt"),
            user_email: take("user_email"),
            author: take("author"),
        }
    }
}

impl BlogUpdate {
    /// Field values keyed by their stored name, in a stable order.
    pub fn fields(&self) -> Document {
        let value = |field: &Option<Bson>| field.clone().unwrap_or(Bson::Null);
        doc! {
            "title": value(&self.title),
            "image": value(&self.image),
            "short_description": value(&self.short_description),
            "category": value(&self.category),
            "introduction": value(&self.introduction),
            "body": value(&self.body),
            "conclusion": value(&self.conclusion),
            "publishedAt": value(&self.published_at),
            "user_email": value(&self.user_email),
            "author": value(&self.author),
        }
    }

    pub fn to_set_document(&self) -> Document {
        doc! { "$set": self.fields() }
    }
}

/// Outcome of an update, mirroring the store's own write result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSummary {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

impl UpdateSummary {
    pub fn updated(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: 0,
            upserted_id: None,
        }
    }

    pub fn upserted(id: String) -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(id),
        }
    }
}

/// Render a document as plain JSON.
pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect::<Map<_, _>>(),
    )
}

/// ObjectIds become hex strings and datetimes RFC 3339 strings; everything
/// else is relaxed extended JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(document) => document_to_json(document),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
