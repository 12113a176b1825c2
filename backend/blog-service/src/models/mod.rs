/// Data models for blog-service
///
/// Blog posts, comments and wishlist entries are loosely schemaed documents.
/// The request types here check the handful of fields the service relies on
/// and carry every other field through untouched.
use crate::error::{AppError, Result};
use bson::{oid::ObjectId, Bson, Document};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use validator::Validate;

pub const ID_FIELD: &str = "_id";
pub const TITLE_FIELD: &str = "title";
pub const DESCRIPTION_FIELD: &str = "description";
pub const DESCRIPTION_LENGTH_FIELD: &str = "descriptionLength";
pub const PUBLISH_DATE_FIELD: &str = "publishDate";
pub const BLOG_ID_FIELD: &str = "blogId";
pub const WISHLIST_FOR_FIELD: &str = "wishlistFor";

/// Parse a store identifier, rejecting anything that is not a 24-char hex ObjectId.
pub fn parse_object_id(raw: &str) -> Result<ObjectId> {
    ObjectId::parse_str(raw.trim()).map_err(|_| AppError::InvalidId(raw.to_string()))
}

// =====================================================================
// Request bodies
// =====================================================================

/// Body for creating or upserting a blog post
#[derive(Debug, Deserialize, Validate)]
pub struct BlogPayload {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[serde(rename = "publishDate")]
    pub publish_date: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BlogPayload {
    pub fn into_document(self) -> Document {
        let mut doc = extra_to_document(self.extra);
        if let Some(title) = self.title {
            doc.insert(TITLE_FIELD, title);
        }
        if let Some(description) = self.description {
            doc.insert(DESCRIPTION_FIELD, description);
        }
        if let Some(published) = self.publish_date {
            doc.insert(
                PUBLISH_DATE_FIELD,
                Bson::DateTime(bson::DateTime::from_chrono(published)),
            );
        }
        doc
    }
}

/// Body for creating a comment
#[derive(Debug, Deserialize, Validate)]
pub struct CommentPayload {
    #[serde(rename = "blogId")]
    #[validate(length(min = 1))]
    pub blog_id: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CommentPayload {
    pub fn into_document(self) -> Document {
        let mut doc = extra_to_document(self.extra);
        doc.insert(BLOG_ID_FIELD, self.blog_id);
        doc
    }
}

/// Body for adding a wishlist entry
#[derive(Debug, Deserialize, Validate)]
pub struct WishlistPayload {
    #[serde(rename = "wishlistFor")]
    #[validate(length(min = 1))]
    pub wishlist_for: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WishlistPayload {
    pub fn into_document(self) -> Document {
        let mut doc = extra_to_document(self.extra);
        doc.insert(WISHLIST_FOR_FIELD, self.wishlist_for);
        doc
    }
}

/// Store-assigned identifiers are never taken from the client.
fn extra_to_document(extra: Map<String, Value>) -> Document {
    extra
        .into_iter()
        .filter(|(key, _)| key != ID_FIELD)
        .map(|(key, value)| (key, json_to_bson(value)))
        .collect()
}

// =====================================================================
// Store acknowledgments
// =====================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Render an identifier the way clients see it: ObjectIds as bare hex.
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// =====================================================================
// JSON <-> BSON
// =====================================================================

pub fn json_to_bson(value: Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                match i32::try_from(i) {
                    Ok(small) => Bson::Int32(small),
                    Err(_) => Bson::Int64(i),
                }
            } else {
                Bson::Double(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => Bson::String(s),
        Value::Array(items) => Bson::Array(items.into_iter().map(json_to_bson).collect()),
        Value::Object(map) => Bson::Document(
            map.into_iter()
                .map(|(key, value)| (key, json_to_bson(value)))
                .collect(),
        ),
    }
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        Bson::Double(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        Bson::String(s) => Value::String(s),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => {
            Value::String(dt.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true))
        }
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => document_to_json(doc),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}
