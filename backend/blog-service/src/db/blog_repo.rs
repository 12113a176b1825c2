use super::{BlogRepository, MongoStore};
use crate::error::Result;
use crate::models::{
    id_to_string, DeleteAck, InsertAck, UpdateAck, DESCRIPTION_FIELD, DESCRIPTION_LENGTH_FIELD,
    ID_FIELD, PUBLISH_DATE_FIELD,
};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::TryStreamExt;
use mongodb::options::{FindOptions, UpdateOptions};

/// Aggregation stages ranking posts by description length.
///
/// A missing description counts as the empty string so `$strLenCP` never
/// sees a non-string.
pub fn description_length_pipeline(limit: Option<i64>) -> Vec<Document> {
    let mut pipeline = vec![
        doc! {
            "$addFields": {
                DESCRIPTION_LENGTH_FIELD: {
                    "$strLenCP": { "$ifNull": [format!("${}", DESCRIPTION_FIELD), ""] }
                }
            }
        },
        doc! { "$sort": { DESCRIPTION_LENGTH_FIELD: -1 } },
    ];
    if let Some(limit) = limit {
        pipeline.push(doc! { "$limit": limit });
    }
    pipeline
}

/// Text search filter; relies on the text index created at connect time.
pub fn search_filter(terms: &str) -> Document {
    doc! { "$text": { "$search": terms } }
}

#[async_trait]
impl BlogRepository for MongoStore {
    async fn find_all(&self) -> Result<Vec<Document>> {
        let cursor = self.blogs().find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_description_length(&self, limit: Option<i64>) -> Result<Vec<Document>> {
        let cursor = self
            .blogs()
            .aggregate(description_length_pipeline(limit), None)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>> {
        Ok(self.blogs().find_one(doc! { ID_FIELD: id }, None).await?)
    }

    async fn search(&self, terms: &str) -> Result<Vec<Document>> {
        let cursor = self.blogs().find(search_filter(terms), None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_latest(&self, limit: i64) -> Result<Vec<Document>> {
        let options = FindOptions::builder()
            .sort(doc! { PUBLISH_DATE_FIELD: -1 })
            .limit(limit)
            .build();
        let cursor = self.blogs().find(None, options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, blog: Document) -> Result<InsertAck> {
        let result = self.blogs().insert_one(blog, None).await?;
        Ok(InsertAck {
            acknowledged: true,
            inserted_id: id_to_string(&result.inserted_id),
        })
    }

    async fn upsert(&self, id: ObjectId, fields: Document) -> Result<UpdateAck> {
        let options = UpdateOptions::builder().upsert(true).build();
        let result = self
            .blogs()
            .update_one(doc! { ID_FIELD: id }, doc! { "$set": fields }, options)
            .await?;

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(result.upserted_id.is_some()),
            upserted_id: result.upserted_id.as_ref().map(id_to_string),
        })
    }

    async fn delete(&self, id: ObjectId) -> Result<DeleteAck> {
        let result = self.blogs().delete_one(doc! { ID_FIELD: id }, None).await?;
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }
}
