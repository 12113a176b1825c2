use super::{CommentRepository, MongoStore};
use crate::error::Result;
use crate::models::{id_to_string, InsertAck, BLOG_ID_FIELD};
use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;

#[async_trait]
impl CommentRepository for MongoStore {
    async fn find_by_blog(&self, blog_id: &str) -> Result<Vec<Document>> {
        let cursor = self
            .comments()
            .find(doc! { BLOG_ID_FIELD: blog_id }, None)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, comment: Document) -> Result<InsertAck> {
        let result = self.comments().insert_one(comment, None).await?;
        Ok(InsertAck {
            acknowledged: true,
            inserted_id: id_to_string(&result.inserted_id),
        })
    }
}
