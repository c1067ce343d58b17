use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Article {
    pub id: i32,
    #[serde(rename = "titulo")]
    #[sqlx(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    #[sqlx(rename = "descricao")]
    pub description: String,
    #[serde(rename = "url_fonte")]
    #[sqlx(rename = "url_fonte")]
    pub source_url: String,
    #[serde(rename = "usuario_id")]
    #[sqlx(rename = "usuario_id")]
    pub author_id: i32,
}

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Articles written by `author_id`, oldest first.
    async fn list_by_author(&self, author_id: i32) -> Result<Vec<Article>, StoreError>;
}

#[derive(Clone)]
pub struct PgArticleStore {
    db: PgPool,
}

impl PgArticleStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ArticleStore for PgArticleStore {
    async fn list_by_author(&self, author_id: i32) -> Result<Vec<Article>, StoreError> {
        let rows = sqlx::query_as::<_, Article>(
            r#"
            SELECT id, titulo, descricao, url_fonte, usuario_id
              FROM artigos
             WHERE usuario_id = $1
             ORDER BY id ASC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.db)
        .await
        .context("list articles by author")?;

        Ok(rows)
    }
}
