//! Read access to the `artigos` table. Articles are written by another service.

pub mod repo;

pub use repo::{Article, ArticleStore, PgArticleStore};
