use std::sync::Arc;

use sqlx::PgPool;

use crate::accounts::{AccountStore, PgAccountStore};
use crate::articles::{ArticleStore, PgArticleStore};
use crate::auth::JwtKeys;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub jwt: JwtKeys,
    pub accounts: Arc<dyn AccountStore>,
    pub articles: Arc<dyn ArticleStore>,
}

impl AppState {
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        Self::from_parts(
            Arc::new(config),
            Arc::new(PgAccountStore::new(db.clone())),
            Arc::new(PgArticleStore::new(db)),
        )
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        accounts: Arc<dyn AccountStore>,
        articles: Arc<dyn ArticleStore>,
    ) -> Self {
        let jwt = JwtKeys::new(&config.jwt);
        Self {
            config,
            jwt,
            accounts,
            articles,
        }
    }
}
