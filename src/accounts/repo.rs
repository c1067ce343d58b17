use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::accounts::repo_types::{Account, AccountChanges, NewAccount};
use crate::error::StoreError;

/// Persistence for account records.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// All accounts, ordered by id.
    async fn list(&self) -> Result<Vec<Account>, StoreError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Account>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Insert a new account. A taken email yields `StoreError::DuplicateEmail`.
    async fn create(&self, new: NewAccount) -> Result<Account, StoreError>;

    /// Overwrite the given columns of account `id`. `Ok(None)` if there is no such account.
    async fn update(&self, id: i32, changes: AccountChanges) -> Result<Option<Account>, StoreError>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct PgAccountStore {
    db: PgPool,
}

impl PgAccountStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn map_write_error(e: sqlx::Error, what: &'static str) -> StoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return StoreError::DuplicateEmail;
        }
    }
    StoreError::Backend(anyhow::Error::new(e).context(what))
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        let rows = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, nome, sobrenome, email, senha, eh_admin
            FROM usuarios
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list accounts")?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, nome, sobrenome, email, senha, eh_admin
            FROM usuarios
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find account by id")?;
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, nome, sobrenome, email, senha, eh_admin
            FROM usuarios
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find account by email")?;
        Ok(row)
    }

    async fn create(&self, new: NewAccount) -> Result<Account, StoreError> {
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO usuarios (nome, sobrenome, email, senha, eh_admin)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, nome, sobrenome, email, senha, eh_admin
            "#,
        )
        .bind(new.first_name)
        .bind(new.last_name)
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.is_admin)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_write_error(e, "insert account"))
    }

    async fn update(&self, id: i32, changes: AccountChanges) -> Result<Option<Account>, StoreError> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        // NULL binds keep the current column value
        sqlx::query_as::<_, Account>(
            r#"
            UPDATE usuarios
               SET nome      = COALESCE($2, nome),
                   sobrenome = COALESCE($3, sobrenome),
                   email     = COALESCE($4, email),
                   senha     = COALESCE($5, senha),
                   eh_admin  = COALESCE($6, eh_admin)
             WHERE id = $1
            RETURNING id, nome, sobrenome, email, senha, eh_admin
            "#,
        )
        .bind(id)
        .bind(changes.first_name)
        .bind(changes.last_name)
        .bind(changes.email)
        .bind(changes.password_hash)
        .bind(changes.is_admin)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| map_write_error(e, "update account"))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let res = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete account")?;
        Ok(res.rows_affected() > 0)
    }
}
