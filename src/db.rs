use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::AppConfig;

pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")?;
    Ok(db)
}

/// Creates the tables if they are missing. Existing tables are left untouched.
pub async fn create_tables(db: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS usuarios (
            id        SERIAL PRIMARY KEY,
            nome      VARCHAR(256) NOT NULL,
            sobrenome VARCHAR(256) NOT NULL,
            email     VARCHAR(256) NOT NULL UNIQUE,
            senha     VARCHAR(256) NOT NULL,
            eh_admin  BOOLEAN NOT NULL DEFAULT FALSE
        )
        "#,
    )
    .execute(db)
    .await
    .context("create table usuarios")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artigos (
            id         SERIAL PRIMARY KEY,
            titulo     VARCHAR(256) NOT NULL,
            descricao  VARCHAR(256) NOT NULL,
            url_fonte  VARCHAR(256) NOT NULL,
            usuario_id INTEGER REFERENCES usuarios (id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(db)
    .await
    .context("create table artigos")?;

    info!("tables ready");
    Ok(())
}
