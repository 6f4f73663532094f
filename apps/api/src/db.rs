use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Idempotent table setup. There is no migration history; columns are fixed.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS notes (
        seq        BIGSERIAL,
        id         UUID PRIMARY KEY,
        title      TEXT NOT NULL,
        content    TEXT NOT NULL DEFAULT '',
        tags       TEXT[] NOT NULL DEFAULT '{}',
        favorite   BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        user_id    UUID
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bookmarks (
        seq         BIGSERIAL,
        id          UUID PRIMARY KEY,
        title       TEXT NOT NULL,
        url         TEXT NOT NULL,
        description TEXT,
        tags        TEXT[] NOT NULL DEFAULT '{}',
        favorite    BOOLEAN NOT NULL DEFAULT FALSE,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        user_id     UUID
    )
    "#,
    "CREATE INDEX IF NOT EXISTS notes_tags_idx ON notes USING GIN (tags)",
    "CREATE INDEX IF NOT EXISTS bookmarks_tags_idx ON bookmarks USING GIN (tags)",
];

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `notes` and `bookmarks` tables if they are missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Schema ready");
    Ok(())
}
