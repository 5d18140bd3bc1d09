//! Schema bootstrap for the link/tag tables

use sqlx::SqlitePool;

/// Create tables and indexes if they don't exist.
///
/// Uniqueness of `tags.name` and `links.url` and the `link_tags` foreign keys
/// are the authoritative guards; repositories translate their violations
/// into domain errors.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::debug!("Running schema migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tags (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS links (
            id TEXT PRIMARY KEY,
            url TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS link_tags (
            link_id TEXT NOT NULL REFERENCES links(id) ON DELETE CASCADE,
            tag_id TEXT NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
            PRIMARY KEY (link_id, tag_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_link_tags_tag ON link_tags(tag_id)")
        .execute(pool)
        .await?;

    tracing::debug!("Schema migrations complete");
    Ok(())
}
