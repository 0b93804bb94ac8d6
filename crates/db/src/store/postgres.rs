//! PostgreSQL backend: one `icon_libraries` row per library, the document
//! kept in a JSONB column and mutated with targeted `jsonb_set` updates.

use std::collections::BTreeMap;

use async_trait::async_trait;
use iconlib_core::types::{Category, IconLibrary, UserCredential};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use super::{CredentialStore, IconStore, StoreResult};

/// Row shape of the `users` table as read by [`PgStore::find_credential`].
#[derive(Debug, FromRow)]
struct CredentialRow {
    id: i64,
    username: String,
    password: String,
}

impl From<CredentialRow> for UserCredential {
    fn from(row: CredentialRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password: row.password,
        }
    }
}

/// PostgreSQL-backed [`IconStore`] and [`CredentialStore`].
///
/// Cheap to clone; the pool is reference-counted.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    library: String,
}

impl PgStore {
    /// Bind a store to `library`, the name of the document row it manages.
    pub fn new(pool: PgPool, library: impl Into<String>) -> Self {
        Self {
            pool,
            library: library.into(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn library(&self) -> &str {
        &self.library
    }
}

#[async_trait]
impl IconStore for PgStore {
    async fn load(&self) -> StoreResult<Option<IconLibrary>> {
        let icons = sqlx::query_scalar::<_, Json<BTreeMap<String, Category>>>(
            "SELECT icons FROM icon_libraries WHERE library = $1",
        )
        .bind(&self.library)
        .fetch_optional(&self.pool)
        .await?;

        Ok(icons.map(|Json(icons)| IconLibrary { icons }))
    }

    async fn create_library(&self) -> StoreResult<bool> {
        let result = sqlx::query(
            "INSERT INTO icon_libraries (library) VALUES ($1)
             ON CONFLICT (library) DO NOTHING",
        )
        .bind(&self.library)
        .execute(&self.pool)
        .await?;

        let created = result.rows_affected() > 0;
        if created {
            tracing::debug!(library = %self.library, "Created icons document");
        }
        Ok(created)
    }

    async fn put_category(&self, name: &str, category: &Category) -> StoreResult<u64> {
        let value = serde_json::to_value(category)?;
        let result = sqlx::query(
            "UPDATE icon_libraries SET
                icons = jsonb_set(icons, ARRAY[$2::text], $3::jsonb, true),
                updated_at = NOW()
             WHERE library = $1",
        )
        .bind(&self.library)
        .bind(name)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn mark_deleted(&self, name: &str) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE icon_libraries SET
                icons = jsonb_set(icons, ARRAY[$2::text, 'deleted'], 'true'::jsonb, true),
                updated_at = NOW()
             WHERE library = $1 AND icons ? $2",
        )
        .bind(&self.library)
        .bind(name)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn append_icons(&self, name: &str, urls: &[String]) -> StoreResult<u64> {
        if urls.is_empty() {
            return Ok(0);
        }
        let value = serde_json::to_value(urls)?;
        let result = sqlx::query(
            "UPDATE icon_libraries SET
                icons = jsonb_set(
                    icons,
                    ARRAY[$2::text, 'data'],
                    COALESCE(icons #> ARRAY[$2::text, 'data'], '[]'::jsonb) || $3::jsonb,
                    true
                ),
                updated_at = NOW()
             WHERE library = $1 AND icons ? $2",
        )
        .bind(&self.library)
        .bind(name)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn remove_icon(&self, name: &str, url: &str) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE icon_libraries SET
                icons = jsonb_set(
                    icons,
                    ARRAY[$2::text, 'data'],
                    (icons #> ARRAY[$2::text, 'data']) - (
                        SELECT (t.ord - 1)::int
                        FROM jsonb_array_elements_text(icons #> ARRAY[$2::text, 'data'])
                             WITH ORDINALITY AS t(url, ord)
                        WHERE t.url = $3
                        ORDER BY t.ord
                        LIMIT 1
                    )
                ),
                updated_at = NOW()
             WHERE library = $1 AND (icons #> ARRAY[$2::text, 'data']) ? $3",
        )
        .bind(&self.library)
        .bind(name)
        .bind(url)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn find_credential(
        &self,
        username: &str,
        password: &str,
    ) -> StoreResult<Option<UserCredential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, username, password FROM users
             WHERE username = $1 AND password = $2",
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(UserCredential::from))
    }

    async fn upsert_credential(&self, username: &str, password: &str) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO users (username, password) VALUES ($1, $2)
             ON CONFLICT (username) DO UPDATE SET password = EXCLUDED.password",
        )
        .bind(username)
        .bind(password)
        .execute(&self.pool)
        .await?;
        tracing::debug!(%username, "Upserted credential");
        Ok(())
    }
}
