use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::refresh_token::errors::RefreshTokenError;
use crate::domain::refresh_token::models::RefreshToken;
use crate::domain::refresh_token::ports::RefreshTokenRepository;
use crate::domain::user::models::UserId;

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    token: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    revoked_at: Option<DateTime<Utc>>,
}

impl From<RefreshTokenRow> for RefreshToken {
    fn from(r: RefreshTokenRow) -> Self {
        RefreshToken {
            token: r.token,
            user_id: UserId(r.user_id),
            created_at: r.created_at,
            updated_at: r.updated_at,
            expires_at: r.expires_at,
            revoked_at: r.revoked_at,
        }
    }
}

pub struct PostgresRefreshTokenRepository {
    pool: PgPool,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, RefreshTokenError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, created_at, updated_at, expires_at, revoked_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&token.token)
        .bind(token.user_id.0)
        .bind(token.created_at)
        .bind(token.updated_at)
        .bind(token.expires_at)
        .bind(token.revoked_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                RefreshTokenError::Conflict
            }
            _ => RefreshTokenError::DatabaseError(e.to_string()),
        })?;

        Ok(token)
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, RefreshTokenError> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT token, user_id, created_at, updated_at, expires_at, revoked_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RefreshTokenError::DatabaseError(e.to_string()))?;

        Ok(row.map(RefreshToken::from))
    }

    async fn mark_revoked(&self, token: &str, at: DateTime<Utc>) -> Result<(), RefreshTokenError> {
        // First revocation time wins
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = COALESCE(revoked_at, $2), updated_at = $2
            WHERE token = $1
            "#,
        )
        .bind(token)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| RefreshTokenError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RefreshTokenError::NotFound);
        }

        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, RefreshTokenError> {
        let result = sqlx::query("DELETE FROM refresh_tokens")
            .execute(&self.pool)
            .await
            .map_err(|e| RefreshTokenError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
