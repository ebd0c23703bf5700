use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpBody;
use crate::domain::chirp::models::ChirpFilter;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::models::SortOrder;
use crate::domain::chirp::ports::ChirpRepository;
use crate::domain::user::models::UserId;

#[derive(sqlx::FromRow)]
struct ChirpRow {
    id: Uuid,
    body: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ChirpRow> for Chirp {
    type Error = ChirpError;

    fn try_from(r: ChirpRow) -> Result<Self, Self::Error> {
        Ok(Chirp {
            id: ChirpId(r.id),
            body: ChirpBody::new(r.body)?,
            user_id: UserId(r.user_id),
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

pub struct PostgresChirpRepository {
    pool: PgPool,
}

impl PostgresChirpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChirpRepository for PostgresChirpRepository {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        sqlx::query(
            r#"
            INSERT INTO chirps (id, body, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(chirp.id.0)
        .bind(chirp.body.as_str())
        .bind(chirp.user_id.0)
        .bind(chirp.created_at)
        .bind(chirp.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ChirpError::DatabaseError(e.to_string()))?;

        Ok(chirp)
    }

    async fn find_by_id(&self, id: ChirpId) -> Result<Option<Chirp>, ChirpError> {
        let row = sqlx::query_as::<_, ChirpRow>(
            r#"
            SELECT id, body, user_id, created_at, updated_at
            FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ChirpError::DatabaseError(e.to_string()))?;

        row.map(Chirp::try_from).transpose()
    }

    async fn list(&self, filter: &ChirpFilter) -> Result<Vec<Chirp>, ChirpError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT id, body, user_id, created_at, updated_at FROM chirps");

        if let Some(author_id) = filter.author_id {
            query.push(" WHERE user_id = ").push_bind(author_id.0);
        }

        // id breaks ties between chirps created in the same instant
        query.push(match filter.sort {
            SortOrder::Ascending => " ORDER BY created_at ASC, id ASC",
            SortOrder::Descending => " ORDER BY created_at DESC, id DESC",
        });

        let rows = query
            .build_query_as::<ChirpRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ChirpError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Chirp::try_from).collect()
    }

    async fn delete(&self, id: ChirpId) -> Result<(), ChirpError> {
        let result = sqlx::query("DELETE FROM chirps WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ChirpError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ChirpError::NotFound(id));
        }

        Ok(())
    }
}
