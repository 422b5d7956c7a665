//! Conversation log repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::traits::ConversationLog;
use crate::models::{ConversationTurn, CreateTurnRequest};
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct ConversationRepository {
    pool: PgPool,
}

impl ConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationLog for ConversationRepository {
    /// Append one turn. A request with no optional fields set writes
    /// through the reduced column set, which is the retry path for
    /// schema-related write failures.
    async fn append_turn(&self, request: CreateTurnRequest) -> Result<i64> {
        let reduced = request.intent.is_none()
            && request.session_id.is_none()
            && request.metadata.is_none();

        let row: (i64,) = if reduced {
            sqlx::query_as(
                r#"
                INSERT INTO conversations (user_id, role, content)
                VALUES ($1, $2, $3)
                RETURNING id
                "#
            )
            .bind(request.user_id)
            .bind(request.role.db_code())
            .bind(&request.content)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_as(
                r#"
                INSERT INTO conversations (user_id, role, content, intent, session_id, metadata)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id
                "#
            )
            .bind(request.user_id)
            .bind(request.role.db_code())
            .bind(&request.content)
            .bind(request.intent.as_deref())
            .bind(request.session_id.as_deref())
            .bind(&request.metadata)
            .fetch_one(&self.pool)
            .await?
        };

        Ok(row.0)
    }

    /// Most recent turns first; ids break ties between rows written in
    /// the same instant so user/assistant pairs keep their order
    async fn load_recent_turns(&self, user_id: i64, limit: i64) -> Result<Vec<ConversationTurn>> {
        let turns = sqlx::query_as::<_, ConversationTurn>(
            r#"
            SELECT id, user_id, role, content, intent, session_id, metadata, created_at
            FROM conversations
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(turns)
    }
}
