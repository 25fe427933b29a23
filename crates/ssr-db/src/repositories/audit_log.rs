//! PostgreSQL implementation of AuditLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ssr_core::entities::AuditLogEntry;
use ssr_core::traits::{AuditLogRepository, RepoResult};

use crate::models::AuditLogModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    #[instrument(skip(self), fields(action = %entry.action, user = %entry.user_email))]
    async fn create(&self, entry: &AuditLogEntry) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_mngmnt_logs (id, date, action, admin_email, user_email, success)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(entry.id.into_inner())
        .bind(entry.date)
        .bind(entry.action.as_str())
        .bind(&entry.admin_email)
        .bind(&entry.user_email)
        .bind(entry.success)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<AuditLogEntry>> {
        let rows = sqlx::query_as::<_, AuditLogModel>(
            r"
            SELECT id, date, action, admin_email, user_email, success
            FROM user_mngmnt_logs
            ORDER BY date DESC, id DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(AuditLogEntry::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_mngmnt_logs")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
