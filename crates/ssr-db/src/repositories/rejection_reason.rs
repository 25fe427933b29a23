//! PostgreSQL implementation of RejectionReasonRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ssr_core::entities::RejectionReason;
use ssr_core::traits::{RejectionReasonRepository, RepoResult};

use crate::models::RejectionReasonModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgRejectionReasonRepository {
    pool: PgPool,
}

impl PgRejectionReasonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RejectionReasonRepository for PgRejectionReasonRepository {
    #[instrument(skip(self))]
    async fn list(&self, association_id: Option<&str>) -> RepoResult<Vec<RejectionReason>> {
        let rows = sqlx::query_as::<_, RejectionReasonModel>(
            r"
            SELECT id, reason, association_id, created_at
            FROM possible_control_rejections
            WHERE $1::TEXT IS NULL OR association_id IS NULL OR association_id = $1
            ORDER BY reason
            ",
        )
        .bind(association_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(RejectionReason::from).collect())
    }

    #[instrument(skip(self))]
    async fn add(&self, reason: &RejectionReason) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO possible_control_rejections (id, reason, association_id, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(reason.id.into_inner())
        .bind(&reason.reason)
        .bind(&reason.association_id)
        .bind(reason.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn remove(&self, reason: &str, association_id: Option<&str>) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM possible_control_rejections
            WHERE reason = $1 AND association_id IS NOT DISTINCT FROM $2
            ",
        )
        .bind(reason)
        .bind(association_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
