//! PostgreSQL implementation of ControlRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ssr_core::entities::Control;
use ssr_core::reports::ControlQuery;
use ssr_core::traits::{ControlRepository, RepoResult};
use ssr_core::value_objects::Snowflake;

use crate::mappers::ControlInsert;
use crate::models::ControlModel;

use super::error::map_db_error;

const CONTROL_SELECT: &str = r"
    SELECT c.id, c.control_date, c.latitude, c.longitude, c.controller_id, c.controller_name,
           u.email AS controller_email, c.association_id, c.association_name,
           c.association_club_name, c.group_code, c.license_number, c.is_success,
           c.rejection_reasons, c.created_at
    FROM ssr_controls c
    LEFT JOIN users u ON u.id = c.controller_id
";

/// PostgreSQL implementation of ControlRepository
#[derive(Clone)]
pub struct PgControlRepository {
    pool: PgPool,
}

impl PgControlRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ControlRepository for PgControlRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Control>> {
        let result = sqlx::query_as::<_, ControlModel>(&format!("{CONTROL_SELECT} WHERE c.id = $1"))
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Control::from))
    }

    /// Comparisons against a NULL `control_date` are never true, so undated
    /// records drop out as soon as either bound is set.
    #[instrument(skip(self))]
    async fn find(&self, query: &ControlQuery) -> RepoResult<Vec<Control>> {
        let rows = sqlx::query_as::<_, ControlModel>(&format!(
            r"{CONTROL_SELECT}
            WHERE ($1::TEXT IS NULL OR c.association_id = $1)
              AND ($2::TIMESTAMPTZ IS NULL OR c.control_date >= $2)
              AND ($3::TIMESTAMPTZ IS NULL OR c.control_date < $3)
              AND ($4::TEXT IS NULL OR c.association_club_name = $4)
              AND (NOT $5 OR c.is_success IS DISTINCT FROM TRUE)
              AND ($6::BIGINT IS NULL OR c.controller_id = $6)
            ORDER BY c.control_date DESC NULLS LAST, c.id DESC
            "
        ))
        .bind(query.association_id.as_deref())
        .bind(query.range.from)
        .bind(query.range.until)
        .bind(query.club.as_deref())
        .bind(query.rejected_only)
        .bind(query.controller_id.map(Snowflake::into_inner))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Control::from).collect())
    }

    #[instrument(skip(self, control), fields(id = %control.id))]
    async fn create(&self, control: &Control) -> RepoResult<()> {
        let insert = ControlInsert::new(control);
        sqlx::query(
            r"
            INSERT INTO ssr_controls (id, control_date, latitude, longitude, controller_id,
                                      controller_name, association_id, association_name,
                                      association_club_name, group_code, license_number,
                                      is_success, rejection_reasons, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ",
        )
        .bind(insert.id)
        .bind(control.control_date)
        .bind(insert.latitude)
        .bind(insert.longitude)
        .bind(insert.controller_id)
        .bind(&control.controller_name)
        .bind(&control.association_id)
        .bind(&control.association_name)
        .bind(&control.club_name)
        .bind(&control.group_code)
        .bind(&control.license_number)
        .bind(control.is_success)
        .bind(&control.rejection_reasons)
        .bind(control.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn delete_many(&self, ids: &[Snowflake], association_id: Option<&str>) -> RepoResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();
        let result = sqlx::query(
            r"
            DELETE FROM ssr_controls
            WHERE id = ANY($1) AND ($2::TEXT IS NULL OR association_id = $2)
            ",
        )
        .bind(&ids)
        .bind(association_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
