//! PostgreSQL implementation of AssociationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ssr_core::entities::Association;
use ssr_core::error::DomainError;
use ssr_core::traits::{AssociationRepository, RepoResult};

use crate::models::AssociationModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgAssociationRepository {
    pool: PgPool,
}

impl PgAssociationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssociationRepository for PgAssociationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Association>> {
        let result = sqlx::query_as::<_, AssociationModel>(
            r"
            SELECT id, name, login_prefix, created_at
            FROM associations
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Association::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Association>> {
        let rows = sqlx::query_as::<_, AssociationModel>(
            r"
            SELECT id, name, login_prefix, created_at
            FROM associations
            ORDER BY name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Association::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, association: &Association) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO associations (id, name, login_prefix, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(&association.id)
        .bind(&association.name)
        .bind(&association.login_prefix)
        .bind(association.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::LoginPrefixExists(association.login_prefix.clone()))
        })?;

        Ok(())
    }
}
