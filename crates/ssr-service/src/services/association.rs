//! Districts an administrator may manage

use ssr_core::entities::User;
use tracing::instrument;

use crate::dto::AssociationResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::scope::AdminScope;

pub struct AssociationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AssociationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, actor), fields(admin = %actor.email))]
    pub async fn list(&self, actor: &User) -> ServiceResult<Vec<AssociationResponse>> {
        let scope = AdminScope::of(actor)?;
        let associations = self.ctx.association_repo().list().await?;
        Ok(associations
            .into_iter()
            .filter(|a| scope.can_manage(&a.id))
            .map(AssociationResponse::from)
            .collect())
    }
}
