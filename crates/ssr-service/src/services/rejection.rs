//! Rejection reasons offered to rangers in the mobile app

use ssr_core::entities::{RejectionReason, User};
use ssr_core::DomainError;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    RejectionReasonChange, RejectionReasonQuery, RejectionReasonRequest, RejectionReasonResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::scope::AdminScope;

pub struct RejectionReasonService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RejectionReasonService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Global reasons plus those of the caller's district
    ///
    /// Global admins see every reason unless they ask for one district.
    #[instrument(skip(self, actor, query), fields(user = %actor.email))]
    pub async fn list(
        &self,
        actor: &User,
        query: RejectionReasonQuery,
    ) -> ServiceResult<Vec<RejectionReasonResponse>> {
        let repo = self.ctx.rejection_repo();
        let mut reasons = if actor.is_admin() {
            let association_id = AdminScope::of(actor)?.narrow(query.association_id.as_deref())?;
            repo.list(association_id.as_deref()).await?
        } else {
            match actor.association_id.as_deref() {
                Some(id) => repo.list(Some(id)).await?,
                None => repo
                    .list(None)
                    .await?
                    .into_iter()
                    .filter(RejectionReason::is_global)
                    .collect(),
            }
        };
        reasons.sort_by(|a, b| a.reason.cmp(&b.reason));
        Ok(reasons.into_iter().map(RejectionReasonResponse::from).collect())
    }

    #[instrument(skip(self, actor, request), fields(admin = %actor.email))]
    pub async fn add(&self, actor: &User, request: RejectionReasonRequest) -> ServiceResult<RejectionReasonChange> {
        let (reason, association_id) = self.authorize(actor, &request).await?;
        let entry = RejectionReason::new(self.ctx.generate_id(), reason, association_id);
        let changed = self.ctx.rejection_repo().add(&entry).await?;
        if changed {
            info!(reason = %entry.reason, association = ?entry.association_id, "Rejection reason added");
        }
        Ok(RejectionReasonChange {
            reason: entry.reason,
            changed,
        })
    }

    #[instrument(skip(self, actor, request), fields(admin = %actor.email))]
    pub async fn remove(
        &self,
        actor: &User,
        request: RejectionReasonRequest,
    ) -> ServiceResult<RejectionReasonChange> {
        let (reason, association_id) = self.authorize(actor, &request).await?;
        let changed = self
            .ctx
            .rejection_repo()
            .remove(&reason, association_id.as_deref())
            .await?;
        if changed {
            info!(reason = %reason, association = ?association_id, "Rejection reason removed");
        }
        Ok(RejectionReasonChange { reason, changed })
    }

    /// Trimmed reason and the list it targets
    ///
    /// District admins always target their own district; only global
    /// admins may change the global list.
    async fn authorize(
        &self,
        actor: &User,
        request: &RejectionReasonRequest,
    ) -> ServiceResult<(String, Option<String>)> {
        let scope = AdminScope::of(actor)?;
        request.validate()?;
        self.ctx.confirm(&request.password)?;

        let reason = request.reason.trim();
        if reason.is_empty() {
            return Err(ServiceError::validation("reason must not be blank"));
        }

        let requested = request
            .association_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());
        let association_id = match (&scope, requested) {
            (AdminScope::Global, None) => None,
            (AdminScope::Global, Some(id)) => {
                self.ctx
                    .association_repo()
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| DomainError::AssociationNotFound(id.to_string()))?;
                Some(id.to_string())
            }
            (AdminScope::District(own), requested) => {
                if let Some(id) = requested {
                    scope.ensure_can_manage(id)?;
                }
                Some(own.clone())
            }
        };
        Ok((reason.to_string(), association_id))
    }
}
