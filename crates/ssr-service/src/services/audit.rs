//! Account management audit trail

use ssr_core::entities::User;
use ssr_core::reports::Page;
use tracing::instrument;

use crate::dto::{AuditLogQuery, AuditLogResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::scope::AdminScope;

const DEFAULT_PER_PAGE: u32 = 50;
const MAX_PER_PAGE: u32 = 200;

pub struct AuditLogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuditLogService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Newest entries first
    #[instrument(skip(self, actor), fields(admin = %actor.email))]
    pub async fn list(&self, actor: &User, query: AuditLogQuery) -> ServiceResult<Page<AuditLogResponse>> {
        AdminScope::of(actor)?;
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
        let offset = i64::from(page - 1) * i64::from(per_page);

        let repo = self.ctx.audit_repo();
        let total_items = repo.count().await?.max(0) as u64;
        let entries = repo.list(i64::from(per_page), offset).await?;

        Ok(Page {
            items: entries.into_iter().map(AuditLogResponse::from).collect(),
            page,
            per_page,
            total_items,
            total_pages: total_items.div_ceil(u64::from(per_page)) as u32,
        })
    }
}
