//! Inspection records: submission, listing, export and deletion

use chrono::Utc;
use ssr_core::entities::{Control, User};
use ssr_core::reports::export::controls_csv;
use ssr_core::reports::{map_points, sort_controls, MapPoint, Page};
use ssr_core::{DomainError, GeoPosition};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    ControlListQuery, ControlListResponse, ControlResponse, CsvExport, DeleteControlsRequest,
    DeletedResponse, ReportQuery, SubmitControlRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::report;
use super::scope::AdminScope;

const DEFAULT_PER_PAGE: u32 = 50;

pub struct ControlService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ControlService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record an inspection for the calling ranger
    #[instrument(skip(self, ranger, request), fields(ranger = %ranger.email))]
    pub async fn submit(&self, ranger: &User, request: SubmitControlRequest) -> ServiceResult<ControlResponse> {
        if !ranger.is_ranger() {
            return Err(DomainError::RangerRequired.into());
        }
        request.validate()?;

        let position = GeoPosition::from_parts(request.latitude, request.longitude);
        if request.latitude.is_some() != request.longitude.is_some() {
            return Err(ServiceError::validation("latitude and longitude go together"));
        }

        let mut control = Control::new(self.ctx.generate_id());
        control.control_date = Some(request.control_date.unwrap_or_else(Utc::now));
        control.position = position;
        control.controller_id = Some(ranger.id);
        control.controller_name = request
            .controller_name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| ranger.display_name.clone());
        control.controller_email = Some(ranger.email.clone());
        control.association_id = ranger.association_id.clone();
        control.association_name = ranger.association_name.clone();
        control.club_name = request.club_name;
        control.group_code = request.group_code;
        control.license_number = request.license_number;
        control.is_success = request.is_success;
        control.rejection_reasons = request
            .rejection_reasons
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();

        self.ctx.control_repo().create(&control).await?;
        info!(control_id = %control.id, "Inspection recorded");
        Ok(ControlResponse::new(control, self.ctx.settings().timezone))
    }

    /// One page of the deduplicated, filtered and sorted inspection list
    #[instrument(skip(self, actor, query), fields(admin = %actor.email))]
    pub async fn list(&self, actor: &User, query: ControlListQuery) -> ServiceResult<ControlListResponse> {
        let data = report::load(self.ctx, actor, &query.report(), None).await?;
        let loaded = data.records.len();
        let mut records = self.ctx.settings().deduplicator.retain_unique(data.records);
        let hidden_duplicates = loaded - records.len();

        sort_controls(&mut records, query.sort, query.direction);
        let tz = self.ctx.settings().timezone;
        let page = Page::slice(
            records,
            query.page.unwrap_or(1),
            query.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
        .map(|c| ControlResponse::new(c, tz));

        Ok(ControlListResponse {
            page,
            clubs: data.clubs,
            hidden_duplicates,
        })
    }

    /// CSV of the deduplicated, filtered records
    #[instrument(skip(self, actor, query), fields(admin = %actor.email))]
    pub async fn export(&self, actor: &User, query: ReportQuery) -> ServiceResult<CsvExport> {
        let data = report::load(self.ctx, actor, &query, None).await?;
        let mut records = self.ctx.settings().deduplicator.retain_unique(data.records);
        sort_controls(&mut records, Default::default(), Default::default());

        info!(rows = records.len(), "Inspection export generated");
        Ok(CsvExport {
            filename: format!("kontrole_{}.csv", query.preset.as_str()),
            content: controls_csv(&records, self.ctx.settings().timezone),
            rows: records.len(),
        })
    }

    /// Map markers for the filtered records that carry a position
    #[instrument(skip(self, actor, query))]
    pub async fn map(&self, actor: &User, query: ReportQuery) -> ServiceResult<Vec<MapPoint>> {
        let data = report::load(self.ctx, actor, &query, None).await?;
        let records = self.ctx.settings().deduplicator.retain_unique(data.records);
        Ok(map_points(&records))
    }

    /// Delete selected inspections after the confirmation password
    ///
    /// District admins can only delete inspections of their own district;
    /// ids outside it are silently left alone.
    #[instrument(skip(self, actor, request), fields(admin = %actor.email, count = request.ids.len()))]
    pub async fn delete(&self, actor: &User, request: DeleteControlsRequest) -> ServiceResult<DeletedResponse> {
        let scope = AdminScope::of(actor)?;
        request.validate()?;
        self.ctx.confirm(&request.password)?;

        let deleted = self
            .ctx
            .control_repo()
            .delete_many(&request.ids, scope.association_id())
            .await?;
        info!(deleted, "Inspections deleted");
        Ok(DeletedResponse { deleted })
    }
}
