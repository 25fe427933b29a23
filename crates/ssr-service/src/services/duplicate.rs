//! Duplicate inspection review and cleanup

use ssr_core::entities::{Control, User};
use ssr_core::reports::controller_ids;
use ssr_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    ControllerOption, DeleteDuplicatesRequest, DeletedResponse, DuplicateGroupResponse,
    DuplicatesQuery, DuplicatesResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::report;
use super::scope::AdminScope;

pub struct DuplicateService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DuplicateService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Duplicate groups in the filtered data, oldest first
    ///
    /// The ranger picker lists every ranger in the filtered data, so it
    /// does not shrink when one of them is selected.
    #[instrument(skip(self, actor, query), fields(admin = %actor.email))]
    pub async fn list(&self, actor: &User, query: DuplicatesQuery) -> ServiceResult<DuplicatesResponse> {
        let data = report::load(self.ctx, actor, &query.report(), None).await?;
        let controllers = controller_options(&data.records);

        let records: Vec<Control> = match query.controller_id {
            Some(id) => data
                .records
                .into_iter()
                .filter(|c| c.controller_id == Some(id))
                .collect(),
            None => data.records,
        };

        let tz = self.ctx.settings().timezone;
        let groups: Vec<DuplicateGroupResponse> = self
            .ctx
            .settings()
            .deduplicator
            .groups(&records)
            .into_iter()
            .map(|g| DuplicateGroupResponse::new(g, tz))
            .collect();
        let total_duplicates = groups.iter().map(|g| g.duplicates.len()).sum();

        Ok(DuplicatesResponse {
            total_groups: groups.len(),
            total_duplicates,
            groups,
            controllers,
        })
    }

    /// Delete the duplicates of one group, or of every group
    ///
    /// Groups are recomputed from the request's filter, so records that
    /// stopped being duplicates since the listing are kept.
    #[instrument(skip(self, actor, request), fields(admin = %actor.email, group = ?request.group_id))]
    pub async fn delete(&self, actor: &User, request: DeleteDuplicatesRequest) -> ServiceResult<DeletedResponse> {
        let scope = AdminScope::of(actor)?;
        self.ctx.confirm(&request.password)?;

        let data = report::load(self.ctx, actor, &request.query.report(), request.query.controller_id).await?;
        let deduplicator = self.ctx.settings().deduplicator;

        let ids: Vec<Snowflake> = match request.group_id {
            Some(group_id) => deduplicator
                .groups(&data.records)
                .into_iter()
                .find(|g| g.id() == group_id)
                .ok_or(DomainError::DuplicateGroupNotFound(group_id))?
                .duplicate_ids(),
            None => deduplicator.duplicate_ids(&data.records),
        };
        if ids.is_empty() {
            return Ok(DeletedResponse { deleted: 0 });
        }

        let deleted = self
            .ctx
            .control_repo()
            .delete_many(&ids, scope.association_id())
            .await?;
        info!(deleted, "Duplicate inspections deleted");
        Ok(DeletedResponse { deleted })
    }
}

/// Picker entries named after each ranger's first record
fn controller_options(records: &[Control]) -> Vec<ControllerOption> {
    controller_ids(records)
        .into_iter()
        .filter_map(|id| {
            records
                .iter()
                .find(|c| c.controller_id == Some(id))
                .map(|c| ControllerOption {
                    id,
                    name: c.controller_name.clone(),
                    login: c.controller_login().map(str::to_string),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{admin, Harness, CONFIRMATION, MAZ, TBG};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, minute, 0).unwrap()
    }

    fn inspection(id: i64, controller: i64, minute: u32, association: &str) -> Control {
        let mut c = Control::new(Snowflake::new(id));
        c.control_date = Some(at(minute));
        c.controller_id = Some(Snowflake::new(controller));
        c.controller_name = Some(format!("Strażnik {controller}"));
        c.controller_email = Some(format!("MAZSSR_{controller:03}@ranger.pl"));
        c.association_id = Some(association.to_string());
        c.license_number = Some("L-1".to_string());
        c.is_success = Some(true);
        c
    }

    fn seeded() -> Harness {
        let h = Harness::new();
        h.insert_control(inspection(1, 1, 0, MAZ));
        h.insert_control(inspection(2, 1, 10, MAZ));
        h.insert_control(inspection(3, 1, 15, MAZ));
        h.insert_control(inspection(4, 2, 0, MAZ));
        h.insert_control(inspection(5, 2, 5, MAZ));
        h.insert_control(inspection(6, 3, 0, TBG));
        h.insert_control(inspection(7, 3, 1, TBG));
        h
    }

    fn remaining(h: &Harness) -> Vec<i64> {
        let mut ids: Vec<i64> = h.controls.controls.lock().unwrap().iter().map(|c| c.id.into_inner()).collect();
        ids.sort_unstable();
        ids
    }

    #[tokio::test]
    async fn test_list_groups_and_controllers() {
        let h = seeded();
        let service = DuplicateService::new(&h.ctx);

        let response = service.list(&admin(Some(MAZ)), DuplicatesQuery::default()).await.unwrap();
        assert_eq!(response.total_groups, 2);
        assert_eq!(response.total_duplicates, 3);
        assert_eq!(response.groups[0].id, Snowflake::new(1));
        assert_eq!(response.controllers.len(), 2);
        assert_eq!(response.controllers[1].login.as_deref(), Some("MAZSSR_002"));

        let query = DuplicatesQuery {
            controller_id: Some(Snowflake::new(2)),
            ..Default::default()
        };
        let response = service.list(&admin(Some(MAZ)), query).await.unwrap();
        assert_eq!(response.total_groups, 1);
        assert_eq!(response.groups[0].id, Snowflake::new(4));
        assert_eq!(response.controllers.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_one_group() {
        let h = seeded();
        let request = DeleteDuplicatesRequest {
            query: DuplicatesQuery::default(),
            group_id: Some(Snowflake::new(4)),
            password: CONFIRMATION.to_string(),
        };
        let response = DuplicateService::new(&h.ctx).delete(&admin(None), request).await.unwrap();
        assert_eq!(response.deleted, 1);
        assert_eq!(remaining(&h), vec![1, 2, 3, 4, 6, 7]);
    }

    #[tokio::test]
    async fn test_delete_all_within_district() {
        let h = seeded();
        let request = DeleteDuplicatesRequest {
            query: DuplicatesQuery::default(),
            group_id: None,
            password: CONFIRMATION.to_string(),
        };
        let response = DuplicateService::new(&h.ctx).delete(&admin(Some(MAZ)), request).await.unwrap();
        assert_eq!(response.deleted, 3);
        assert_eq!(remaining(&h), vec![1, 4, 6, 7]);
    }

    #[tokio::test]
    async fn test_delete_unknown_group_and_bad_password() {
        let h = seeded();
        let service = DuplicateService::new(&h.ctx);

        let request = DeleteDuplicatesRequest {
            query: DuplicatesQuery::default(),
            group_id: Some(Snowflake::new(2)),
            password: CONFIRMATION.to_string(),
        };
        let err = service.delete(&admin(None), request).await.unwrap_err();
        assert_eq!(err.status_code(), 404);

        let request = DeleteDuplicatesRequest {
            query: DuplicatesQuery::default(),
            group_id: None,
            password: "zle".to_string(),
        };
        let err = service.delete(&admin(None), request).await.unwrap_err();
        assert_eq!(err.error_code(), "CONFIRMATION_FAILED");
        assert_eq!(remaining(&h).len(), 7);
    }
}
