//! Inspection records as the report views load them

use chrono::Utc;
use ssr_core::entities::{Control, User};
use ssr_core::reports::ControlQuery;
use ssr_core::Snowflake;

use crate::dto::ReportQuery;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::scope::AdminScope;

/// Filtered records plus the club names seen before the club filter applied
pub(crate) struct ReportData {
    pub records: Vec<Control>,
    pub clubs: Vec<String>,
}

/// Load the records a report shows to `actor`
///
/// District admins only ever see their own district. The club filter is
/// applied in memory so the club list can be built from the same rows.
pub(crate) async fn load(
    ctx: &ServiceContext,
    actor: &User,
    request: &ReportQuery,
    controller_id: Option<Snowflake>,
) -> ServiceResult<ReportData> {
    let scope = AdminScope::of(actor)?;
    let association_id = scope.narrow(request.association_id.as_deref())?;
    let query = request
        .filter()
        .resolve(association_id.as_deref(), Utc::now(), ctx.settings().timezone)?
        .with_controller(controller_id);

    let rows = ctx
        .control_repo()
        .find(&ControlQuery {
            club: None,
            ..query.clone()
        })
        .await?;

    let mut clubs: Vec<String> = rows
        .iter()
        .filter_map(|c| c.club_name.as_deref())
        .filter(|club| !club.trim().is_empty())
        .map(str::to_string)
        .collect();
    clubs.sort();
    clubs.dedup();

    let records = match &query.club {
        Some(_) => rows.into_iter().filter(|c| query.matches(c)).collect(),
        None => rows,
    };

    Ok(ReportData {
        records,
        clubs,
    })
}
