//! Statistics views over deduplicated inspection records

use ssr_core::entities::{Control, User};
use ssr_core::reports::export::ranger_stats_csv;
use ssr_core::reports::{period_stats, ranger_stats, Granularity, RangerStats};
use tracing::instrument;

use crate::dto::{CsvExport, PeriodStatsResponse, ReportQuery};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::report;

pub struct StatsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatsService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, actor, query), fields(admin = %actor.email))]
    pub async fn rangers(&self, actor: &User, query: &ReportQuery) -> ServiceResult<Vec<RangerStats>> {
        let records = self.records(actor, query).await?;
        Ok(ranger_stats(&records))
    }

    #[instrument(skip(self, actor, query), fields(admin = %actor.email))]
    pub async fn rangers_csv(&self, actor: &User, query: &ReportQuery) -> ServiceResult<CsvExport> {
        let stats = self.rangers(actor, query).await?;
        Ok(CsvExport {
            filename: format!("statystyki_straznikow_{}.csv", query.preset.as_str()),
            content: ranger_stats_csv(&stats),
            rows: stats.len(),
        })
    }

    /// Chart buckets: months for year-long presets, days otherwise
    #[instrument(skip(self, actor, query), fields(admin = %actor.email))]
    pub async fn periods(&self, actor: &User, query: &ReportQuery) -> ServiceResult<PeriodStatsResponse> {
        let records = self.records(actor, query).await?;
        let granularity = if query.preset.groups_by_month() {
            Granularity::Month
        } else {
            Granularity::Day
        };
        Ok(PeriodStatsResponse {
            granularity: match granularity {
                Granularity::Day => "day",
                Granularity::Month => "month",
            },
            buckets: period_stats(&records, granularity, self.ctx.settings().timezone),
        })
    }

    async fn records(&self, actor: &User, query: &ReportQuery) -> ServiceResult<Vec<Control>> {
        let data = report::load(self.ctx, actor, query, None).await?;
        let mut records = self.ctx.settings().deduplicator.retain_unique(data.records);
        records.sort_by_key(|c| (c.control_date, c.id));
        Ok(records)
    }
}
