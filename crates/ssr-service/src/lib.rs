//! # ssr-service
//!
//! Application layer: account provisioning, inspection reports, duplicate
//! cleanup, statistics and the DTOs the HTTP layer exchanges.

pub mod dto;
pub mod services;

pub use services::{
    AdminScope, AssociationService, AuditLogService, AuthService, ControlService,
    DuplicateService, ProvisioningService, RejectionReasonService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, ServiceSettings, StatsService,
};
