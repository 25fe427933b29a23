//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers from domain entities to responses

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AuditLogQuery, ControlListQuery, CreateUsersRequest, DeleteControlsRequest,
    DeleteDuplicatesRequest, DeleteUsersRequest, DuplicatesQuery, LoginRequest,
    RefreshTokenRequest, RejectionReasonQuery, RejectionReasonRequest, ReportQuery,
    ResolveLoginsRequest, SubmitControlRequest,
};

pub use responses::{
    AssociationResponse, AuditLogResponse, AuthResponse, ControlListResponse, ControlResponse,
    ControllerOption, CreateUsersResponse, CreatedAccount, CsvExport, CurrentUserResponse,
    DeleteUserResult, DeleteUsersResponse, DeletedResponse, DuplicateGroupResponse,
    DuplicatesResponse, HealthResponse, PeriodStatsResponse, ReadinessResponse,
    RejectionReasonChange, RejectionReasonResponse, ResolveLoginsResponse,
};
