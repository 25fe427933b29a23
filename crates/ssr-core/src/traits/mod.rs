mod repositories;

pub use repositories::{
    AssociationRepository, AuditLogRepository, ControlRepository, RejectionReasonRepository,
    RepoResult, UserRepository,
};
