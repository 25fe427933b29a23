//! Service context - dependency container for services

use std::sync::Arc;

use ssr_common::{AppConfig, ConfirmationSecret, JwtService};
use ssr_core::provisioning::DEFAULT_PASSWORD_LENGTH;
use ssr_core::reports::{Deduplicator, ReportTimezone};
use ssr_core::traits::{
    AssociationRepository, AuditLogRepository, ControlRepository, RejectionReasonRepository,
    UserRepository,
};
use ssr_core::{Snowflake, SnowflakeGenerator};
use ssr_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Tunables the services read on every request
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Domain of generated ranger logins
    pub login_domain: String,
    pub password_length: usize,
    /// App version written to profiles when a request names none
    pub default_app_version: String,
    pub deduplicator: Deduplicator,
    pub timezone: ReportTimezone,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            login_domain: "ranger.pl".to_string(),
            password_length: DEFAULT_PASSWORD_LENGTH,
            default_app_version: "1.0.0".to_string(),
            deduplicator: Deduplicator::default(),
            timezone: ReportTimezone::default(),
        }
    }
}

impl ServiceSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            login_domain: config.provisioning.login_domain.clone(),
            password_length: config.provisioning.password_length,
            default_app_version: config.provisioning.default_app_version.clone(),
            deduplicator: Deduplicator::from_minutes(config.reports.dedup_window_minutes),
            timezone: config.reports.timezone,
        }
    }
}

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,

    user_repo: Arc<dyn UserRepository>,
    association_repo: Arc<dyn AssociationRepository>,
    control_repo: Arc<dyn ControlRepository>,
    rejection_repo: Arc<dyn RejectionReasonRepository>,
    audit_repo: Arc<dyn AuditLogRepository>,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    confirmation: ConfirmationSecret,
    settings: Arc<ServiceSettings>,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::default()
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn association_repo(&self) -> &dyn AssociationRepository {
        self.association_repo.as_ref()
    }

    pub fn control_repo(&self) -> &dyn ControlRepository {
        self.control_repo.as_ref()
    }

    pub fn rejection_repo(&self) -> &dyn RejectionReasonRepository {
        self.rejection_repo.as_ref()
    }

    pub fn audit_repo(&self) -> &dyn AuditLogRepository {
        self.audit_repo.as_ref()
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn settings(&self) -> &ServiceSettings {
        self.settings.as_ref()
    }

    /// Check the password that gates irreversible operations
    pub fn confirm(&self, password: &str) -> ServiceResult<()> {
        self.confirmation.check(password).map_err(ServiceError::from)
    }

    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ServiceContext`]
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    association_repo: Option<Arc<dyn AssociationRepository>>,
    control_repo: Option<Arc<dyn ControlRepository>>,
    rejection_repo: Option<Arc<dyn RejectionReasonRepository>>,
    audit_repo: Option<Arc<dyn AuditLogRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    confirmation: Option<ConfirmationSecret>,
    settings: ServiceSettings,
}

impl ServiceContextBuilder {
    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn association_repo(mut self, repo: Arc<dyn AssociationRepository>) -> Self {
        self.association_repo = Some(repo);
        self
    }

    pub fn control_repo(mut self, repo: Arc<dyn ControlRepository>) -> Self {
        self.control_repo = Some(repo);
        self
    }

    pub fn rejection_repo(mut self, repo: Arc<dyn RejectionReasonRepository>) -> Self {
        self.rejection_repo = Some(repo);
        self
    }

    pub fn audit_repo(mut self, repo: Arc<dyn AuditLogRepository>) -> Self {
        self.audit_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn confirmation(mut self, secret: ConfirmationSecret) -> Self {
        self.confirmation = Some(secret);
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Repositories backed by `pool`
    pub fn postgres(self, pool: PgPool) -> Self {
        self.user_repo(Arc::new(ssr_db::PgUserRepository::new(pool.clone())))
            .association_repo(Arc::new(ssr_db::PgAssociationRepository::new(pool.clone())))
            .control_repo(Arc::new(ssr_db::PgControlRepository::new(pool.clone())))
            .rejection_repo(Arc::new(ssr_db::PgRejectionReasonRepository::new(pool.clone())))
            .audit_repo(Arc::new(ssr_db::PgAuditLogRepository::new(pool.clone())))
            .pool(pool)
    }

    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            pool: required(self.pool, "pool")?,
            user_repo: required(self.user_repo, "user_repo")?,
            association_repo: required(self.association_repo, "association_repo")?,
            control_repo: required(self.control_repo, "control_repo")?,
            rejection_repo: required(self.rejection_repo, "rejection_repo")?,
            audit_repo: required(self.audit_repo, "audit_repo")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            snowflake_generator: self
                .snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::default())),
            confirmation: required(self.confirmation, "confirmation")?,
            settings: Arc::new(self.settings),
        })
    }
}
