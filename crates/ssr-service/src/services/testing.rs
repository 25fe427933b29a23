//! In-memory repositories for service tests

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ssr_common::{ConfirmationSecret, JwtService};
use ssr_core::entities::{Association, AuditLogEntry, Control, RejectionReason, User};
use ssr_core::reports::ControlQuery;
use ssr_core::traits::{
    AssociationRepository, AuditLogRepository, ControlRepository, RejectionReasonRepository,
    RepoResult, UserRepository,
};
use ssr_core::{DomainError, Roles, Snowflake, SnowflakeGenerator};
use ssr_db::PgPool;

use super::context::{ServiceContext, ServiceSettings};

pub const MAZ: &str = "GMUe0Hd56WJ7U0HQ3qpa";
pub const TBG: &str = "hpAlqBYPhqCdlSJVc9RG";
pub const CONFIRMATION: &str = "potwierdzam";

#[derive(Default)]
pub struct MemoryUsers {
    pub users: Mutex<Vec<(User, String)>>,
    /// Addresses whose insert or delete fails
    pub failing: Mutex<HashSet<String>>,
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|(u, _)| u.email == email).map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn find_emails_by_prefix(&self, prefix: &str) -> RepoResult<Vec<String>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .filter(|(u, _)| u.email.starts_with(prefix))
            .map(|(u, _)| u.email.clone())
            .collect())
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        if self.failing.lock().unwrap().contains(&user.email) {
            return Err(DomainError::DatabaseError("connection reset".to_string()));
        }
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists(user.email.clone()));
        }
        users.push((user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        let mut users = self.users.lock().unwrap();
        let failing = self.failing.lock().unwrap();
        if users.iter().any(|(u, _)| u.id == id && failing.contains(&u.email)) {
            return Err(DomainError::DatabaseError("connection reset".to_string()));
        }
        let before = users.len();
        users.retain(|(u, _)| u.id != id);
        Ok(users.len() < before)
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|(u, _)| u.id == id).map(|(_, h)| h.clone()))
    }
}

pub struct MemoryAssociations(pub Vec<Association>);

impl Default for MemoryAssociations {
    fn default() -> Self {
        Self(vec![
            Association::new(MAZ, "Okręg Mazowiecki", "MAZSSR_"),
            Association::new(TBG, "Okręg PZW w Tarnobrzegu", "TBGSSR_"),
        ])
    }
}

#[async_trait]
impl AssociationRepository for MemoryAssociations {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Association>> {
        Ok(self.0.iter().find(|a| a.id == id).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<Association>> {
        Ok(self.0.clone())
    }

    async fn create(&self, _association: &Association) -> RepoResult<()> {
        Err(DomainError::InternalError("read-only".to_string()))
    }
}

#[derive(Default)]
pub struct MemoryControls {
    pub controls: Mutex<Vec<Control>>,
}

#[async_trait]
impl ControlRepository for MemoryControls {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Control>> {
        Ok(self.controls.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn find(&self, query: &ControlQuery) -> RepoResult<Vec<Control>> {
        let mut found: Vec<Control> = self
            .controls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| query.matches(c))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.control_date.cmp(&a.control_date));
        Ok(found)
    }

    async fn create(&self, control: &Control) -> RepoResult<()> {
        self.controls.lock().unwrap().push(control.clone());
        Ok(())
    }

    async fn delete_many(&self, ids: &[Snowflake], association_id: Option<&str>) -> RepoResult<u64> {
        let mut controls = self.controls.lock().unwrap();
        let before = controls.len();
        controls.retain(|c| {
            let in_scope = association_id.map_or(true, |a| c.association_id.as_deref() == Some(a));
            !(ids.contains(&c.id) && in_scope)
        });
        Ok((before - controls.len()) as u64)
    }
}

#[derive(Default)]
pub struct MemoryRejections {
    pub reasons: Mutex<Vec<RejectionReason>>,
}

#[async_trait]
impl RejectionReasonRepository for MemoryRejections {
    async fn list(&self, association_id: Option<&str>) -> RepoResult<Vec<RejectionReason>> {
        Ok(self
            .reasons
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.visible_to(association_id))
            .cloned()
            .collect())
    }

    async fn add(&self, reason: &RejectionReason) -> RepoResult<bool> {
        let mut reasons = self.reasons.lock().unwrap();
        if reasons
            .iter()
            .any(|r| r.reason == reason.reason && r.association_id == reason.association_id)
        {
            return Ok(false);
        }
        reasons.push(reason.clone());
        Ok(true)
    }

    async fn remove(&self, reason: &str, association_id: Option<&str>) -> RepoResult<bool> {
        let mut reasons = self.reasons.lock().unwrap();
        let before = reasons.len();
        reasons.retain(|r| !(r.reason == reason && r.association_id.as_deref() == association_id));
        Ok(reasons.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryAudit {
    pub entries: Mutex<Vec<AuditLogEntry>>,
}

#[async_trait]
impl AuditLogRepository for MemoryAudit {
    async fn create(&self, entry: &AuditLogEntry) -> RepoResult<()> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<AuditLogEntry>> {
        let mut entries = self.entries.lock().unwrap().clone();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(entries
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.entries.lock().unwrap().len() as i64)
    }
}

/// Context over in-memory repositories, with handles kept for assertions
pub struct Harness {
    pub ctx: ServiceContext,
    pub users: Arc<MemoryUsers>,
    pub controls: Arc<MemoryControls>,
    pub rejections: Arc<MemoryRejections>,
    pub audit: Arc<MemoryAudit>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_settings(ServiceSettings::default())
    }

    pub fn with_settings(settings: ServiceSettings) -> Self {
        let users = Arc::new(MemoryUsers::default());
        let controls = Arc::new(MemoryControls::default());
        let rejections = Arc::new(MemoryRejections::default());
        let audit = Arc::new(MemoryAudit::default());

        let ctx = ServiceContext::builder()
            .pool(PgPool::connect_lazy("postgres://localhost/ssr_unused").unwrap())
            .user_repo(users.clone())
            .association_repo(Arc::new(MemoryAssociations::default()))
            .control_repo(controls.clone())
            .rejection_repo(rejections.clone())
            .audit_repo(audit.clone())
            .jwt_service(Arc::new(JwtService::new("test-secret-key-that-is-long-enough", 900, 3600)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .confirmation(ConfirmationSecret::new(CONFIRMATION).unwrap())
            .settings(settings)
            .build()
            .unwrap();

        Self {
            ctx,
            users,
            controls,
            rejections,
            audit,
        }
    }

    /// Store an account directly, bypassing provisioning
    pub fn insert_user(&self, user: &User, password_hash: &str) {
        self.users
            .users
            .lock()
            .unwrap()
            .push((user.clone(), password_hash.to_string()));
    }

    pub fn insert_control(&self, control: Control) {
        self.controls.controls.lock().unwrap().push(control);
    }

    pub fn user_emails(&self) -> Vec<String> {
        let mut emails: Vec<String> = self
            .users
            .users
            .lock()
            .unwrap()
            .iter()
            .map(|(u, _)| u.email.clone())
            .collect();
        emails.sort();
        emails
    }
}

pub fn admin(association: Option<&str>) -> User {
    let mut user = User::new(Snowflake::new(900), "admin@ranger.pl".to_string(), Roles::ADMIN);
    user.association_id = association.map(str::to_string);
    user
}

pub fn ranger(id: i64, email: &str, association: &str) -> User {
    User::ranger(
        Snowflake::new(id),
        email.to_string(),
        association.to_string(),
        "Okręg".to_string(),
        "1.0.0".to_string(),
    )
}
