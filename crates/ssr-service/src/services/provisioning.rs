//! Ranger account provisioning
//!
//! Batch creation continues the numbering of the association's logins,
//! batch deletion removes accounts by address. Every account touched is
//! written to the audit log, and a failure for one account never stops
//! the rest of the batch.

use ssr_common::hash_password;
use ssr_core::entities::{Association, AuditLogEntry, User};
use ssr_core::provisioning::{
    allocation_plan, expand_selection, generate_password, highest_suffix, MAX_BATCH, MAX_SELECTION,
};
use ssr_core::reports::export::credentials_csv;
use ssr_core::{DomainError, LoginPattern};
use tracing::{error, info, instrument, warn};
use validator::Validate;

use crate::dto::{
    CreateUsersRequest, CreateUsersResponse, CreatedAccount, DeleteUserResult,
    DeleteUsersResponse, ResolveLoginsRequest, ResolveLoginsResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::scope::AdminScope;

const USER_DELETED: &str = "User deleted successfully";
const USER_MISSING: &str = "User does not exist";
const INTERNAL_ERROR: &str = "Internal error";

pub struct ProvisioningService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProvisioningService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, actor, request), fields(admin = %actor.email, association = %request.association_id))]
    pub async fn create_users(
        &self,
        actor: &User,
        request: CreateUsersRequest,
    ) -> ServiceResult<CreateUsersResponse> {
        request.validate()?;
        let association = self.managed_association(actor, &request.association_id).await?;
        let pattern = self.pattern(&association);

        let emails = match request.email_ids.as_deref() {
            Some(ids) if !ids.is_empty() => explicit_emails(&pattern, ids)?,
            _ => {
                let count = request
                    .count
                    .ok_or_else(|| ServiceError::validation("count or emailIds is required"))?;
                self.next_emails(&pattern, count.min(MAX_BATCH)).await?
            }
        };

        let association_name = request
            .association_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| association.name.clone());
        let app_version = request
            .app_version
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.ctx.settings().default_app_version.clone());

        let mut users = Vec::with_capacity(emails.len());
        for email in emails {
            let profile = NewRanger {
                association_id: &association.id,
                association_name: &association_name,
                app_version: &app_version,
            };
            users.push(self.create_one(actor, email, &profile).await);
        }

        let credentials = credentials_csv(users.iter().filter_map(|u| match u {
            CreatedAccount::Created { email, password, .. } => Some((email.as_str(), password.as_str())),
            _ => None,
        }));
        info!(requested = users.len(), "Account batch processed");

        Ok(CreateUsersResponse {
            success: true,
            users,
            credentials_csv: credentials,
        })
    }

    #[instrument(skip(self, actor, emails), fields(admin = %actor.email, count = emails.len()))]
    pub async fn delete_users(&self, actor: &User, emails: Vec<String>) -> ServiceResult<DeleteUsersResponse> {
        let scope = AdminScope::of(actor)?;
        if emails.len() > MAX_SELECTION {
            return Err(ServiceError::validation(format!(
                "at most {MAX_SELECTION} accounts per request"
            )));
        }

        let mut results = Vec::with_capacity(emails.len());
        for email in emails.iter().map(|e| e.trim()).filter(|e| !e.is_empty()) {
            let result = self.delete_one(actor, &scope, email).await;
            self.audit(AuditLogEntry::deleted(
                self.ctx.generate_id(),
                &actor.email,
                email,
                result.success,
            ))
            .await;
            results.push(result);
        }

        Ok(DeleteUsersResponse {
            success: true,
            results,
        })
    }

    /// Addresses a deletion selection expands to, without touching anything
    #[instrument(skip(self, actor, request), fields(association = %request.association_id))]
    pub async fn resolve_logins(
        &self,
        actor: &User,
        request: ResolveLoginsRequest,
    ) -> ServiceResult<ResolveLoginsResponse> {
        request.validate()?;
        let association = self.managed_association(actor, &request.association_id).await?;
        let emails = expand_selection(&self.pattern(&association), &request.selection)?;
        Ok(ResolveLoginsResponse {
            association_id: association.id,
            count: emails.len(),
            emails,
        })
    }

    async fn managed_association(&self, actor: &User, association_id: &str) -> ServiceResult<Association> {
        AdminScope::of(actor)?.ensure_can_manage(association_id)?;
        self.ctx
            .association_repo()
            .find_by_id(association_id)
            .await?
            .ok_or_else(|| DomainError::AssociationNotFound(association_id.to_string()).into())
    }

    fn pattern(&self, association: &Association) -> LoginPattern {
        association.login_pattern(&self.ctx.settings().login_domain)
    }

    /// The `count` addresses after the highest one in use
    ///
    /// Another batch running at the same time may pick the same numbers;
    /// the unique address constraint then fails those accounts individually.
    async fn next_emails(&self, pattern: &LoginPattern, count: u32) -> ServiceResult<Vec<String>> {
        let existing = self.ctx.user_repo().find_emails_by_prefix(&pattern.prefix).await?;
        let highest = highest_suffix(pattern, existing.iter().map(String::as_str));
        Ok(allocation_plan(highest, count)
            .into_iter()
            .map(|n| pattern.email_for(n))
            .collect())
    }

    async fn create_one(&self, actor: &User, email: String, profile: &NewRanger<'_>) -> CreatedAccount {
        match self.ctx.user_repo().email_exists(&email).await {
            Ok(true) => {
                return CreatedAccount::Skipped {
                    email,
                    skipped: true,
                }
            }
            Ok(false) => {}
            Err(e) => return failed(email, &ServiceError::from(e)),
        }

        let password = generate_password(self.ctx.settings().password_length);
        let user = User::ranger(
            self.ctx.generate_id(),
            email,
            profile.association_id.to_string(),
            profile.association_name.to_string(),
            profile.app_version.to_string(),
        );

        let created = match hash_password(&password) {
            Ok(hash) => self.ctx.user_repo().create(&user, &hash).await.map_err(ServiceError::from),
            Err(e) => Err(e.into()),
        };
        if let Err(e) = created {
            return failed(user.email, &e);
        }

        info!(email = %user.email, uid = %user.id, "Ranger account created");
        self.audit(AuditLogEntry::created(self.ctx.generate_id(), &actor.email, &user.email))
            .await;
        CreatedAccount::Created {
            email: user.email,
            password,
            uid: user.id,
        }
    }

    async fn delete_one(&self, actor: &User, scope: &AdminScope, email: &str) -> DeleteUserResult {
        let outcome = |success: bool, message: &str| DeleteUserResult {
            success,
            email: email.to_string(),
            message: message.to_string(),
        };

        let user = match self.ctx.user_repo().find_by_email(email).await {
            Ok(Some(user)) => user,
            Ok(None) => return outcome(false, USER_MISSING),
            Err(e) => {
                error!(email, error = %e, "Account lookup failed");
                return outcome(false, INTERNAL_ERROR);
            }
        };
        if user.id == actor.id {
            return outcome(false, "Cannot delete your own account");
        }
        if !scope.can_manage_user(&user) {
            warn!(email, "Deletion outside the administrator's district refused");
            return outcome(false, "User belongs to another association");
        }

        match self.ctx.user_repo().delete(user.id).await {
            Ok(true) => {
                info!(email, "Account deleted");
                outcome(true, USER_DELETED)
            }
            Ok(false) => outcome(false, USER_MISSING),
            Err(e) => {
                error!(email, error = %e, "Account deletion failed");
                outcome(false, INTERNAL_ERROR)
            }
        }
    }

    /// Audit failures are logged; the account operation already happened
    async fn audit(&self, entry: AuditLogEntry) {
        if let Err(e) = self.ctx.audit_repo().create(&entry).await {
            error!(user = %entry.user_email, action = %entry.action, error = %e, "Audit log write failed");
        }
    }
}

struct NewRanger<'p> {
    association_id: &'p str,
    association_name: &'p str,
    app_version: &'p str,
}

fn explicit_emails(pattern: &LoginPattern, ids: &[String]) -> ServiceResult<Vec<String>> {
    ids.iter()
        .map(|id| id.trim())
        .map(|id| {
            if id.is_empty() || id.contains(['@', ' ']) {
                Err(DomainError::ValidationError(format!("invalid login id: '{id}'")).into())
            } else {
                Ok(pattern.email_for_suffix(id))
            }
        })
        .collect()
}

/// Server-side failures are logged in full but reported without detail
fn failed(email: String, err: &ServiceError) -> CreatedAccount {
    let error = if err.status_code() >= 500 {
        error!(email = %email, error = %err, "Account creation failed");
        INTERNAL_ERROR.to_string()
    } else {
        warn!(email = %email, error = %err, "Account creation refused");
        err.to_string()
    };
    CreatedAccount::Failed { email, error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{admin, ranger, Harness, MAZ, TBG};
    use ssr_core::AuditAction;

    fn create(count: Option<u32>, ids: Option<Vec<&str>>) -> CreateUsersRequest {
        CreateUsersRequest {
            count,
            email_ids: ids.map(|ids| ids.into_iter().map(str::to_string).collect()),
            app_version: None,
            association_id: MAZ.to_string(),
            association_name: None,
        }
    }

    #[tokio::test]
    async fn test_create_continues_numbering() {
        let h = Harness::new();
        h.insert_user(&ranger(1, "MAZSSR_001@ranger.pl", MAZ), "x");
        h.insert_user(&ranger(2, "MAZSSR_007@ranger.pl", MAZ), "x");
        h.insert_user(&ranger(3, "TBGSSR_050@ranger.pl", TBG), "x");

        let response = ProvisioningService::new(&h.ctx)
            .create_users(&admin(Some(MAZ)), create(Some(2), None))
            .await
            .unwrap();

        let emails: Vec<&str> = response.users.iter().map(CreatedAccount::email).collect();
        assert_eq!(emails, vec!["MAZSSR_008@ranger.pl", "MAZSSR_009@ranger.pl"]);
        for user in &response.users {
            let CreatedAccount::Created { password, .. } = user else {
                panic!("expected a created account: {user:?}");
            };
            assert_eq!(password.len(), 12);
        }
        assert!(response.credentials_csv.starts_with("email,password\r\n"));
        assert!(response.credentials_csv.contains("MAZSSR_009@ranger.pl"));

        let stored = h.ctx.user_repo().find_by_email("MAZSSR_008@ranger.pl").await.unwrap().unwrap();
        assert!(stored.is_ranger());
        assert_eq!(stored.association_name.as_deref(), Some("Okręg Mazowiecki"));
        assert_eq!(stored.app_version.as_deref(), Some("1.0.0"));

        let audit = h.audit.entries.lock().unwrap();
        assert_eq!(audit.len(), 2);
        assert!(audit.iter().all(|e| e.action == AuditAction::Create && e.admin_email == "admin@ranger.pl"));
    }

    #[tokio::test]
    async fn test_explicit_ids_skip_existing_accounts() {
        let h = Harness::new();
        h.insert_user(&ranger(1, "MAZSSR_010@ranger.pl", MAZ), "x");

        let response = ProvisioningService::new(&h.ctx)
            .create_users(&admin(None), create(None, Some(vec!["010", "011"])))
            .await
            .unwrap();

        assert_eq!(
            response.users[0],
            CreatedAccount::Skipped {
                email: "MAZSSR_010@ranger.pl".to_string(),
                skipped: true
            }
        );
        assert!(matches!(response.users[1], CreatedAccount::Created { .. }));
        assert_eq!(h.audit.entries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_stop_the_batch() {
        let h = Harness::new();
        h.users.failing.lock().unwrap().insert("MAZSSR_001@ranger.pl".to_string());

        let response = ProvisioningService::new(&h.ctx)
            .create_users(&admin(Some(MAZ)), create(Some(2), None))
            .await
            .unwrap();

        assert!(matches!(&response.users[0], CreatedAccount::Failed { error, .. } if error == INTERNAL_ERROR));
        assert!(matches!(response.users[1], CreatedAccount::Created { .. }));
        assert!(!response.credentials_csv.contains("MAZSSR_001"));
    }

    #[tokio::test]
    async fn test_district_admin_cannot_provision_elsewhere() {
        let h = Harness::new();
        let err = ProvisioningService::new(&h.ctx)
            .create_users(&admin(Some(TBG)), create(Some(1), None))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert!(h.user_emails().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_association_and_missing_count() {
        let h = Harness::new();
        let service = ProvisioningService::new(&h.ctx);

        let mut request = create(Some(1), None);
        request.association_id = "missing".to_string();
        let err = service.create_users(&admin(None), request).await.unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_ASSOCIATION");

        let err = service.create_users(&admin(None), create(None, None)).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_rangers_cannot_provision() {
        let h = Harness::new();
        let err = ProvisioningService::new(&h.ctx)
            .create_users(&ranger(5, "MAZSSR_005@ranger.pl", MAZ), create(Some(1), None))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "ADMIN_REQUIRED");
    }

    #[tokio::test]
    async fn test_delete_users_reports_each_address() {
        let h = Harness::new();
        h.insert_user(&ranger(1, "MAZSSR_001@ranger.pl", MAZ), "x");
        h.insert_user(&ranger(2, "TBGSSR_001@ranger.pl", TBG), "x");

        let response = ProvisioningService::new(&h.ctx)
            .delete_users(
                &admin(Some(MAZ)),
                vec![
                    "MAZSSR_001@ranger.pl".to_string(),
                    "MAZSSR_002@ranger.pl".to_string(),
                    "TBGSSR_001@ranger.pl".to_string(),
                    "  ".to_string(),
                ],
            )
            .await
            .unwrap();

        let summary: Vec<(bool, &str)> = response
            .results
            .iter()
            .map(|r| (r.success, r.message.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (true, USER_DELETED),
                (false, USER_MISSING),
                (false, "User belongs to another association"),
            ]
        );
        assert_eq!(h.user_emails(), vec!["TBGSSR_001@ranger.pl".to_string()]);

        let audit = h.audit.entries.lock().unwrap();
        let flags: Vec<Option<bool>> = audit.iter().map(|e| e.success).collect();
        assert_eq!(flags, vec![Some(true), Some(false), Some(false)]);
        assert!(audit.iter().all(|e| e.action == AuditAction::Delete));
    }

    #[tokio::test]
    async fn test_delete_failure_hides_database_detail() {
        let h = Harness::new();
        h.insert_user(&ranger(1, "MAZSSR_001@ranger.pl", MAZ), "x");
        h.users.failing.lock().unwrap().insert("MAZSSR_001@ranger.pl".to_string());

        let response = ProvisioningService::new(&h.ctx)
            .delete_users(&admin(Some(MAZ)), vec!["MAZSSR_001@ranger.pl".to_string()])
            .await
            .unwrap();

        assert!(!response.results[0].success);
        assert_eq!(response.results[0].message, INTERNAL_ERROR);
        assert!(!response.results[0].message.contains("connection reset"));
        assert_eq!(h.user_emails(), vec!["MAZSSR_001@ranger.pl".to_string()]);
        assert_eq!(h.audit.entries.lock().unwrap()[0].success, Some(false));
    }

    #[tokio::test]
    async fn test_admin_cannot_delete_self() {
        let h = Harness::new();
        let me = admin(None);
        h.insert_user(&me, "x");
        let response = ProvisioningService::new(&h.ctx)
            .delete_users(&me, vec![me.email.clone()])
            .await
            .unwrap();
        assert!(!response.results[0].success);
        assert_eq!(h.user_emails(), vec![me.email]);
    }

    #[tokio::test]
    async fn test_resolve_logins() {
        let h = Harness::new();
        let service = ProvisioningService::new(&h.ctx);
        let response = service
            .resolve_logins(
                &admin(Some(MAZ)),
                ResolveLoginsRequest {
                    association_id: MAZ.to_string(),
                    selection: "001-003, 010".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(response.count, 4);
        assert_eq!(response.emails[3], "MAZSSR_010@ranger.pl");

        let err = service
            .resolve_logins(
                &admin(Some(MAZ)),
                ResolveLoginsRequest {
                    association_id: MAZ.to_string(),
                    selection: "005-001".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SELECTION");
    }
}
