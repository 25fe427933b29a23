//! Authentication service
//!
//! Login, token refresh and resolution of the account behind a token.

use ssr_common::auth::{hash_password, verify_password, TokenPair, TokenType};
use ssr_common::{AppError, BootstrapAdmin};
use ssr_core::entities::User;
use ssr_core::{DomainError, Roles, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, CurrentUserResponse, LoginRequest, RefreshTokenRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(request.email.trim())
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown account");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidCredentials))?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let tokens = self.ctx.jwt_service().issue(user.id)?;
        info!(user_id = %user.id, "User logged in");
        Ok(auth_response(tokens, &user))
    }

    /// Exchange a refresh token; the account must still exist
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let (user_id, tokens) = self.ctx.jwt_service().refresh(&request.refresh_token)?;
        let user = self.load(user_id).await?;
        Ok(auth_response(tokens, &user))
    }

    /// Account behind an access token
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let claims = self.ctx.jwt_service().verify(token, TokenType::Access)?;
        self.load(claims.user_id()?).await
    }

    pub fn me(&self, user: &User) -> CurrentUserResponse {
        CurrentUserResponse::from(user)
    }

    /// Create the configured administrator unless the address is taken
    #[instrument(skip(self, admin), fields(email = %admin.email))]
    pub async fn ensure_bootstrap_admin(&self, admin: &BootstrapAdmin) -> ServiceResult<bool> {
        if self.ctx.user_repo().email_exists(&admin.email).await? {
            return Ok(false);
        }

        let mut user = User::new(self.ctx.generate_id(), admin.email.clone(), Roles::ADMIN);
        if let Some(association_id) = &admin.association_id {
            let association = self
                .ctx
                .association_repo()
                .find_by_id(association_id)
                .await?
                .ok_or_else(|| DomainError::AssociationNotFound(association_id.clone()))?;
            user.association_id = Some(association.id);
            user.association_name = Some(association.name);
        }

        let hash = hash_password(&admin.password)?;
        self.ctx.user_repo().create(&user, &hash).await?;
        info!(user_id = %user.id, global = user.association_id.is_none(), "Bootstrap administrator created");
        Ok(true)
    }

    /// Deleted accounts lose access even with an unexpired token
    async fn load(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))
    }
}

fn auth_response(tokens: TokenPair, user: &User) -> AuthResponse {
    AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: tokens.token_type,
        expires_in: tokens.expires_in,
        user: CurrentUserResponse::from(user),
    }
}
