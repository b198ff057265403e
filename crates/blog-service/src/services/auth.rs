//! Authentication service
//!
//! Session lifecycle: registration, login, access-token refresh and logout,
//! plus the per-request token check used by the auth gate.

use blog_common::auth::{validate_password_strength, validate_username, AccessClaims};
use blog_common::AppError;
use blog_core::entities::{NewUser, User};
use blog_core::normalize_email;
use blog_core::value_objects::UserId;
use blog_core::DomainError;
use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use crate::dto::{
    LoginRequest, LoginResponse, LogoutRequest, RefreshResponse, RefreshTokenRequest,
    RegisterRequest, UserResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Rows removed by one token purge run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeReport {
    pub refresh_tokens: u64,
    pub revoked_tokens: u64,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user. Does not log them in.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<User> {
        let email = normalize_email(&request.email);

        validate_password_strength(&request.password)?;
        validate_username(&request.username)?;

        if self
            .ctx
            .user_repo()
            .email_or_username_exists(&email, &request.username)
            .await?
        {
            warn!("Registration rejected: email or username taken");
            return Err(DomainError::EmailOrUsernameExists.into());
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;

        let new_user = NewUser {
            email,
            username: request.username,
            full_name: request.full_name,
            bio: request.bio,
            avatar: request.avatar,
        };
        let user = self.ctx.user_repo().create(&new_user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");
        Ok(user)
    }

    /// Login with email and password
    ///
    /// An unknown email and a wrong password fail with the same error.
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let email = normalize_email(&request.email);

        let passwords = self.ctx.password_service();

        let Some(user) = self.ctx.user_repo().find_by_email(&email).await? else {
            warn!("Login failed: unknown email");
            return Err(passwords.reject_without_hash(&request.password).into());
        };

        let Some(password_hash) = self.ctx.user_repo().get_password_hash(user.id).await? else {
            warn!(user_id = %user.id, "Login failed: no password hash");
            return Err(passwords.reject_without_hash(&request.password).into());
        };

        if let Err(e) = passwords.verify_or_error(&request.password, &password_hash) {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(e.into());
        }

        let jwt = self.ctx.jwt_service();
        let access_token = jwt.issue_access_token(user.id, &user.email, &user.username)?;
        let refresh_token = jwt.issue_refresh_token(user.id)?;

        self.ctx
            .refresh_token_repo()
            .create(user.id, &refresh_token.token, refresh_token.expires_at)
            .await?;

        info!(user_id = %user.id, "User logged in successfully");

        Ok(LoginResponse::new(
            access_token.token,
            refresh_token.token,
            jwt.access_token_ttl_secs(),
            UserResponse::from(user),
        ))
    }

    /// Mint a new access token from a refresh token
    ///
    /// The token must both verify and be stored, unexpired, for its subject.
    /// The refresh token is not rotated.
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<RefreshResponse> {
        let jwt = self.ctx.jwt_service();

        let claims = jwt
            .validate_refresh_token(&request.refresh_token)
            .map_err(|e| {
                warn!(error = %e, "Refresh rejected: invalid token");
                AppError::InvalidRefreshToken
            })?;
        let user_id = claims.user_id().map_err(|_| AppError::InvalidRefreshToken)?;

        if self
            .ctx
            .refresh_token_repo()
            .find_valid(&request.refresh_token, user_id, Utc::now())
            .await?
            .is_none()
        {
            warn!(user_id = %user_id, "Refresh rejected: token not stored");
            return Err(AppError::RefreshTokenNotFound.into());
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        let access_token = jwt.issue_access_token(user.id, &user.email, &user.username)?;

        info!(user_id = %user.id, "Access token refreshed");
        Ok(RefreshResponse::new(
            access_token.token,
            jwt.access_token_ttl_secs(),
        ))
    }

    /// Revoke the access token and drop the refresh token
    ///
    /// Only an access token that fails validation makes this fail; repeating
    /// a logout succeeds.
    #[instrument(skip(self, request))]
    pub async fn logout(&self, request: LogoutRequest) -> ServiceResult<()> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_access_token(&request.access_token)
            .map_err(|e| {
                warn!(error = %e, "Logout rejected: invalid access token");
                AppError::InvalidAccessToken
            })?;

        match self
            .ctx
            .revoked_token_repo()
            .revoke(&request.access_token, claims.expires_at())
            .await
        {
            Ok(_) | Err(DomainError::TokenAlreadyRevoked) => {}
            Err(e) => return Err(e.into()),
        }

        self.ctx
            .refresh_token_repo()
            .delete(&request.refresh_token)
            .await?;

        info!(user_id = %claims.user_id, "User logged out successfully");
        Ok(())
    }

    /// Check a bearer token: signature, expiry, then the revocation list
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<AccessClaims> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_access_token(token)
            .inspect_err(|e| warn!(error = %e, "Rejected access token"))?;

        if self.ctx.revoked_token_repo().is_revoked(token).await? {
            warn!(user_id = %claims.user_id, "Revoked access token used");
            return Err(AppError::TokenRevoked.into());
        }

        Ok(claims)
    }

    /// Get the authenticated user's own record
    #[instrument(skip(self))]
    pub async fn me(&self, user_id: UserId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound.into())
    }

    /// Delete expired refresh tokens and revocation records
    #[instrument(skip(self))]
    pub async fn purge_expired_tokens(&self, now: DateTime<Utc>) -> ServiceResult<PurgeReport> {
        let report = PurgeReport {
            refresh_tokens: self.ctx.refresh_token_repo().purge_expired(now).await?,
            revoked_tokens: self.ctx.revoked_token_repo().purge_expired(now).await?,
        };

        if report != PurgeReport::default() {
            info!(
                refresh_tokens = report.refresh_tokens,
                revoked_tokens = report.revoked_tokens,
                "Purged expired tokens"
            );
        }
        Ok(report)
    }
}
