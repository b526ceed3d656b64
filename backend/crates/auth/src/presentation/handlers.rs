//! HTTP Handlers

use axum::Json;
use axum::extract::{FromRequest, Path, State};
use std::sync::Arc;

use platform::token::TokenCodec;

use crate::application::config::AuthConfig;
use crate::application::notifier::Notifier;
use crate::application::secrets::{LoginSecretSource, OsSecretSource};
use crate::application::{
    RequestLoginUseCase, SendEmailVerificationUseCase, VerifyEmailUseCase, VerifyLoginUseCase,
};
use crate::domain::repository::{EmailVerificationRepository, IdentityRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    EmailSentResponse, EmailVerifiedResponse, RequestLoginRequest, RequestLoginResponse,
    SendEmailVerificationRequest, VerifyLoginRequest, VerifyLoginResponse,
};
use crate::presentation::middleware::AuthGate;

/// JSON body whose rejection renders as an [`AuthError`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AuthError))]
pub struct AuthJson<T>(pub T);

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: IdentityRepository + EmailVerificationRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub codec: Arc<TokenCodec>,
    pub notifier: Arc<dyn Notifier>,
    pub secrets: Arc<dyn LoginSecretSource>,
}

impl<R> AuthAppState<R>
where
    R: IdentityRepository + EmailVerificationRepository + Clone + Send + Sync + 'static,
{
    /// Build state with OS CSPRNG login secrets
    pub fn new(repo: R, config: AuthConfig, notifier: Arc<dyn Notifier>) -> AuthResult<Self> {
        let codec = Arc::new(config.token_codec()?);
        Ok(Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            codec,
            notifier,
            secrets: Arc::new(OsSecretSource),
        })
    }

    /// Replace the source of session ids and codes
    pub fn with_secret_source(mut self, secrets: Arc<dyn LoginSecretSource>) -> Self {
        self.secrets = secrets;
        self
    }

    /// Gate for routes that require a bearer token issued by this state
    pub fn gate(&self) -> AuthGate {
        AuthGate::new(self.codec.clone())
    }
}

// ============================================================================
// Phone Login
// ============================================================================

/// POST /auth
pub async fn request_login<R>(
    State(state): State<AuthAppState<R>>,
    AuthJson(req): AuthJson<RequestLoginRequest>,
) -> AuthResult<Json<RequestLoginResponse>>
where
    R: IdentityRepository + EmailVerificationRepository + Clone + Send + Sync + 'static,
{
    let phone = req.try_into_input()?;

    let use_case = RequestLoginUseCase::new(
        state.repo.clone(),
        state.notifier.clone(),
        state.secrets.clone(),
    );

    let session_id = use_case.execute(phone).await?;

    Ok(Json(RequestLoginResponse {
        session_id: session_id.into_inner(),
    }))
}

/// POST /auth/verify
pub async fn verify_login<R>(
    State(state): State<AuthAppState<R>>,
    AuthJson(req): AuthJson<VerifyLoginRequest>,
) -> AuthResult<Json<VerifyLoginResponse>>
where
    R: IdentityRepository + EmailVerificationRepository + Clone + Send + Sync + 'static,
{
    let (session_id, code) = req.into_input();

    let use_case = VerifyLoginUseCase::new(state.repo.clone(), state.codec.clone());
    let issued = use_case.execute(&session_id, code).await?;

    Ok(Json(VerifyLoginResponse {
        token: issued.token,
    }))
}

// ============================================================================
// Email Verification
// ============================================================================

/// POST /email/send
pub async fn send_email_verification<R>(
    State(state): State<AuthAppState<R>>,
    AuthJson(req): AuthJson<SendEmailVerificationRequest>,
) -> AuthResult<Json<EmailSentResponse>>
where
    R: IdentityRepository + EmailVerificationRepository + Clone + Send + Sync + 'static,
{
    let email = req.try_into_input()?;

    let use_case = SendEmailVerificationUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.notifier.clone(),
    );
    use_case.execute(email).await?;

    Ok(Json(EmailSentResponse { status: "sent" }))
}

/// GET /verify/{token}
pub async fn verify_email<R>(
    State(state): State<AuthAppState<R>>,
    Path(token): Path<String>,
) -> AuthResult<Json<EmailVerifiedResponse>>
where
    R: IdentityRepository + EmailVerificationRepository + Clone + Send + Sync + 'static,
{
    let use_case = VerifyEmailUseCase::new(state.repo.clone());
    let email = use_case.execute(&token).await?;

    Ok(Json(EmailVerifiedResponse {
        status: "verified",
        email: email.into_inner(),
    }))
}
