//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::value_object::{email::Email, phone::Phone, session_id::SessionId};
use crate::error::AuthResult;

// ============================================================================
// Phone Login
// ============================================================================

/// POST /auth request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestLoginRequest {
    pub phone: String,
}

impl RequestLoginRequest {
    pub fn try_into_input(self) -> AuthResult<Phone> {
        Phone::new(&self.phone)
    }
}

/// POST /auth response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestLoginResponse {
    pub session_id: String,
}

/// POST /auth/verify request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyLoginRequest {
    pub session_id: String,
    pub code: i64,
}

impl VerifyLoginRequest {
    pub fn into_input(self) -> (SessionId, i64) {
        (SessionId::from_raw(self.session_id), self.code)
    }
}

/// POST /auth/verify response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyLoginResponse {
    pub token: String,
}

// ============================================================================
// Email Verification
// ============================================================================

/// POST /email/send request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailVerificationRequest {
    pub email: String,
}

impl SendEmailVerificationRequest {
    pub fn try_into_input(self) -> AuthResult<Email> {
        Email::new(&self.email)
    }
}

/// POST /email/send response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSentResponse {
    pub status: &'static str,
}

/// GET /verify/{token} response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailVerifiedResponse {
    pub status: &'static str,
    pub email: String,
}
