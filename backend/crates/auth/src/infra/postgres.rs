//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::IdentityId;
use sqlx::PgPool;

use crate::domain::entity::{
    email_verification::EmailVerification,
    identity::{Identity, PendingLogin},
};
use crate::domain::repository::{EmailVerificationRepository, IdentityRepository};
use crate::domain::value_object::{
    email::Email, otp_code::OtpCode, phone::Phone, session_id::SessionId,
};
use crate::error::{AuthError, AuthResult};

/// Unique constraint on `identities.phone`
const PHONE_UNIQUE_CONSTRAINT: &str = "identities_phone_key";

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Identity Repository Implementation
// ============================================================================

impl IdentityRepository for PgAuthRepository {
    async fn find_by_phone(&self, phone: &Phone) -> AuthResult<Option<Identity>> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT
                id,
                phone,
                display_name,
                pending_code,
                pending_session_id,
                created_at,
                version
            FROM identities
            WHERE phone = $1
            "#,
        )
        .bind(phone.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_identity()).transpose()
    }

    async fn find_by_pending_session_id(
        &self,
        session_id: &SessionId,
    ) -> AuthResult<Option<Identity>> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT
                id,
                phone,
                display_name,
                pending_code,
                pending_session_id,
                created_at,
                version
            FROM identities
            WHERE pending_session_id = $1
            "#,
        )
        .bind(session_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_identity()).transpose()
    }

    async fn create(&self, phone: &Phone) -> AuthResult<Identity> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            INSERT INTO identities (phone)
            VALUES ($1)
            RETURNING
                id,
                phone,
                display_name,
                pending_code,
                pending_session_id,
                created_at,
                version
            "#,
        )
        .bind(phone.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, PHONE_UNIQUE_CONSTRAINT) {
                AuthError::PhoneTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        row.into_identity()
    }

    async fn save(&self, identity: &mut Identity) -> AuthResult<()> {
        let (pending_code, pending_session_id) = match &identity.pending {
            Some(pending) => {
                let code = i16::try_from(pending.code.get())
                    .map_err(|e| AuthError::Internal(format!("Code out of range: {}", e)))?;
                (Some(code), Some(pending.session_id.as_str()))
            }
            None => (None, None),
        };

        let updated = sqlx::query(
            r#"
            UPDATE identities SET
                pending_code = $3,
                pending_session_id = $4,
                version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(identity.id.get())
        .bind(identity.version)
        .bind(pending_code)
        .bind(pending_session_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(AuthError::StaleIdentity);
        }

        identity.version += 1;
        Ok(())
    }
}

// ============================================================================
// Email Verification Repository Implementation
// ============================================================================

impl EmailVerificationRepository for PgAuthRepository {
    async fn insert(&self, verification: &EmailVerification) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO email_verifications (
                token_hash,
                email,
                created_at,
                expires_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&verification.token_hash)
        .bind(verification.email.as_str())
        .bind(verification.created_at)
        .bind(verification.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn take(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<EmailVerification>> {
        let row = sqlx::query_as::<_, EmailVerificationRow>(
            r#"
            DELETE FROM email_verifications
            WHERE token_hash = $1
            RETURNING token_hash, email, created_at, expires_at
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row
            .map(EmailVerificationRow::into_verification)
            .filter(|v| !v.is_expired_at(now)))
    }

    async fn cleanup_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM email_verifications WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(
            verifications_deleted = deleted,
            "Cleaned up expired email verifications"
        );

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct IdentityRow {
    id: i64,
    phone: String,
    display_name: Option<String>,
    pending_code: Option<i16>,
    pending_session_id: Option<String>,
    created_at: DateTime<Utc>,
    version: i64,
}

impl IdentityRow {
    fn into_identity(self) -> AuthResult<Identity> {
        let pending = match (self.pending_code, self.pending_session_id) {
            (Some(code), Some(session_id)) => Some(PendingLogin {
                session_id: SessionId::from_raw(session_id),
                code: OtpCode::from_db(code)
                    .ok_or_else(|| AuthError::Internal(format!("Invalid pending_code: {}", code)))?,
            }),
            (None, None) => None,
            _ => {
                return Err(AuthError::Internal(format!(
                    "Identity {} has a half-set pending login",
                    self.id
                )));
            }
        };

        Ok(Identity {
            id: IdentityId::new(self.id),
            phone: Phone::from_db(self.phone),
            display_name: self.display_name,
            pending,
            created_at: self.created_at,
            version: self.version,
        })
    }
}

#[derive(sqlx::FromRow)]
struct EmailVerificationRow {
    token_hash: String,
    email: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl EmailVerificationRow {
    fn into_verification(self) -> EmailVerification {
        EmailVerification {
            token_hash: self.token_hash,
            email: Email::from_db(self.email),
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}
