//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod email_verification;
pub mod notifier;
pub mod request_login;
pub mod secrets;
pub mod verify_login;

// Re-exports
pub use config::AuthConfig;
pub use email_verification::{SendEmailVerificationUseCase, VerifyEmailUseCase};
pub use notifier::{LogNotifier, Notifier};
pub use request_login::RequestLoginUseCase;
pub use secrets::{LoginSecretSource, OsSecretSource};
pub use verify_login::VerifyLoginUseCase;
