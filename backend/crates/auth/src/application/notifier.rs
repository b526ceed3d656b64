//! Out-of-band delivery of login codes and verification links

use crate::domain::value_object::{email::Email, otp_code::OtpCode, phone::Phone};

/// Delivers secrets to their recipient, never to the HTTP caller
pub trait Notifier: Send + Sync {
    fn send_login_code(&self, phone: &Phone, code: OtpCode);

    fn send_email_verification(&self, email: &Email, link: &str);
}

/// Writes every delivery as a structured log record
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send_login_code(&self, phone: &Phone, code: OtpCode) {
        tracing::info!(phone = %phone, code = %code, "Login code delivered");
    }

    fn send_email_verification(&self, email: &Email, link: &str) {
        tracing::info!(email = %email, link = %link, "Verification link delivered");
    }
}
