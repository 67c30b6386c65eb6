use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
#[error("mail delivery failed: {0}")]
pub struct MailError(pub String);

/// Outbound-mail seam. The marketplace only sends verification mail; the
/// actual transport is deployment configuration.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_verification(&self, email: &str, token: &str) -> Result<(), MailError>;
}

/// Logs deliveries instead of sending them; the dev and test transport.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_verification(&self, email: &str, token: &str) -> Result<(), MailError> {
        info!(email = %email, "verification_mail_issued");
        debug!(token = %token, "verification token");
        Ok(())
    }
}
