use async_trait::async_trait;

use crate::domain::email::Email;

/// Outbound email delivery.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}
