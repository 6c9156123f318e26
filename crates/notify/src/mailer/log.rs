use crate::traits::Mailer;
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        info!(to, subject, "Would send email:\n{}", body);
        Ok(())
    }
}
