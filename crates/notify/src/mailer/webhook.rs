use crate::traits::Mailer;
use anyhow::{bail, Result};
use async_trait::async_trait;

/// 把邮件交给外部投递网关（一个收 JSON 的 HTTP 端点）。
pub struct WebhookMailer {
    client: reqwest::Client,
    endpoint: String,
}

impl WebhookMailer {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl Mailer for WebhookMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "to": to,
                "subject": subject,
                "body": body,
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            bail!("mail gateway returned {}", resp.status());
        }
        Ok(())
    }
}
