use anyhow::Result;
use async_trait::async_trait;

/// 向外投递一封邮件。真正的 SMTP 投递在网关侧，这里只是边界。
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}
