mod mailer;
mod messages;
pub mod token;
mod traits;

pub use traits::Mailer;

use chrono::Utc;
use domain::Notification;
use mailer::{LogMailer, WebhookMailer};
use std::time::Duration;
use storage::Db;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Clone)]
pub enum MailerConfig {
    /// 只写日志，开发环境或未接邮件网关时用
    Log,
    /// 把邮件 POST 给外部投递网关
    Webhook { endpoint: String },
}

#[derive(Clone)]
pub struct NotifyConfig {
    pub mailer: MailerConfig,
    /// 拼退订链接用的对外地址，如 "https://talks.example.org"
    pub public_base_url: String,
    pub unsubscribe_secret: String,
    /// 邮件在队列里停留多久才真正发出，给退订留窗口
    pub batch_delay_secs: u64,
    pub flush_interval_secs: u64,
}

/// 通知 worker。从 `rx` 收工作流消息，落成 pending_emails 行，
/// 到期后经 Mailer 发出。channel 关闭时把剩余队列清空再退出。
pub async fn start(
    config: NotifyConfig,
    db: Db,
    mut rx: mpsc::Receiver<Notification>,
) -> anyhow::Result<()> {
    let mailer: Box<dyn Mailer> = match &config.mailer {
        MailerConfig::Log => {
            info!("Initializing notifier in LOG mode...");
            Box::new(LogMailer)
        }
        MailerConfig::Webhook { endpoint } => {
            info!("Initializing notifier in WEBHOOK mode ({})...", endpoint);
            Box::new(WebhookMailer::new(endpoint.clone()))
        }
    };

    let mut flush = tokio::time::interval(Duration::from_secs(config.flush_interval_secs.max(1)));

    loop {
        tokio::select! {
            maybe = rx.recv() => match maybe {
                Some(n) => {
                    if let Err(e) = enqueue(&config, &db, n).await {
                        warn!("Failed to enqueue notification: {:?}", e);
                    }
                }
                None => {
                    flush_due(&db, mailer.as_ref(), 0).await?;
                    info!("Notification channel closed, worker exiting.");
                    return Ok(());
                }
            },
            _ = flush.tick() => {
                if let Err(e) = flush_due(&db, mailer.as_ref(), config.batch_delay_secs).await {
                    warn!("Email flush failed: {:?}", e);
                }
            }
        }
    }
}

async fn enqueue(config: &NotifyConfig, db: &Db, n: Notification) -> anyhow::Result<()> {
    match n {
        Notification::CommentPublished {
            talk_id,
            comment_id,
            exclude_email,
        } => {
            let Some(talk) = db.get_talk(talk_id).await? else {
                warn!("CommentPublished for unknown talk {}", talk_id);
                return Ok(());
            };
            let Some(comment) = db.get_comment(comment_id).await? else {
                warn!("CommentPublished for unknown comment {}", comment_id);
                return Ok(());
            };
            let subscribers = db
                .subscriber_emails(talk_id, exclude_email.as_deref())
                .await?;
            for email in subscribers {
                let unsubscribe_url =
                    unsubscribe_url(config, talk_id, &email);
                let (subject, body) =
                    messages::comment_published(&talk, &comment, &unsubscribe_url);
                db.queue_email(talk_id, &email, &subject, &body).await?;
            }
        }
        Notification::AwaitingReview { talk_id } => {
            let Some(talk) = db.get_talk(talk_id).await? else {
                warn!("AwaitingReview for unknown talk {}", talk_id);
                return Ok(());
            };
            let Some(author) = db.get_user(talk.author_id).await? else {
                warn!("Talk {} has no resolvable author", talk_id);
                return Ok(());
            };
            let unsubscribe_url = unsubscribe_url(config, talk_id, &author.email);
            let (subject, body) = messages::awaiting_review(&talk, &unsubscribe_url);
            db.queue_email(talk_id, &author.email, &subject, &body)
                .await?;
        }
    }
    Ok(())
}

async fn flush_due(db: &Db, mailer: &dyn Mailer, delay_secs: u64) -> anyhow::Result<()> {
    let cutoff = Utc::now().naive_utc() - chrono::Duration::seconds(delay_secs as i64);
    let due = db.due_emails(cutoff).await?;
    for pending in due {
        match mailer
            .send(&pending.email, &pending.subject, &pending.body)
            .await
        {
            // 发送成功才移除，失败的下一轮重试
            Ok(()) => db.delete_pending_email(pending.id).await?,
            Err(e) => warn!("Failed to send email to {}: {:?}", pending.email, e),
        }
    }
    Ok(())
}

fn unsubscribe_url(config: &NotifyConfig, talk_id: i64, email: &str) -> String {
    let token = token::issue(&config.unsubscribe_secret, talk_id, email);
    format!(
        "{}/api/unsubscribe/{}",
        config.public_base_url.trim_end_matches('/'),
        token
    )
}
