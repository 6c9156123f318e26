use crate::{models::PendingEmail, Db};
use chrono::{NaiveDateTime, Utc};

impl Db {
    pub async fn queue_email(
        &self,
        talk_id: i64,
        email: &str,
        subject: &str,
        body: &str,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO pending_emails (talk_id, email, subject, body, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(talk_id)
        .bind(email)
        .bind(subject)
        .bind(body)
        .bind(Utc::now().naive_utc())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// 到期待发送的邮件（给退订留出缓冲窗口）。
    pub async fn due_emails(&self, cutoff: NaiveDateTime) -> anyhow::Result<Vec<PendingEmail>> {
        let rows = sqlx::query_as::<_, PendingEmail>(
            r#"
            SELECT id, talk_id, email, subject, body, created_at
            FROM pending_emails
            WHERE created_at <= ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn delete_pending_email(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM pending_emails WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// 兑现退订 token：删掉该 (talk, email) 的所有排队邮件，返回删除行数。
    /// 返回 0 说明 token 已被消费过或本就无效。
    pub async fn remove_pending_for(&self, talk_id: i64, email: &str) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM pending_emails WHERE talk_id = ? AND email = ?")
            .bind(talk_id)
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// 同时关掉该访客在这个演讲下的 notify 订阅，退订才是永久的。
    pub async fn clear_notify_flag(&self, talk_id: i64, email: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE comments SET notify = FALSE WHERE talk_id = ? AND author_email = ?")
            .bind(talk_id)
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
