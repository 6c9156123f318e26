use crate::{
    models::{Page, SqlComment},
    Db,
};
use anyhow::Context;
use chrono::Utc;
use domain::{Comment, CommentAuthor, CommentScope, NewComment};

const COMMENT_COLUMNS: &str = r#"
    c.id, c.talk_id, c.body,
    c.author_id, c.author_name, c.author_email,
    c.approved, c.notify, c.created_at,
    u.username AS author_username
"#;

impl Db {
    /// 评论行和 approved 标志在同一条 INSERT 里落盘。
    pub async fn insert_comment(&self, talk_id: i64, c: &NewComment) -> anyhow::Result<Comment> {
        let (author_id, author_name, author_email) = match &c.author {
            CommentAuthor::Presenter { user_id, .. } => (Some(*user_id), None, None),
            CommentAuthor::Visitor { name, email } => {
                (None, Some(name.as_str()), Some(email.as_str()))
            }
        };

        let result = sqlx::query(
            r#"
            INSERT INTO comments (
                talk_id, body,
                author_id, author_name, author_email,
                approved, notify, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(talk_id)
        .bind(&c.body)
        .bind(author_id)
        .bind(author_name)
        .bind(author_email)
        .bind(c.approved)
        .bind(c.notify)
        .bind(Utc::now().naive_utc())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_comment(id)
            .await?
            .context("comment vanished right after insert")
    }

    pub async fn get_comment(&self, id: i64) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query_as::<_, SqlComment>(&format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments c
            LEFT JOIN users u ON c.author_id = u.id
            WHERE c.id = ?
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Owner 范围返回全部评论，Public 只返回已批准的；都按时间正序。
    pub async fn list_comments(
        &self,
        talk_id: i64,
        scope: CommentScope,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Page<Comment>> {
        // 两个 scope 走确定性不同的查询，而不是边界上的布尔分支
        let approved_filter = match scope {
            CommentScope::Owner => "",
            CommentScope::Public => "AND c.approved = TRUE",
        };

        let rows = sqlx::query_as::<_, SqlComment>(&format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments c
            LEFT JOIN users u ON c.author_id = u.id
            WHERE c.talk_id = ? {approved_filter}
            ORDER BY c.created_at ASC
            LIMIT ? OFFSET ?
            "#
        ))
        .bind(talk_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM comments c WHERE c.talk_id = ? {approved_filter}"
        ))
        .bind(talk_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Page {
            items: rows.into_iter().map(Into::into).collect(),
            total,
        })
    }

    /// Pending → Approved。返回是否真的翻转了一行。
    pub async fn approve_comment(&self, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE comments SET approved = TRUE WHERE id = ? AND approved = FALSE")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// 个人审核队列：本人演讲下所有待审评论。
    pub async fn moderation_queue_for(&self, author_id: i64) -> anyhow::Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, SqlComment>(&format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments c
            JOIN talks t ON c.talk_id = t.id
            LEFT JOIN users u ON c.author_id = u.id
            WHERE t.author_id = ? AND c.approved = FALSE
            ORDER BY c.created_at ASC
            "#
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// 管理员队列：全站待审评论。
    pub async fn moderation_queue_all(&self) -> anyhow::Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, SqlComment>(&format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments c
            LEFT JOIN users u ON c.author_id = u.id
            WHERE c.approved = FALSE
            ORDER BY c.created_at ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// 订阅者名单：该演讲下勾选了 notify 的访客邮箱（去重）。
    pub async fn subscriber_emails(
        &self,
        talk_id: i64,
        exclude: Option<&str>,
    ) -> anyhow::Result<Vec<String>> {
        let rows = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT author_email
            FROM comments
            WHERE talk_id = ? AND notify = TRUE AND author_email IS NOT NULL
              AND (? IS NULL OR author_email != ?)
            "#,
        )
        .bind(talk_id)
        .bind(exclude)
        .bind(exclude)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
