use crate::{
    models::{Page, SqlTalk},
    Db,
};
use anyhow::Context;
use domain::{Talk, TalkFields};

const TALK_COLUMNS: &str = r#"
    t.id, t.author_id, t.title, t.description,
    t.slides, t.video, t.venue, t.venue_url, t.date,
    u.username AS author_username
"#;

impl Db {
    pub async fn insert_talk(&self, author_id: i64, f: &TalkFields) -> anyhow::Result<Talk> {
        let result = sqlx::query(
            r#"
            INSERT INTO talks (author_id, title, description, slides, video, venue, venue_url, date)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(author_id)
        .bind(&f.title)
        .bind(&f.description)
        .bind(&f.slides)
        .bind(&f.video)
        .bind(&f.venue)
        .bind(&f.venue_url)
        .bind(f.date)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_talk(id)
            .await?
            .context("talk vanished right after insert")
    }

    pub async fn update_talk(&self, id: i64, f: &TalkFields) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE talks
            SET title = ?, description = ?, slides = ?, video = ?,
                venue = ?, venue_url = ?, date = ?
            WHERE id = ?
            "#,
        )
        .bind(&f.title)
        .bind(&f.description)
        .bind(&f.slides)
        .bind(&f.video)
        .bind(&f.venue)
        .bind(&f.venue_url)
        .bind(f.date)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_talk(&self, id: i64) -> anyhow::Result<Option<Talk>> {
        let row = sqlx::query_as::<_, SqlTalk>(&format!(
            r#"
            SELECT {TALK_COLUMNS}
            FROM talks t
            JOIN users u ON t.author_id = u.id
            WHERE t.id = ?
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    // 按日期倒序的全局列表，越界的页自然落空
    pub async fn list_talks(&self, limit: i64, offset: i64) -> anyhow::Result<Page<Talk>> {
        let rows = sqlx::query_as::<_, SqlTalk>(&format!(
            r#"
            SELECT {TALK_COLUMNS}
            FROM talks t
            JOIN users u ON t.author_id = u.id
            ORDER BY t.date DESC
            LIMIT ? OFFSET ?
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM talks")
            .fetch_one(&self.pool)
            .await?;

        Ok(Page {
            items: rows.into_iter().map(Into::into).collect(),
            total,
        })
    }

    pub async fn list_talks_by_author(
        &self,
        author_id: i64,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Page<Talk>> {
        let rows = sqlx::query_as::<_, SqlTalk>(&format!(
            r#"
            SELECT {TALK_COLUMNS}
            FROM talks t
            JOIN users u ON t.author_id = u.id
            WHERE t.author_id = ?
            ORDER BY t.date DESC
            LIMIT ? OFFSET ?
            "#
        ))
        .bind(author_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM talks WHERE author_id = ?")
                .bind(author_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page {
            items: rows.into_iter().map(Into::into).collect(),
            total,
        })
    }
}
