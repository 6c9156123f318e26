use chrono::NaiveDateTime;
use domain::{Comment, CommentAuthor, Talk, User, Username};
use sqlx::FromRow;

/// 一页查询结果加总数。
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

#[derive(FromRow)]
pub struct SqlUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub is_admin: bool,
}

impl From<SqlUser> for User {
    fn from(sql: SqlUser) -> Self {
        User {
            id: sql.id,
            username: Username::new_unchecked(sql.username),
            email: sql.email,
            name: sql.name,
            location: sql.location,
            bio: sql.bio,
            is_admin: sql.is_admin,
        }
    }
}

#[derive(FromRow)]
pub struct SqlTalk {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub description: String,
    pub slides: Option<String>,
    pub video: Option<String>,
    pub venue: Option<String>,
    pub venue_url: Option<String>,
    pub date: NaiveDateTime,

    // Join 字段 (来自 users 表)
    pub author_username: String,
}

impl From<SqlTalk> for Talk {
    fn from(sql: SqlTalk) -> Self {
        Talk {
            id: sql.id,
            author_id: sql.author_id,
            author_username: Username::new_unchecked(sql.author_username),
            title: sql.title,
            description: sql.description,
            slides: sql.slides,
            video: sql.video,
            venue: sql.venue,
            venue_url: sql.venue_url,
            date: sql.date,
        }
    }
}

#[derive(FromRow)]
pub struct SqlComment {
    pub id: i64,
    pub talk_id: i64,
    pub body: String,
    pub author_id: Option<i64>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub approved: bool,
    pub notify: bool,
    pub created_at: NaiveDateTime,

    // Join 字段 (来自 users 表，访客评论为 NULL)
    pub author_username: Option<String>,
}

impl From<SqlComment> for Comment {
    fn from(sql: SqlComment) -> Self {
        // CHECK 约束保证两组字段有且仅有其一
        let author = match sql.author_id {
            Some(user_id) => CommentAuthor::Presenter {
                user_id,
                username: Username::new_unchecked(sql.author_username.unwrap_or_default()),
            },
            None => CommentAuthor::Visitor {
                name: sql.author_name.unwrap_or_default(),
                email: sql.author_email.unwrap_or_default(),
            },
        };
        Comment {
            id: sql.id,
            talk_id: sql.talk_id,
            body: sql.body,
            author,
            approved: sql.approved,
            notify: sql.notify,
            created_at: sql.created_at,
        }
    }
}

/// 排队中的通知邮件。没有领域层对应物，直接对外暴露。
#[derive(Debug, Clone, FromRow)]
pub struct PendingEmail {
    pub id: i64,
    pub talk_id: i64,
    pub email: String,
    pub subject: String,
    pub body: String,
    pub created_at: NaiveDateTime,
}
