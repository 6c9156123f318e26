#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use domain::{CommentAuthor, NewComment, Talk, TalkFields, User, Username};
use storage::Db;

pub async fn mk_db() -> Db {
    Db::new("sqlite::memory:").await.unwrap()
}

pub async fn mk_user(db: &Db, username: &str, is_admin: bool) -> User {
    db.insert_user(
        &Username::new(username).unwrap(),
        &format!("{}@example.org", username),
        "salt$hash",
        &format!("token-{}", username),
        is_admin,
    )
    .await
    .unwrap()
}

pub fn day(d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, d)
        .unwrap()
        .and_hms_opt(19, 0, 0)
        .unwrap()
}

pub fn talk_fields(title: &str, d: u32) -> TalkFields {
    TalkFields {
        title: title.to_string(),
        description: "A talk about things.".to_string(),
        slides: None,
        video: None,
        venue: Some("Community Hall".to_string()),
        venue_url: None,
        date: day(d),
    }
}

pub async fn mk_talk(db: &Db, author: &User, title: &str, d: u32) -> Talk {
    db.insert_talk(author.id, &talk_fields(title, d)).await.unwrap()
}

pub fn visitor_comment(body: &str, email: &str, notify: bool) -> NewComment {
    NewComment {
        body: body.to_string(),
        author: CommentAuthor::Visitor {
            name: email.split('@').next().unwrap().to_string(),
            email: email.to_string(),
        },
        approved: false,
        notify,
    }
}

pub fn presenter_comment(body: &str, user: &User, approved: bool) -> NewComment {
    NewComment {
        body: body.to_string(),
        author: CommentAuthor::Presenter {
            user_id: user.id,
            username: user.username.clone(),
        },
        approved,
        notify: false,
    }
}
