use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if s.is_empty() {
            return Err("Username cannot be empty.".to_string());
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-')
        {
            return Err(
                "Username may only contain lowercase letters, digits, '.' or '-'.".to_string(),
            );
        }
        if s.len() > 64 {
            return Err("Username is too long (max 64 chars).".to_string());
        }
        Ok(Self(s))
    }

    pub fn new_unchecked(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Username,
    // 邮箱只在服务端内部流转，不进入响应
    #[serde(default, skip_serializing)]
    pub email: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Talk {
    pub id: i64,
    pub author_id: i64,
    pub author_username: Username,
    pub title: String,
    pub description: String,
    pub slides: Option<String>,
    pub video: Option<String>,
    pub venue: Option<String>,
    pub venue_url: Option<String>,
    pub date: NaiveDateTime,
}

/// 评论作者：注册演讲者引用，或访客留下的 名字+邮箱。
/// 两者有且仅有其一。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommentAuthor {
    Presenter {
        user_id: i64,
        username: Username,
    },
    Visitor {
        name: String,
        #[serde(default, skip_serializing)]
        email: String,
    },
}

impl CommentAuthor {
    pub fn display_name(&self) -> &str {
        match self {
            CommentAuthor::Presenter { username, .. } => username.as_str(),
            CommentAuthor::Visitor { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub talk_id: i64,
    pub body: String,
    #[serde(flatten)]
    pub author: CommentAuthor,
    pub approved: bool,
    pub notify: bool,
    pub created_at: NaiveDateTime,
}

/// 评论列表的可见范围：Owner 返回全部，Public 只返回已批准的。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentScope {
    Public,
    Owner,
}
