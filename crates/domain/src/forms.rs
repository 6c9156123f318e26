use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// 逐字段校验错误，序列化后原样返回给前端。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldErrors {
    pub fields: Vec<FieldError>,
}

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.fields.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

pub const TITLE_MAX_LEN: usize = 128;
pub const BODY_MAX_LEN: usize = 4096;

/// 提交/编辑演讲的原始表单。
#[derive(Debug, Clone, Deserialize)]
pub struct TalkForm {
    pub title: String,
    pub description: String,
    pub slides: Option<String>,
    pub video: Option<String>,
    pub venue: Option<String>,
    pub venue_url: Option<String>,
    pub date: NaiveDateTime,
}

/// 校验通过后的可写字段集。
#[derive(Debug, Clone)]
pub struct TalkFields {
    pub title: String,
    pub description: String,
    pub slides: Option<String>,
    pub video: Option<String>,
    pub venue: Option<String>,
    pub venue_url: Option<String>,
    pub date: NaiveDateTime,
}

fn none_if_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl TalkForm {
    pub fn validate(self) -> Result<TalkFields, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = self.title.trim().to_string();
        if title.is_empty() {
            errors.push("title", "Title is required.");
        } else if title.len() > TITLE_MAX_LEN {
            errors.push(
                "title",
                format!("Title is too long (max {} chars).", TITLE_MAX_LEN),
            );
        }

        let description = self.description.trim().to_string();
        if description.is_empty() {
            errors.push("description", "Description is required.");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(TalkFields {
            title,
            description,
            slides: none_if_blank(self.slides),
            video: none_if_blank(self.video),
            venue: none_if_blank(self.venue),
            venue_url: none_if_blank(self.venue_url),
            date: self.date,
        })
    }
}

/// 评论表单。访客必须带 name+email，登录用户两者都忽略。
#[derive(Debug, Clone, Deserialize)]
pub struct CommentForm {
    pub body: String,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub notify: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileForm {
    pub name: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
}

impl ProfileForm {
    pub fn normalized(self) -> Self {
        Self {
            name: none_if_blank(self.name),
            location: none_if_blank(self.location),
            bio: none_if_blank(self.bio),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn form(title: &str, description: &str) -> TalkForm {
        TalkForm {
            title: title.to_string(),
            description: description.to_string(),
            slides: Some("  ".to_string()),
            video: None,
            venue: Some("Community Hall".to_string()),
            venue_url: None,
            date: NaiveDate::from_ymd_opt(2026, 5, 1)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn talk_form_trims_and_drops_blank_optionals() {
        let fields = form(" Rust in Anger ", "Lessons learned.").validate().unwrap();
        assert_eq!(fields.title, "Rust in Anger");
        assert_eq!(fields.slides, None);
        assert_eq!(fields.venue.as_deref(), Some("Community Hall"));
    }

    #[test]
    fn talk_form_collects_all_field_errors() {
        let err = form("", "").validate().unwrap_err();
        let fields: Vec<&str> = err.fields.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "description"]);
    }

    #[test]
    fn talk_form_rejects_overlong_title() {
        let err = form(&"x".repeat(200), "ok").validate().unwrap_err();
        assert_eq!(err.fields[0].field, "title");
    }
}
