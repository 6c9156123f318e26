use crate::forms::{CommentForm, FieldErrors, BODY_MAX_LEN};
use crate::models::{CommentAuthor, CommentScope, Talk, User, Username};

/// 认证协作方注入的当前调用者身份。
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
    pub username: Username,
    pub is_admin: bool,
}

impl Identity {
    /// 演讲作者本人或管理员：可编辑演讲、看到未批准评论、执行审核。
    pub fn can_manage(&self, talk: &Talk) -> bool {
        self.is_admin || talk.author_id == self.user_id
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Identity {
            user_id: user.id,
            username: user.username.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// 已分类、待持久化的新评论。
#[derive(Debug, Clone)]
pub struct NewComment {
    pub body: String,
    pub author: CommentAuthor,
    pub approved: bool,
    pub notify: bool,
}

/// The moderation visibility rule: the talk's author and admins read the
/// unfiltered stream, everyone else only sees approved comments.
pub fn comment_scope(talk: &Talk, caller: Option<&Identity>) -> CommentScope {
    match caller {
        Some(id) if id.can_manage(talk) => CommentScope::Owner,
        _ => CommentScope::Public,
    }
}

/// Classifies a submission into a [`NewComment`]:
///
/// - the talk's own author comments as a presenter, auto-approved, with the
///   notify flag forced off whatever the form said;
/// - any other authenticated user keeps an author reference but starts
///   pending, like a visitor;
/// - an anonymous visitor must leave a name and email and may opt into
///   notifications.
pub fn classify_submission(
    talk: &Talk,
    caller: Option<&Identity>,
    form: CommentForm,
) -> Result<NewComment, FieldErrors> {
    let mut errors = FieldErrors::default();

    let body = form.body.trim().to_string();
    if body.is_empty() {
        errors.push("body", "Comment body is required.");
    } else if body.len() > BODY_MAX_LEN {
        errors.push(
            "body",
            format!("Comment is too long (max {} chars).", BODY_MAX_LEN),
        );
    }

    let author = match caller {
        Some(id) => CommentAuthor::Presenter {
            user_id: id.user_id,
            username: id.username.clone(),
        },
        None => {
            let name = form.name.as_deref().map(str::trim).unwrap_or("").to_string();
            let email = form
                .email
                .as_deref()
                .map(str::trim)
                .unwrap_or("")
                .to_string();
            if name.is_empty() {
                errors.push("name", "Name is required.");
            }
            if email.is_empty() {
                errors.push("email", "Email is required.");
            } else if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
                errors.push("email", "Email address does not look valid.");
            }
            CommentAuthor::Visitor { name, email }
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    let is_presenter = matches!(
        &author,
        CommentAuthor::Presenter { user_id, .. } if *user_id == talk.author_id
    );

    Ok(NewComment {
        body,
        author,
        approved: is_presenter,
        // 演讲者给自己的演讲留言，不需要发布确认邮件
        notify: if caller.is_some() { false } else { form.notify },
    })
}
