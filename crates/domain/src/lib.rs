mod error;
mod forms;
mod models;
mod notifications;
mod submission;

pub use error::AppError;
pub use forms::{CommentForm, FieldError, FieldErrors, ProfileForm, TalkFields, TalkForm};
pub use models::{Comment, CommentAuthor, CommentScope, Talk, User, Username};
pub use notifications::Notification;
pub use submission::{classify_submission, comment_scope, Identity, NewComment};
