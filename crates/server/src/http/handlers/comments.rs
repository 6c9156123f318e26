use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::{
    classify_submission, comment_scope, AppError, Comment, CommentAuthor, CommentForm,
    Notification,
};
use serde::Serialize;
use tracing::warn;

use crate::{
    auth::MaybeAuthUser,
    error::ApiError,
    pagination::{PageParams, PageResponse},
    state::AppState,
};

pub async fn list_comments(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Path(talk_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> Result<Json<PageResponse<Comment>>, ApiError> {
    let talk = state
        .db
        .get_talk(talk_id)
        .await?
        .ok_or(AppError::NotFound("talk"))?;

    let scope = comment_scope(&talk, caller.identity().as_ref());
    let bounds = params.bounds(state.comments_per_page);
    let page = state
        .db
        .list_comments(talk.id, scope, bounds.limit, bounds.offset)
        .await?;
    Ok(Json(PageResponse::new(page, bounds)))
}

#[derive(Serialize)]
pub struct SubmitResponse {
    /// "published" 或 "pending_review"
    pub status: &'static str,
    pub comment: Comment,
}

pub async fn post_comment(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Path(talk_id): Path<i64>,
    Json(form): Json<CommentForm>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let talk = state
        .db
        .get_talk(talk_id)
        .await?
        .ok_or(AppError::NotFound("talk"))?;

    let new_comment = classify_submission(&talk, caller.identity().as_ref(), form)
        .map_err(AppError::Validation)?;

    let comment = state.db.insert_comment(talk.id, &new_comment).await?;

    // 通知失败不影响提交结果
    let notification = if comment.approved {
        Notification::CommentPublished {
            talk_id: talk.id,
            comment_id: comment.id,
            exclude_email: visitor_email(&comment.author),
        }
    } else {
        Notification::AwaitingReview { talk_id: talk.id }
    };
    if state.notifier.send(notification).await.is_err() {
        warn!("Notification worker unavailable, dropping notification");
    }

    let status = if comment.approved {
        "published"
    } else {
        "pending_review"
    };
    Ok((StatusCode::CREATED, Json(SubmitResponse { status, comment })))
}

pub(super) fn visitor_email(author: &CommentAuthor) -> Option<String> {
    match author {
        CommentAuthor::Visitor { email, .. } => Some(email.clone()),
        CommentAuthor::Presenter { .. } => None,
    }
}
