use axum::{
    extract::{Path, State},
    Json,
};
use domain::{AppError, Comment, Notification};
use serde_json::{json, Value};
use tracing::warn;

use super::comments::visitor_email;
use crate::{auth::AuthUser, error::ApiError, state::AppState};

/// 个人审核队列：自己演讲下的待审评论，时间正序。
pub async fn personal_queue(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = state.db.moderation_queue_for(user.id).await?;
    Ok(Json(comments))
}

/// 全站审核队列，仅管理员。
pub async fn admin_queue(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Comment>>, ApiError> {
    if !user.is_admin {
        return Err(AppError::Forbidden.into());
    }
    let comments = state.db.moderation_queue_all().await?;
    Ok(Json(comments))
}

pub async fn approve_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let comment = state
        .db
        .get_comment(comment_id)
        .await?
        .ok_or(AppError::NotFound("comment"))?;
    let talk = state
        .db
        .get_talk(comment.talk_id)
        .await?
        .ok_or(AppError::NotFound("talk"))?;

    if !auth.identity().can_manage(&talk) {
        return Err(AppError::Forbidden.into());
    }

    let flipped = state.db.approve_comment(comment.id).await?;
    if flipped {
        // 批准即发布，给订阅者发通知
        let notification = Notification::CommentPublished {
            talk_id: talk.id,
            comment_id: comment.id,
            exclude_email: visitor_email(&comment.author),
        };
        if state.notifier.send(notification).await.is_err() {
            warn!("Notification worker unavailable, dropping notification");
        }
    }

    Ok(Json(json!({
        "status": if flipped { "approved" } else { "already_approved" },
    })))
}
