use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::{error::ApiError, state::AppState};

/// 兑现退订 token。无效或已消费的 token 是软提示而不是硬错误。
pub async fn unsubscribe(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let Some((talk_id, email)) = notify::token::verify(&state.unsubscribe_secret, &token) else {
        return Ok(Json(invalid_token()));
    };

    let removed = state.db.remove_pending_for(talk_id, &email).await?;
    if removed == 0 {
        // token 签名没问题但队列里已经没有它的邮件：已被消费过
        return Ok(Json(invalid_token()));
    }

    // 永久退订：后续该演讲的通知不再排队
    state.db.clear_notify_flag(talk_id, &email).await?;

    Ok(Json(json!({
        "status": "unsubscribed",
        "talk_id": talk_id,
        "message": "You will not receive any more email notifications about this talk.",
    })))
}

fn invalid_token() -> Value {
    json!({
        "status": "invalid_token",
        "message": "Invalid unsubscribe token.",
    })
}
