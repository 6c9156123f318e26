use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::{AppError, Talk, TalkForm, User};

use crate::{
    auth::AuthUser,
    error::ApiError,
    pagination::{PageParams, PageResponse},
    state::AppState,
};

pub async fn list_talks(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<PageResponse<Talk>>, ApiError> {
    let bounds = params.bounds(state.talks_per_page);
    let page = state.db.list_talks(bounds.limit, bounds.offset).await?;
    Ok(Json(PageResponse::new(page, bounds)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .db
        .get_user_by_username(&username)
        .await?
        .ok_or(AppError::NotFound("user"))?;
    Ok(Json(user))
}

pub async fn list_user_talks(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<PageResponse<Talk>>, ApiError> {
    let user = state
        .db
        .get_user_by_username(&username)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    let bounds = params.bounds(state.talks_per_page);
    let page = state
        .db
        .list_talks_by_author(user.id, bounds.limit, bounds.offset)
        .await?;
    Ok(Json(PageResponse::new(page, bounds)))
}

pub async fn get_talk(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Talk>, ApiError> {
    let talk = state
        .db
        .get_talk(id)
        .await?
        .ok_or(AppError::NotFound("talk"))?;
    Ok(Json(talk))
}

pub async fn create_talk(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(form): Json<TalkForm>,
) -> Result<(StatusCode, Json<Talk>), ApiError> {
    let fields = form.validate().map_err(AppError::Validation)?;
    let talk = state.db.insert_talk(user.id, &fields).await?;
    Ok((StatusCode::CREATED, Json(talk)))
}

pub async fn edit_talk(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(form): Json<TalkForm>,
) -> Result<Json<Talk>, ApiError> {
    let talk = state
        .db
        .get_talk(id)
        .await?
        .ok_or(AppError::NotFound("talk"))?;

    // 只有作者本人或管理员能改，校验失败前不落任何写操作
    if !auth.identity().can_manage(&talk) {
        return Err(AppError::Forbidden.into());
    }

    let fields = form.validate().map_err(AppError::Validation)?;
    state.db.update_talk(id, &fields).await?;

    let updated = state
        .db
        .get_talk(id)
        .await?
        .ok_or(AppError::NotFound("talk"))?;
    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain::Username;
    use storage::Db;
    use tokio::sync::mpsc;

    async fn test_state() -> AppState {
        let db = Db::new("sqlite::memory:").await.unwrap();
        let (tx, _rx) = mpsc::channel(4);
        AppState {
            db,
            notifier: tx,
            unsubscribe_secret: "secret".into(),
            talks_per_page: 10,
            comments_per_page: 20,
        }
    }

    async fn mk_user(state: &AppState, username: &str, is_admin: bool) -> User {
        state
            .db
            .insert_user(
                &Username::new(username).unwrap(),
                &format!("{}@example.org", username),
                "salt$hash",
                &format!("token-{}", username),
                is_admin,
            )
            .await
            .unwrap()
    }

    fn form(title: &str) -> TalkForm {
        TalkForm {
            title: title.to_string(),
            description: "About things.".to_string(),
            slides: None,
            video: None,
            venue: None,
            venue_url: None,
            date: NaiveDate::from_ymd_opt(2026, 4, 1)
                .unwrap()
                .and_hms_opt(19, 0, 0)
                .unwrap(),
        }
    }

    #[tokio::test]
    async fn edit_by_non_owner_is_forbidden_and_mutates_nothing() {
        let state = test_state().await;
        let alice = mk_user(&state, "alice", false).await;
        let mallory = mk_user(&state, "mallory", false).await;
        let talk = state
            .db
            .insert_talk(alice.id, &form("Original").validate().unwrap())
            .await
            .unwrap();

        let result = edit_talk(
            State(state.clone()),
            AuthUser(mallory),
            Path(talk.id),
            Json(form("Hijacked")),
        )
        .await;
        assert!(matches!(result, Err(ApiError::App(AppError::Forbidden))));

        // 拒绝之后演讲必须原封不动
        let stored = state.db.get_talk(talk.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Original");
    }

    #[tokio::test]
    async fn owner_and_admin_may_edit() {
        let state = test_state().await;
        let alice = mk_user(&state, "alice", false).await;
        let admin = mk_user(&state, "root", true).await;
        let talk = state
            .db
            .insert_talk(alice.id, &form("Original").validate().unwrap())
            .await
            .unwrap();

        let updated = edit_talk(
            State(state.clone()),
            AuthUser(alice),
            Path(talk.id),
            Json(form("By Owner")),
        )
        .await
        .unwrap();
        assert_eq!(updated.0.title, "By Owner");

        let updated = edit_talk(
            State(state.clone()),
            AuthUser(admin),
            Path(talk.id),
            Json(form("By Admin")),
        )
        .await
        .unwrap();
        assert_eq!(updated.0.title, "By Admin");
    }

    #[tokio::test]
    async fn edit_of_unknown_talk_is_not_found() {
        let state = test_state().await;
        let alice = mk_user(&state, "alice", false).await;

        let result = edit_talk(
            State(state.clone()),
            AuthUser(alice),
            Path(999),
            Json(form("Ghost")),
        )
        .await;
        assert!(matches!(
            result,
            Err(ApiError::App(AppError::NotFound("talk")))
        ));
    }
}
