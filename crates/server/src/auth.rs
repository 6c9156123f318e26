use crate::{error::ApiError, state::AppState};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::{Identity, User};

/// 必须登录的端点用这个提取器，拿不到有效 token 直接 401。
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn identity(&self) -> Identity {
        Identity::from(&self.0)
    }
}

/// 公共端点用：登录与否都放行，身份决定可见范围。
pub struct MaybeAuthUser(pub Option<User>);

impl MaybeAuthUser {
    pub fn identity(&self) -> Option<Identity> {
        self.0.as_ref().map(Identity::from)
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ApiError::Unauthorized)?;
        let user = state
            .db
            .get_user_by_token(token)
            .await?
            .ok_or(ApiError::Unauthorized)?;
        Ok(AuthUser(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = match bearer_token(parts) {
            // 带了 token 就必须是有效的，防止静默降级成匿名视图
            Some(token) => Some(
                state
                    .db
                    .get_user_by_token(token)
                    .await?
                    .ok_or(ApiError::Unauthorized)?,
            ),
            None => None,
        };
        Ok(MaybeAuthUser(user))
    }
}
