use axum::{extract::State, Json};
use domain::{ProfileForm, User};

use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub async fn get_profile(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(form): Json<ProfileForm>,
) -> Result<Json<User>, ApiError> {
    let form = form.normalized();
    state.db.update_profile(user.id, &form).await?;

    Ok(Json(User {
        name: form.name,
        location: form.location,
        bio: form.bio,
        ..user
    }))
}
