use axum::extract::{Json, State};
use validator::Validate;

use crate::{
    data::models::{ApiError, ProfileView, UpdateProfileRequest},
    data::repositories::{ProfileRepository, UserRepository},
    database::DbPool,
    utils,
};

pub async fn get_profile(
    State(pool): State<DbPool>,
    session: tower_sessions::Session,
) -> Result<Json<ProfileView>, ApiError> {
    let user_id = utils::require_user(&session).await?;
    let mut conn = pool.get()?;

    let user = UserRepository::find_by_id(&mut conn, user_id)?.ok_or(ApiError::Unauthorized)?;
    let profile = ProfileRepository::find(&mut conn, user_id)?;

    // a user without a profile row reads as blank fields
    let (full_name, study_focus) = profile
        .map(|p| (p.full_name, p.study_focus))
        .unwrap_or_default();

    Ok(Json(ProfileView {
        full_name,
        study_focus,
        email: user.email,
    }))
}

pub async fn update_profile(
    State(pool): State<DbPool>,
    session: tower_sessions::Session,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileView>, ApiError> {
    let user_id = utils::require_user(&session).await?;
    payload.validate()?;

    let mut conn = pool.get()?;
    let user = UserRepository::find_by_id(&mut conn, user_id)?.ok_or(ApiError::Unauthorized)?;
    let profile =
        ProfileRepository::upsert(&mut conn, user_id, &payload.full_name, &payload.study_focus)?;

    log::info!("User {} updated their profile", user_id);
    Ok(Json(ProfileView {
        full_name: profile.full_name,
        study_focus: profile.study_focus,
        email: user.email,
    }))
}
