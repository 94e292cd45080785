use axum::{
    extract::{Form, State},
    response::{Html, Redirect},
    routing::get,
    Router,
};
use std::sync::Arc;
use tera::{Context, Tera};

use crate::data::models::{LoginError, LoginForm};
use crate::{
    data::repositories::UserRepository,
    database::DbPool,
    utils::{render_template, set_user_session},
};

pub async fn show_login_form(
    State((_pool, tera)): State<(DbPool, Arc<Tera>)>,
) -> Result<Html<String>, LoginError> {
    let mut context = Context::new();
    context.insert("title", "Entrar");
    Ok(render_template(&tera, "login.html", context))
}

#[axum::debug_handler]
pub async fn handle_login(
    State((pool, _tera)): State<(DbPool, Arc<Tera>)>,
    session: tower_sessions::Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, LoginError> {
    let email = form.email.trim().to_lowercase();

    let mut conn = pool.get().map_err(|e| {
        log::error!("Failed to get DB connection: {}", e);
        LoginError::SessionError("Failed to get DB connection".into())
    })?;

    let user = UserRepository::find_by_email(&mut conn, &email)?;

    match user {
        Some(user) => {
            if UserRepository::verify_password(&user.password, &form.password)? {
                set_user_session(&session, user.user_id, &user.email).await?;
                log::info!("User {} logged in", user.user_id);
                Ok(Redirect::to("/dashboard"))
            } else {
                log::warn!("Invalid password for user: {}", email);
                Err(LoginError::InvalidCredentials)
            }
        }
        None => {
            log::warn!("User not found: {}", email);
            Err(LoginError::InvalidCredentials)
        }
    }
}

pub async fn handle_logout(session: tower_sessions::Session) -> Result<Redirect, LoginError> {
    session.delete().await.map_err(|e| {
        log::error!("Failed to delete session: {}", e);
        LoginError::SessionError("Failed to logout".into())
    })?;
    Ok(Redirect::to("/"))
}

pub fn auth_router(pool: DbPool, tera: Arc<Tera>) -> Router {
    Router::new()
        .route("/login", get(show_login_form).post(handle_login))
        .route("/logout", get(handle_logout))
        .with_state((pool, tera))
}
