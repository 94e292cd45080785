use axum::{
    extract::{Extension, Path},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tera::{Context, Tera};

use crate::utils::{self, render_template};

const LOGIN_PATH: &str = "/auth/login";

async fn render_private(
    session: &tower_sessions::Session,
    tera: &Tera,
    template: &str,
    mut context: Context,
) -> Response {
    if !utils::is_logged_in(session).await {
        return Redirect::to(LOGIN_PATH).into_response();
    }

    let user_email = utils::get_current_user_email(session).await.unwrap_or_default();
    context.insert("user_email", &user_email);
    render_template(tera, template, context).into_response()
}

fn titled(title: &str) -> Context {
    let mut context = Context::new();
    context.insert("title", title);
    context
}

pub async fn landing(
    Extension(tera): Extension<Arc<Tera>>,
    session: tower_sessions::Session,
) -> Html<String> {
    let mut context = titled("Flipei");
    context.insert("logged_in", &utils::is_logged_in(&session).await);
    render_template(&tera, "landing.html", context)
}

pub async fn dashboard(
    Extension(tera): Extension<Arc<Tera>>,
    session: tower_sessions::Session,
) -> Response {
    render_private(&session, &tera, "dashboard.html", titled("Dashboard")).await
}

pub async fn decks(
    Extension(tera): Extension<Arc<Tera>>,
    session: tower_sessions::Session,
) -> Response {
    render_private(&session, &tera, "decks.html", titled("Meus decks")).await
}

pub async fn study(
    Path(deck_id): Path<i32>,
    Extension(tera): Extension<Arc<Tera>>,
    session: tower_sessions::Session,
) -> Response {
    let mut context = titled("Estudar");
    context.insert("deck_id", &deck_id);
    render_private(&session, &tera, "study.html", context).await
}

pub async fn generate(
    Extension(tera): Extension<Arc<Tera>>,
    session: tower_sessions::Session,
) -> Response {
    render_private(&session, &tera, "generate.html", titled("Gerar cards")).await
}

pub async fn progress(
    Extension(tera): Extension<Arc<Tera>>,
    session: tower_sessions::Session,
) -> Response {
    render_private(&session, &tera, "progress.html", titled("Meu progresso")).await
}

pub async fn settings(
    Extension(tera): Extension<Arc<Tera>>,
    session: tower_sessions::Session,
) -> Response {
    render_private(&session, &tera, "settings.html", titled("Configurações")).await
}

pub fn page_router() -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/dashboard", get(dashboard))
        .route("/decks", get(decks))
        .route("/study/{deck_id}", get(study))
        .route("/generate", get(generate))
        .route("/progress", get(progress))
        .route("/settings", get(settings))
}
