use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::{info, warn};

use crate::auth::session_cookie;
use crate::errors::AppError;
use crate::render::templates::LoginPage;
use crate::sessions::{SessionId, SESSION_COOKIE};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid credentials. Try again.";

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login
pub async fn handle_login_page() -> Result<Html<String>, AppError> {
    Ok(Html(LoginPage { error: None }.render()?))
}

/// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if !state.credentials.verify(&form.username, &form.password) {
        warn!("Failed login attempt");
        let page = LoginPage {
            error: Some(INVALID_CREDENTIALS),
        };
        return Ok((StatusCode::UNAUTHORIZED, Html(page.render()?)).into_response());
    }

    // a fresh login replaces whatever session this browser held
    if let Some(previous) = session_cookie(&jar) {
        state.sessions.remove(previous);
    }
    let SessionId(id) = state.sessions.create();
    info!("Login successful");
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    Ok((jar.add(cookie), Redirect::to("/")).into_response())
}

/// POST /logout
pub async fn handle_logout(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    jar: CookieJar,
) -> impl IntoResponse {
    state.sessions.remove(session);
    info!("Logged out");
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Redirect::to("/login"),
    )
}
