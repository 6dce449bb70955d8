use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::sessions::{SessionId, SESSION_COOKIE};
use crate::state::AppState;

/// Single configured username/password pair.
#[derive(Clone)]
pub struct CredentialGate {
    username: String,
    password: String,
}

impl CredentialGate {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        CredentialGate {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Exact, case-sensitive match on both fields.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

impl std::fmt::Debug for CredentialGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialGate")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Session id named by the request's cookie, if it parses.
pub fn session_cookie(jar: &CookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
        .map(SessionId)
}

/// Admits requests carrying a live session cookie and records the session id
/// in request extensions. Others are sent to `/login`, or get a 401 on `/api/`.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let session = session_cookie(&jar).filter(|id| state.sessions.touch(*id));

    match session {
        Some(id) => {
            request.extensions_mut().insert(id);
            next.run(request).await
        }
        None => {
            let path = request.uri().path();
            warn!("Unauthenticated request to {path}");
            if path.starts_with("/api/") {
                AppError::Unauthorized.into_response()
            } else {
                Redirect::to("/login").into_response()
            }
        }
    }
}
