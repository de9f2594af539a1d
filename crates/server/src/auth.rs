//! Login, logout and the current session.

use api_types::auth::{Credentials, LoginForm, LoginPage, LoginQuery};
use auth_client::ClientError;
use axum::{
    Form, Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::{GuardDecision, ServerError, server::ServerState, session};

/// Only same-site absolute paths are followed after login.
fn local_redirect(target: Option<&str>) -> Option<&str> {
    target
        .map(str::trim)
        .filter(|t| t.starts_with('/') && !t.starts_with("//") && !t.starts_with("/\\"))
}

pub async fn login_page(Query(query): Query<LoginQuery>) -> Json<LoginPage> {
    Json(LoginPage {
        redirect: local_redirect(query.redirect.as_deref()).map(str::to_string),
    })
}

pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let credentials = Credentials {
        email: form.email.trim().to_string(),
        password: form.password,
    };

    match state.auth.login(&credentials).await {
        Ok(res) => {
            tracing::info!(user = res.user.id, "user logged in");
            let jar = session::store_token(jar, &res.token, state.token_ttl_days);
            let target = local_redirect(form.redirect.as_deref())
                .unwrap_or(state.guard.landing_path());
            (jar, Redirect::to(target)).into_response()
        }
        Err(err) => {
            tracing::warn!(email = %credentials.email, "login failed: {err}");
            (session::clear_token(jar), ServerError::from(err)).into_response()
        }
    }
}

/// The token is dropped even when the backend cannot be reached.
pub async fn logout(State(state): State<ServerState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(token) = session::token(&jar) {
        if let Err(err) = state.auth.logout(token).await {
            tracing::warn!("logout failed: {err}");
        }
    }
    (
        session::clear_token(jar),
        Redirect::to(state.guard.login_path()),
    )
}

/// The user behind the current token. A token the backend no longer accepts
/// is cleared and the client is sent back to the login page.
pub async fn session(State(state): State<ServerState>, jar: CookieJar) -> Response {
    let Some(token) = session::token(&jar) else {
        return ServerError::Unauthorized.into_response();
    };

    let current = state.auth.current_user(token).await;
    match current {
        Ok(user) => Json(user).into_response(),
        Err(err @ (ClientError::Unauthorized | ClientError::Forbidden)) => {
            tracing::warn!("session rejected: {err}");
            let decision = GuardDecision::Redirect {
                path: state.guard.login_path().to_string(),
                redirect: Some("/session".to_string()),
            };
            let location = decision
                .location()
                .unwrap_or_else(|| state.guard.login_path().to_string());
            (session::clear_token(jar), Redirect::to(&location)).into_response()
        }
        Err(err) => ServerError::from(err).into_response(),
    }
}
