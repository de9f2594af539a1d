//! Per-request access decision for protected pages.
//!
//! The guard only looks at the path and at whether a token is present. It
//! never validates the token: an expired or forged token is rejected later by
//! the authentication backend, and the session page clears it.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::{server::ServerState, session};

pub const LOGIN_PATH: &str = "/login";
pub const LANDING_PATH: &str = "/dashboard";
pub const PROTECTED_PATHS: [&str; 2] = ["/dashboard", "/expenses"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect {
        path: String,
        /// Page to return to after logging in.
        redirect: Option<String>,
    },
}

impl GuardDecision {
    /// Target URL of a redirect, with the `redirect` query percent-encoded.
    /// `None` for [`GuardDecision::Allow`].
    pub fn location(&self) -> Option<String> {
        let GuardDecision::Redirect { path, redirect } = self else {
            return None;
        };
        let Some(redirect) = redirect else {
            return Some(path.clone());
        };
        match serde_urlencoded::to_string([("redirect", redirect)]) {
            Ok(query) => Some(format!("{path}?{query}")),
            Err(err) => {
                tracing::error!("failed to encode redirect query: {err}");
                Some(path.clone())
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct RouteGuard {
    protected: Vec<String>,
    login_path: String,
    landing_path: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(PROTECTED_PATHS)
    }
}

impl RouteGuard {
    /// Trailing slashes in `protected` are ignored: `/expenses/` guards the
    /// same pages as `/expenses`.
    pub fn new<I, S>(protected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let protected = protected
            .into_iter()
            .map(Into::into)
            .map(|p| {
                let trimmed = p.trim_end_matches('/');
                if trimmed.is_empty() {
                    "/".to_string()
                } else {
                    trimmed.to_string()
                }
            })
            .collect();
        Self {
            protected,
            login_path: LOGIN_PATH.to_string(),
            landing_path: LANDING_PATH.to_string(),
        }
    }

    #[must_use]
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    #[must_use]
    pub fn with_landing_path(mut self, path: impl Into<String>) -> Self {
        self.landing_path = path.into();
        self
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }

    /// Exact match, or prefix match on a segment boundary: `/expenses`
    /// covers `/expenses/list` but not `/expensesfoo`. The login page is
    /// never protected, even under a `/` prefix.
    pub fn is_protected(&self, path: &str) -> bool {
        if path == self.login_path {
            return false;
        }
        self.protected.iter().any(|prefix| {
            prefix == "/"
                || path == prefix
                || path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// An empty token counts as no token.
    pub fn decide(&self, path: &str, token: Option<&str>) -> GuardDecision {
        let has_token = token.is_some_and(|t| !t.is_empty());

        if self.is_protected(path) {
            if has_token {
                return GuardDecision::Allow;
            }
            return GuardDecision::Redirect {
                path: self.login_path.clone(),
                redirect: Some(path.to_string()),
            };
        }

        if path == self.login_path && has_token {
            return GuardDecision::Redirect {
                path: self.landing_path.clone(),
                redirect: None,
            };
        }

        GuardDecision::Allow
    }
}

/// Middleware applying [`RouteGuard::decide`] to every request.
pub(crate) async fn guard(
    State(state): State<ServerState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let decision = state.guard.decide(&path, session::token(&jar));

    match decision.location() {
        None => next.run(request).await,
        Some(location) => {
            tracing::debug!(%path, %location, "guard redirect");
            Redirect::to(&location).into_response()
        }
    }
}
