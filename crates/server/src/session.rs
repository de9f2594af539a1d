//! Auth token kept in the `auth_token` cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const TOKEN_COOKIE: &str = "auth_token";
pub const DEFAULT_TTL_DAYS: i64 = 7;
/// Browsers cap cookie lifetimes at 400 days.
pub const MAX_TTL_DAYS: i64 = 400;

/// Current token, if any. An empty cookie value counts as no token.
pub fn token(jar: &CookieJar) -> Option<&str> {
    jar.get(TOKEN_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
}

/// `ttl_days` is clamped to `1..=MAX_TTL_DAYS`.
#[must_use]
pub fn store_token(jar: CookieJar, value: &str, ttl_days: i64) -> CookieJar {
    let ttl_days = ttl_days.clamp(1, MAX_TTL_DAYS);
    let cookie = Cookie::build((TOKEN_COOKIE, value.to_string()))
        .path("/")
        .max_age(time::Duration::days(ttl_days))
        .same_site(SameSite::Lax)
        .http_only(true);
    jar.add(cookie)
}

/// Emits a removal cookie when the request carried a token.
#[must_use]
pub fn clear_token(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(TOKEN_COOKIE).path("/"))
}
