//! HTTP client for the authentication backend.
//!
//! The backend is an external collaborator: it issues bearer tokens on login
//! and resolves them back to a [`User`]. Any failure it reports is treated as
//! "not authenticated" by callers.

use api_types::auth::{Credentials, LoginResponse, User};
use reqwest::{Response, Url, header::ACCEPT};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("validation error: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(alias = "message")]
    error: String,
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: Url,
    http: reqwest::Client,
}

impl AuthClient {
    /// `base_url` is the backend root; requests go to `{base_url}/api/...`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut url = Url::parse(base_url)
            .map_err(|err| ClientError::InvalidUrl(format!("{base_url}: {err}")))?;
        if url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        // `join` replaces the last segment unless the path ends with a slash.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self {
            base_url: url,
            http: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::InvalidUrl(format!("{path}: {err}")))
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError> {
        tracing::debug!(email = %credentials.email, "auth login");
        let res = self
            .http
            .post(self.endpoint("api/auth/login")?)
            .header(ACCEPT, "application/json")
            .json(credentials)
            .send()
            .await?;

        let res = check_status(res).await?;
        Ok(res.json::<LoginResponse>().await?)
    }

    pub async fn logout(&self, token: &str) -> Result<(), ClientError> {
        tracing::debug!("auth logout");
        let res = self
            .http
            .post(self.endpoint("api/auth/logout")?)
            .header(ACCEPT, "application/json")
            .bearer_auth(token)
            .send()
            .await?;

        check_status(res).await?;
        Ok(())
    }

    pub async fn current_user(&self, token: &str) -> Result<User, ClientError> {
        let res = self
            .http
            .get(self.endpoint("api/auth/user")?)
            .header(ACCEPT, "application/json")
            .bearer_auth(token)
            .send()
            .await?;

        let res = check_status(res).await?;
        Ok(res.json::<User>().await?)
    }
}

async fn check_status(res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string());

    let err = match status.as_u16() {
        401 => ClientError::Unauthorized,
        403 => ClientError::Forbidden,
        404 => ClientError::NotFound,
        422 => ClientError::Validation(body),
        _ => ClientError::Server(body),
    };
    tracing::debug!(status = status.as_u16(), error = %err, "auth backend rejected request");
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(matches!(
            AuthClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            AuthClient::new("mailto:someone@example.com"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn endpoints_keep_base_path() {
        let client = AuthClient::new("http://localhost:8000/backend").unwrap();
        assert_eq!(
            client.endpoint("api/auth/user").unwrap().as_str(),
            "http://localhost:8000/backend/api/auth/user"
        );

        let client = AuthClient::new("http://localhost:8000").unwrap();
        assert_eq!(
            client.endpoint("api/auth/login").unwrap().as_str(),
            "http://localhost:8000/api/auth/login"
        );
    }
}
