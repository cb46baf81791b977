//! Cookie-authenticated HTTP session against the camera admin interface.
//!
//! This module provides the [`SessionClient`] which fetches snapshots and
//! transparently re-authenticates once when the camera reports an expired
//! session.

use std::sync::Arc;

use chrono::Utc;
use reqwest::cookie::Jar;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::config::{Credentials, SessionConfig};
use super::constants::{CACHE_BUSTER_PARAM, LOGIN_ENDPOINT, MAX_FETCH_ATTEMPTS, SNAPSHOT_ENDPOINT};
use super::error::SessionError;
use crate::user_agent;

/// JSON body of the login request.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Authenticated session against one camera.
///
/// The cookie jar lives inside the HTTP client and is only ever mutated by
/// responses to this client's own requests. Both operations take `&mut self`,
/// so a fetch and a re-login can never interleave with another call on the
/// same session.
///
/// # Example
///
/// ```no_run
/// use camsnap_core::session::{Credentials, SessionClient, SessionConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SessionConfig::new("http://192.168.1.20/", Credentials::new("ubnt", "ubnt"));
/// let mut session = SessionClient::new(config)?;
/// let jpeg = session.fetch().await?;
/// println!("snapshot: {} bytes", jpeg.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SessionClient {
    client: Client,
    base_url: Url,
    login_url: Url,
    credentials: Credentials,
}

impl SessionClient {
    /// Creates a session with an empty cookie jar. No request is sent; the
    /// first login happens lazily when the camera answers 401.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidUrl`] if the base URL is not an
    /// absolute http(s) URL, or [`SessionError::ClientBuild`] if the HTTP
    /// client cannot be constructed.
    #[instrument(level = "debug", skip(config), fields(base_url = %config.base_url))]
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let base_url = normalize_base_url(&config.base_url)?;
        let login_url = endpoint(&base_url, LOGIN_ENDPOINT)?;

        let client = Client::builder()
            .cookie_provider(Arc::new(Jar::default()))
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(|source| SessionError::ClientBuild { source })?;

        debug!(
            username = config.credentials.username(),
            connect_timeout_ms = config.connect_timeout.as_millis(),
            request_timeout_ms = config.request_timeout.as_millis(),
            "created camera session"
        );

        Ok(Self {
            client,
            base_url,
            login_url,
            credentials: config.credentials,
        })
    }

    /// Returns the normalized base URL (always ends with `/`).
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the current snapshot, re-authenticating once on 401.
    ///
    /// At most [`MAX_FETCH_ATTEMPTS`] GET requests are sent per call. A fresh
    /// cache-busting timestamp is used for every attempt.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Network`] / [`SessionError::Timeout`] on transport
    ///   failure (never retried)
    /// - [`SessionError::Login`] if re-authentication is rejected
    /// - [`SessionError::HttpStatus`] for any status other than 200 or 401
    /// - [`SessionError::AuthenticationFailure`] if the camera still answers
    ///   401 after a successful re-login
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch(&mut self) -> Result<Vec<u8>, SessionError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let url = self.snapshot_url()?;
            debug!(attempt, url = %url, "requesting snapshot");

            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| SessionError::transport(url.as_str(), e))?;

            let status = response.status();
            if status == StatusCode::UNAUTHORIZED {
                // No second login here: a rejected retry is final for this tick.
                if attempt >= MAX_FETCH_ATTEMPTS {
                    warn!(attempt, "snapshot still unauthorized after re-authentication");
                    return Err(SessionError::authentication_failure(url.as_str()));
                }
                debug!(attempt, "session expired; re-authenticating");
                self.authenticate().await?;
                continue;
            }
            if status != StatusCode::OK {
                return Err(SessionError::http_status(url.as_str(), status));
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| SessionError::transport(url.as_str(), e))?;
            debug!(attempt, bytes = body.len(), "snapshot received");
            return Ok(body.to_vec());
        }
    }

    /// Logs in with the configured credentials.
    ///
    /// On success the camera's session cookies are stored in the client's jar
    /// and sent with every later request. No retry is attempted here.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Login`] for any status other than 200, or a
    /// transport error if the request could not be completed.
    #[instrument(skip(self), fields(url = %self.login_url))]
    pub async fn authenticate(&mut self) -> Result<(), SessionError> {
        let body = LoginRequest {
            username: self.credentials.username(),
            password: self.credentials.password(),
        };

        let response = self
            .client
            .post(self.login_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| SessionError::transport(self.login_url.as_str(), e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SessionError::login(self.login_url.as_str(), status));
        }

        info!(username = self.credentials.username(), "camera session authenticated");
        Ok(())
    }

    fn snapshot_url(&self) -> Result<Url, SessionError> {
        let mut url = endpoint(&self.base_url, SNAPSHOT_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair(CACHE_BUSTER_PARAM, &Utc::now().timestamp().to_string());
        Ok(url)
    }
}

/// Parses the configured base URL, appending a trailing `/` when missing so
/// that endpoint paths resolve beneath it rather than replacing its last
/// segment.
fn normalize_base_url(raw: &str) -> Result<Url, SessionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SessionError::invalid_url(raw, "empty URL"));
    }
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        debug!(base_url = trimmed, "appending trailing slash to base URL");
        format!("{trimmed}/")
    };

    let url = Url::parse(&with_slash).map_err(|e| SessionError::invalid_url(raw, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SessionError::invalid_url(
            raw,
            format!("unsupported scheme `{}`", url.scheme()),
        ));
    }
    if url.cannot_be_a_base() {
        return Err(SessionError::invalid_url(raw, "URL cannot be a base"));
    }
    Ok(url)
}

fn endpoint(base_url: &Url, relative: &str) -> Result<Url, SessionError> {
    base_url
        .join(relative)
        .map_err(|e| SessionError::invalid_url(base_url.as_str(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    use crate::test_support::socket_guard::start_mock_server_or_skip;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn session_for(base_url: &str) -> SessionClient {
        SessionClient::new(SessionConfig::new(
            base_url,
            Credentials::new("admin", "secret"),
        ))
        .unwrap()
    }

    #[test]
    fn test_normalize_base_url_appends_trailing_slash() {
        let url = normalize_base_url("http://camera.local/admin").unwrap();
        assert_eq!(url.as_str(), "http://camera.local/admin/");
    }

    #[test]
    fn test_normalize_base_url_keeps_existing_slash() {
        let url = normalize_base_url("https://camera.local/").unwrap();
        assert_eq!(url.as_str(), "https://camera.local/");
    }

    #[test]
    fn test_normalize_base_url_rejects_empty() {
        let result = normalize_base_url("   ");
        assert!(matches!(result, Err(SessionError::InvalidUrl { .. })));
    }

    #[test]
    fn test_normalize_base_url_rejects_non_http_scheme() {
        let result = normalize_base_url("ftp://camera.local/");
        match result {
            Err(SessionError::InvalidUrl { reason, .. }) => {
                assert!(reason.contains("ftp"), "unexpected reason: {reason}");
            }
            other => panic!("Expected InvalidUrl, got: {other:?}"),
        }
    }

    #[test]
    fn test_normalize_base_url_rejects_relative() {
        assert!(normalize_base_url("camera.local/").is_err());
    }

    #[test]
    fn test_login_url_resolves_under_base_path() {
        let session = session_for("http://camera.local/admin");
        assert_eq!(
            session.login_url.as_str(),
            "http://camera.local/admin/api/1.0/login"
        );
    }

    #[test]
    fn test_snapshot_url_carries_cache_buster() {
        let session = session_for("http://camera.local/");
        let url = session.snapshot_url().unwrap();
        assert_eq!(url.path(), "/snap.jpeg");
        let cb = url
            .query_pairs()
            .find(|(key, _)| key == "cb")
            .map(|(_, value)| value.into_owned())
            .expect("cb param present");
        let cb: i64 = cb.parse().expect("cb is a unix timestamp");
        assert!((Utc::now().timestamp() - cb).abs() <= 5);
    }

    #[test]
    fn test_login_request_serializes_expected_fields() {
        let body = LoginRequest {
            username: "admin",
            password: "secret",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"username": "admin", "password": "secret"})
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_body_on_200() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/snap.jpeg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\xff\xd8jpeg".to_vec()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut session = session_for(&mock_server.uri());
        let body = session.fetch().await.unwrap();
        assert_eq!(body, b"\xff\xd8jpeg");
    }

    #[tokio::test]
    async fn test_requests_send_user_agent() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/snap.jpeg"))
            .and(header("user-agent", user_agent::default_user_agent().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"img".to_vec()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut session = session_for(&mock_server.uri());
        assert!(session.fetch().await.is_ok());
    }

    #[tokio::test]
    async fn test_authenticate_sends_json_content_type() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("POST"))
            .and(path("/api/1.0/login"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut session = session_for(&mock_server.uri());
        assert!(session.authenticate().await.is_ok());
    }
}
