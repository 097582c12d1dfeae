//! Reqwest-backed [`IdentityProvider`].
//!
//! Trades a bearer access token for the user it belongs to by calling the
//! auth service's user endpoint with the project API key.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use zeroize::Zeroizing;

use super::dto::AuthUserDto;
use crate::domain::Identity;
use crate::domain::ports::{IdentityProvider, IdentityProviderError};

const USER_PATH: &str = "auth/v1/user";
const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired access token";

/// Resolve the user endpoint below the service `base` URL.
///
/// # Errors
///
/// Returns the parse error when `base` cannot be joined with the path.
///
/// # Examples
/// ```
/// use backend::outbound::identity::user_endpoint;
/// use reqwest::Url;
///
/// let base = Url::parse("https://project.auth.example").unwrap();
/// let endpoint = user_endpoint(&base).unwrap();
/// assert_eq!(endpoint.as_str(), "https://project.auth.example/auth/v1/user");
/// ```
pub fn user_endpoint(base: &Url) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(USER_PATH)
}

/// HTTP client for the auth service.
pub struct HttpIdentityProvider {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
}

impl HttpIdentityProvider {
    /// Build a provider calling `endpoint` with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, api_key: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: Zeroizing::new(api_key),
        })
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn resolve(&self, access_token: &str) -> Result<Identity, IdentityProviderError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .bearer_auth(access_token)
            .header("apikey", self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| IdentityProviderError::unavailable(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| IdentityProviderError::unavailable(err.to_string()))?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_identity(body.as_ref())
    }
}

fn parse_identity(body: &[u8]) -> Result<Identity, IdentityProviderError> {
    let decoded: AuthUserDto = serde_json::from_slice(body).map_err(|err| {
        IdentityProviderError::unavailable(format!("invalid user payload: {err}"))
    })?;
    decoded
        .into_identity()
        .map_err(IdentityProviderError::unavailable)
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            IdentityProviderError::invalid_token(INVALID_TOKEN_MESSAGE)
        }
        _ => {
            let preview = body_preview(body);
            if preview.is_empty() {
                IdentityProviderError::unavailable(format!("status {}", status.as_u16()))
            } else {
                IdentityProviderError::unavailable(format!("status {}: {preview}", status.as_u16()))
            }
        }
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
        format!("{preview}...")
    } else {
        compact
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://project.auth.example", "https://project.auth.example/auth/v1/user")]
    #[case("https://project.auth.example/", "https://project.auth.example/auth/v1/user")]
    #[case("http://localhost:9999/gateway", "http://localhost:9999/gateway/auth/v1/user")]
    fn endpoint_is_joined_below_base_path(#[case] base: &str, #[case] expected: &str) {
        let base = Url::parse(base).expect("valid base url");
        let endpoint = user_endpoint(&base).expect("joinable");
        assert_eq!(endpoint.as_str(), expected);
    }

    #[rstest]
    fn parses_user_payload_into_identity() {
        let body = br#"{
            "id": "7d3c4b2a-1f0e-4d5c-9b8a-6f5e4d3c2b1a",
            "email": "minji@example.com",
            "aud": "authenticated"
        }"#;

        let identity = parse_identity(body).expect("payload decodes");
        assert_eq!(
            identity.id.to_string(),
            "7d3c4b2a-1f0e-4d5c-9b8a-6f5e4d3c2b1a"
        );
        assert_eq!(identity.email.as_deref(), Some("minji@example.com"));
    }

    #[rstest]
    #[case(br#"{"id":"not-a-uuid"}"#.as_slice())]
    #[case(b"<html>bad gateway</html>".as_slice())]
    fn malformed_payloads_are_unavailable(#[case] body: &[u8]) {
        let err = parse_identity(body).expect_err("payload rejected");
        assert!(matches!(err, IdentityProviderError::Unavailable { .. }));
    }

    #[rstest]
    #[case(StatusCode::UNAUTHORIZED)]
    #[case(StatusCode::FORBIDDEN)]
    fn rejected_tokens_are_invalid(#[case] status: StatusCode) {
        let err = map_status_error(status, b"{\"msg\":\"jwt expired\"}");
        assert_eq!(err, IdentityProviderError::invalid_token(INVALID_TOKEN_MESSAGE));
    }

    #[rstest]
    fn server_errors_carry_a_body_preview() {
        let err = map_status_error(StatusCode::BAD_GATEWAY, b"upstream   exploded\n");
        assert_eq!(
            err,
            IdentityProviderError::unavailable("status 502: upstream exploded")
        );
    }

    #[rstest]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(500);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.chars().count(), 123);
        assert!(preview.ends_with("..."));
    }
}
