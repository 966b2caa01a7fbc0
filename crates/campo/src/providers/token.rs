use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::clock::Clock;
use crate::errors::{CampoError, Result};

/// Tokens are treated as expired this long before the provider says they are.
pub const SAFETY_MARGIN_SECS: i64 = 300;

const GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";
const DEFAULT_TTL_SECS: i64 = 3600;
// IAM error code for an API key that does not exist
const UNKNOWN_API_KEY_CODE: &str = "BXNIM0415E";

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_ttl")]
    expires_in: i64,
}

fn default_ttl() -> i64 {
    DEFAULT_TTL_SECS
}

/// Exchanges an API key for a bearer token and reuses it until shortly before expiry.
///
/// The lock is held across the exchange, so concurrent callers wait for one
/// refresh instead of each starting their own.
pub struct TokenCache {
    client: Client,
    token_url: String,
    api_key: String,
    clock: Arc<dyn Clock>,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(
        client: Client,
        token_url: impl Into<String>,
        api_key: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            api_key: api_key.into(),
            clock,
            cached: Mutex::new(None),
        }
    }

    pub fn get_token(&self) -> Result<String> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| CampoError::Auth("token cache lock poisoned".to_string()))?;

        if let Some(token) = cached.as_ref() {
            if self.clock.now() < token.expires_at {
                return Ok(token.access_token.clone());
            }
            tracing::debug!("Cached access token expired, refreshing");
        }

        let fresh = self.exchange()?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    fn exchange(&self) -> Result<CachedToken> {
        let prefix: String = self.api_key.chars().take(8).collect();
        tracing::info!("Requesting access token with API key {}...", prefix);

        let params = [("grant_type", GRANT_TYPE), ("apikey", self.api_key.as_str())];
        let response = self
            .client
            .post(&self.token_url)
            .header("Accept", "application/json")
            .form(&params)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            if body.contains(UNKNOWN_API_KEY_CODE) {
                return Err(CampoError::Auth(format!(
                    "API key not found, check the configured key: {}",
                    body
                )));
            }
            return Err(CampoError::Auth(format!(
                "failed to get access token (status {}): {}",
                status.as_u16(),
                body
            )));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| CampoError::Auth(format!("invalid token response: {}", e)))?;

        let expires_at = token
            .expires_in
            .checked_sub(SAFETY_MARGIN_SECS)
            .and_then(Duration::try_seconds)
            .and_then(|ttl| self.clock.now().checked_add_signed(ttl))
            .ok_or_else(|| {
                CampoError::Auth(format!("invalid expires_in {}", token.expires_in))
            })?;
        tracing::debug!("Access token valid until {}", expires_at);

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::testing::ManualClock;
    use chrono::TimeZone;
    use mockito::{Matcher, Server};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn cache(server: &Server, clock: Arc<ManualClock>) -> TokenCache {
        TokenCache::new(
            Client::new(),
            format!("{}/identity/token", server.url()),
            "test-api-key",
            clock,
        )
    }

    #[test]
    fn test_token_reused_within_margin() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/identity/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), GRANT_TYPE.into()),
                Matcher::UrlEncoded("apikey".into(), "test-api-key".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"access_token": "tok-1", "expires_in": 3600}"#)
            .expect(1)
            .create();

        let clock = Arc::new(ManualClock::new(start()));
        let tokens = cache(&server, clock.clone());

        assert_eq!(tokens.get_token().unwrap(), "tok-1");
        clock.advance(Duration::seconds(3000));
        assert_eq!(tokens.get_token().unwrap(), "tok-1");

        mock.assert();
    }

    #[test]
    fn test_token_refreshed_after_margin() {
        let mut server = Server::new();
        let first = server
            .mock("POST", "/identity/token")
            .with_status(200)
            .with_body(r#"{"access_token": "tok-1", "expires_in": 3600}"#)
            .expect(1)
            .create();

        let clock = Arc::new(ManualClock::new(start()));
        let tokens = cache(&server, clock.clone());
        assert_eq!(tokens.get_token().unwrap(), "tok-1");
        first.assert();
        first.remove();

        let second = server
            .mock("POST", "/identity/token")
            .with_status(200)
            .with_body(r#"{"access_token": "tok-2", "expires_in": 3600}"#)
            .expect(1)
            .create();

        // exactly at expiry minus the margin the old token is no longer used
        clock.advance(Duration::seconds(3600 - SAFETY_MARGIN_SECS));
        assert_eq!(tokens.get_token().unwrap(), "tok-2");
        assert_eq!(tokens.get_token().unwrap(), "tok-2");

        second.assert();
    }

    #[test]
    fn test_missing_expiry_defaults_to_an_hour() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/identity/token")
            .with_status(200)
            .with_body(r#"{"access_token": "tok-1"}"#)
            .expect(1)
            .create();

        let clock = Arc::new(ManualClock::new(start()));
        let tokens = cache(&server, clock.clone());
        tokens.get_token().unwrap();
        clock.advance(Duration::seconds(3299));
        tokens.get_token().unwrap();

        mock.assert();
    }

    #[test]
    fn test_rejected_key_is_auth_error() {
        let mut server = Server::new();
        server
            .mock("POST", "/identity/token")
            .with_status(400)
            .with_body(r#"{"errorCode": "BXNIM0415E", "errorMessage": "Provided API key could not be found."}"#)
            .create();

        let tokens = cache(&server, Arc::new(ManualClock::new(start())));
        match tokens.get_token() {
            Err(CampoError::Auth(msg)) => assert!(msg.contains("API key not found")),
            other => panic!("Expected Auth error, got {:?}", other),
        }
    }

    #[test]
    fn test_server_error_is_auth_error() {
        let mut server = Server::new();
        server
            .mock("POST", "/identity/token")
            .with_status(503)
            .with_body("unavailable")
            .create();

        let tokens = cache(&server, Arc::new(ManualClock::new(start())));
        match tokens.get_token() {
            Err(CampoError::Auth(msg)) => assert!(msg.contains("503")),
            other => panic!("Expected Auth error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_body_is_auth_error() {
        let mut server = Server::new();
        server
            .mock("POST", "/identity/token")
            .with_status(200)
            .with_body(r#"{"token": "no access_token field"}"#)
            .create();

        let tokens = cache(&server, Arc::new(ManualClock::new(start())));
        assert!(matches!(tokens.get_token(), Err(CampoError::Auth(_))));
    }

    #[test]
    fn test_out_of_range_expiry_is_auth_error() {
        let mut server = Server::new();
        server
            .mock("POST", "/identity/token")
            .with_status(200)
            .with_body(r#"{"access_token": "tok-1", "expires_in": 9223372036854775807}"#)
            .create();

        let tokens = cache(&server, Arc::new(ManualClock::new(start())));
        match tokens.get_token() {
            Err(CampoError::Auth(msg)) => assert!(msg.contains("invalid expires_in")),
            other => panic!("Expected Auth error, got {:?}", other),
        }
    }
}
