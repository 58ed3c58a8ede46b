//! [`CredentialVerifier`] over the palmares-web login endpoint.

use std::time::Duration;

use async_trait::async_trait;
use palmares_core::{CredentialVerifier, IdentifierKind, TransportError, User, VerifyOutcome};
use serde::Deserialize;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A signed-in user and the bearer token issued for later calls.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
    pub expires_at: u64,
}

pub struct HttpVerifier {
    client: reqwest::Client,
    login_url: String,
}

impl HttpVerifier {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("palmares-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            login_url: format!("{}/api/auth/login", base_url.trim_end_matches('/')),
        })
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }
}

/// Request body: the identifier goes under the field named after its kind.
fn login_body(kind: IdentifierKind, identifier: &str, password: &str) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    body.insert(kind.as_str().to_string(), identifier.into());
    body.insert("password".to_string(), password.into());
    serde_json::Value::Object(body)
}

/// Maps a login response to a verification result.
///
/// Only 200 and 401 are answers about the credentials; everything else
/// means the check did not happen.
pub fn classify(status: u16, body: &[u8]) -> Result<VerifyOutcome<Session>, TransportError> {
    match status {
        200 => serde_json::from_slice::<Session>(body)
            .map(VerifyOutcome::Valid)
            .map_err(|e| TransportError::Malformed(e.to_string())),
        401 => Ok(VerifyOutcome::Invalid),
        other => Err(TransportError::UnexpectedStatus(other)),
    }
}

#[async_trait]
impl CredentialVerifier for HttpVerifier {
    type User = Session;

    async fn verify(
        &self,
        kind: IdentifierKind,
        identifier: &str,
        password: &str,
    ) -> Result<VerifyOutcome<Session>, TransportError> {
        let response = self
            .client
            .post(&self.login_url)
            .json(&login_body(kind, identifier, password))
            .send()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;
        tracing::debug!(status, "login endpoint answered");
        classify(status, &body)
    }
}
