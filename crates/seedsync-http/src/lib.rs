// # HTTP Collaborators
//
// This crate provides the two network collaborators consumed by the
// seedsync engine:
//
// - **HttpIpSource**: resolves the machine's public IP from a plain-text
//   endpoint (e.g. https://api.ipify.org)
// - **DynamicSeedboxClient**: performs the dynamic-seedbox update call,
//   carrying the session cookies out and the renewed ones back in
//
// Both are single-shot: one HTTP exchange per invocation, no retries, no
// state between calls. Cancellation and scheduling are the caller's concern.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::net::IpAddr;
use std::time::Duration;

use seedsync_core::session::{SessionCookie, SessionState};
use seedsync_core::traits::{IpSource, SeedboxClient, UpdateReply};
use seedsync_core::{Error, Result};

/// Timeout applied to every outgoing request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| Error::config(format!("failed to build http client: {}", e)))
}

/// Public-IP source backed by a plain-text HTTP endpoint
pub struct HttpIpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpIpSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            url: url.into(),
            client: build_client()?,
        })
    }
}

#[async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<IpAddr> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("ip lookup request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::transport(format!(
                "ip lookup returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("failed to read ip lookup response: {}", e)))?;

        let trimmed = body.trim();
        trimmed
            .parse()
            .map_err(|_| Error::decode(format!("ip lookup returned invalid address: {:?}", trimmed)))
    }
}

/// Logical payload of the dynamic-seedbox endpoint
#[derive(Debug, Deserialize)]
struct DynamicSeedboxResponse {
    #[serde(rename = "Success")]
    success: bool,
    msg: String,
}

/// Client for the dynamic-seedbox update endpoint
///
/// The endpoint authenticates via cookies and rotates them in its response;
/// this client forwards the given session as a `Cookie` header and captures
/// whatever `Set-Cookie` metadata comes back. It never interprets the
/// success flag, that stays with the engine.
pub struct DynamicSeedboxClient {
    url: String,
    client: reqwest::Client,
}

impl DynamicSeedboxClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            url: url.into(),
            client: build_client()?,
        })
    }

    fn cookie_from_response(cookie: &reqwest::cookie::Cookie<'_>) -> SessionCookie {
        SessionCookie {
            name: cookie.name().to_string(),
            value: cookie.value().to_string(),
            domain: cookie.domain().map(str::to_string),
            path: cookie.path().map(str::to_string),
            expires: cookie.expires().map(DateTime::<Utc>::from),
        }
    }
}

#[async_trait]
impl SeedboxClient for DynamicSeedboxClient {
    async fn update(&self, session: &SessionState) -> Result<UpdateReply> {
        let mut request = self.client.get(&self.url);
        if !session.is_empty() {
            request = request.header(reqwest::header::COOKIE, session.cookie_header());
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(format!("seedbox request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::transport(format!(
                "seedbox endpoint returned {}",
                response.status()
            )));
        }

        // Capture the session-establishing cookies before consuming the body
        let cookies: Vec<SessionCookie> = response
            .cookies()
            .map(|c| Self::cookie_from_response(&c))
            .collect();
        tracing::debug!(count = cookies.len(), "response established cookies");

        let payload: DynamicSeedboxResponse = response
            .json()
            .await
            .map_err(|e| Error::decode(format!("seedbox response is not well-formed: {}", e)))?;

        Ok(UpdateReply {
            success: payload.success,
            message: payload.msg,
            session: SessionState::from_cookies(cookies),
        })
    }
}
