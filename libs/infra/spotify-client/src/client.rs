// [libs/infra/spotify-client/src/client.rs]
/*!
 * APARATO: SPOTIFY HTTP CLIENT
 * RESPONSABILIDAD: TRANSPORTE CONCRETO HACIA LA API DE SPOTIFY
 *
 * Thin wrapper: one reqwest client, two trait implementations
 * (`SearchEndpoint`, `TokenProvider`). Neither implementation carries
 * rate-limit or caching logic — that lives in the coordination core.
 */

use crate::endpoint::{SearchEndpoint, SearchPage};
use crate::errors::SpotifyClientError;
use async_trait::async_trait;
use catalog_core_tokens::{TokenError, TokenProvider};
use catalog_domain_models::{Artist, CachedToken};
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{instrument, warn};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRY_AFTER_SECS: u64 = 30;

pub struct SpotifyHttpClient {
    http: Client,
    base_url: String,
    auth_url: String,
    client_id: String,
    client_secret: String,
}

impl SpotifyHttpClient {
    pub fn new(base_url: String, auth_url: String, client_id: String, client_secret: String) -> Self {
        Self {
            http: Client::builder()
                .user_agent("catalog-crawler/1.0")
                .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
                .build()
                .expect("FATAL: http client initialization failed"),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_url,
            client_id,
            client_secret,
        }
    }
}

#[derive(Deserialize)]
struct SearchResponseEnvelope {
    artists: SearchResponseArtists,
}

#[derive(Deserialize)]
struct SearchResponseArtists {
    items: Vec<SearchResponseArtist>,
}

#[derive(Deserialize)]
struct SearchResponseArtist {
    id: String,
    name: String,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    popularity: u8,
}

#[async_trait]
impl SearchEndpoint for SpotifyHttpClient {
    #[instrument(skip(self, bearer_token))]
    async fn search(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
        bearer_token: &str,
    ) -> Result<SearchPage, SpotifyClientError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(bearer_token)
            .query(&[
                ("q", query.to_string()),
                ("type", "artist".to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);

            return Err(SpotifyClientError::UpstreamRejected {
                status: 429,
                retry_after: Some(retry_after),
            });
        }

        if !response.status().is_success() {
            return Err(SpotifyClientError::UpstreamRejected {
                status: response.status().as_u16(),
                retry_after: None,
            });
        }

        let envelope: SearchResponseEnvelope = response.json().await?;

        let artists = envelope
            .artists
            .items
            .into_iter()
            .map(|raw| Artist {
                id: raw.id,
                name: raw.name,
                genres: raw.genres,
                popularity: raw.popularity,
                first_seen_at: Utc::now(),
            })
            .collect();

        Ok(SearchPage { artists })
    }
}

#[derive(Deserialize)]
struct TokenEndpointResponse {
    access_token: String,
    token_type: String,
    expires_in: u64,
}

#[async_trait]
impl TokenProvider for SpotifyHttpClient {
    #[instrument(skip(self))]
    async fn fetch_token(&self) -> Result<CachedToken, TokenError> {
        let response = self
            .http
            .post(&self.auth_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", &self.client_id),
                ("client_secret", &self.client_secret),
            ])
            .send()
            .await
            .map_err(|e| TokenError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("auth endpoint rejected token request: {}", status);
            return Err(TokenError::Provider(format!("auth endpoint returned {status}")));
        }

        let parsed: TokenEndpointResponse = response
            .json()
            .await
            .map_err(|e| TokenError::Provider(e.to_string()))?;

        let expires_at = Utc::now().timestamp() as f64 + parsed.expires_in as f64;

        Ok(CachedToken {
            access_token: parsed.access_token,
            token_type: parsed.token_type,
            expires_in: parsed.expires_in,
            expires_at,
        })
    }
}
