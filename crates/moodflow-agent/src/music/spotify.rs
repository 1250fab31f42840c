//! Spotify Web API catalog (client-credentials flow).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use moodflow_core::config::MusicConfig;

use super::{CatalogTrack, MusicCatalog};
use crate::error::{AgentError, AgentResult};

pub struct SpotifyCatalog {
    http: Client,
    client_id: String,
    client_secret: String,
    token_url: String,
    search_url: String,
    market: String,
    limit: u32,
}

impl SpotifyCatalog {
    /// Fails when the client id or secret is missing.
    pub fn from_config(config: &MusicConfig) -> AgentResult<Self> {
        if !config.has_credentials() {
            return Err(AgentError::config(
                "music.client_id and music.client_secret are required",
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AgentError::config)?;

        Ok(Self {
            http,
            client_id: config.client_id.clone().unwrap_or_default(),
            client_secret: config.client_secret.clone().unwrap_or_default(),
            token_url: config.token_url.clone(),
            search_url: config.search_url.clone(),
            market: config.market.clone(),
            limit: config.search_limit,
        })
    }
}

#[async_trait]
impl MusicCatalog for SpotifyCatalog {
    async fn fetch_token(&self) -> AgentResult<String> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST {
            return Err(AgentError::MusicAuthorization {
                message: format!("token endpoint answered {}", status),
            });
        }

        let payload: Value = response.error_for_status()?.json().await?;
        payload
            .get("access_token")
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .ok_or_else(|| AgentError::parse("token response has no 'access_token'"))
    }

    async fn search(&self, token: &str, query: &str) -> AgentResult<Vec<CatalogTrack>> {
        let limit = self.limit.to_string();
        let response = self
            .http
            .get(&self.search_url)
            .bearer_auth(token)
            .query(&[
                ("q", query),
                ("type", "track"),
                ("limit", limit.as_str()),
                ("market", self.market.as_str()),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AgentError::Unauthorized {
                service: "spotify".to_string(),
            });
        }

        let payload: Value = response.error_for_status()?.json().await?;
        Ok(parse_tracks(&payload))
    }
}

/// Decode `tracks.items`, skipping entries without a name or artist.
pub fn parse_tracks(payload: &Value) -> Vec<CatalogTrack> {
    let items = payload
        .get("tracks")
        .and_then(|t| t.get("items"))
        .and_then(|i| i.as_array());

    items
        .into_iter()
        .flatten()
        .filter_map(|item| {
            let title = item.get("name")?.as_str()?;
            let artist = item
                .get("artists")?
                .get(0)?
                .get("name")?
                .as_str()?;
            let url = item
                .get("external_urls")
                .and_then(|u| u.get("spotify"))
                .and_then(|u| u.as_str())
                .map(str::to_string);
            Some(CatalogTrack {
                title: title.to_string(),
                artist: artist.to_string(),
                url,
            })
        })
        .collect()
}
