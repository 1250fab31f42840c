//! Music recommendation.
//!
//! [`ContentRecommender`] is the contract the orchestrator depends on.
//! [`CatalogRecommender`] implements it over any [`MusicCatalog`] (the
//! Spotify adapter in production, fakes in tests); [`OfflineRecommender`]
//! always answers with the placeholder record.

pub mod queries;
pub mod recommender;
pub mod spotify;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use moodflow_core::regulation::RegulationPlan;
use moodflow_core::types::{AffectState, EmotionLabel};

use crate::error::AgentResult;

pub use queries::{candidate_queries, is_local_artist, DEFAULT_QUERY};
pub use recommender::CatalogRecommender;
pub use spotify::SpotifyCatalog;

pub const FALLBACK_TITLE: &str = "Rahatlatıcı Seçim";
pub const FALLBACK_AUTHOR: &str = "Spotify Mix";

/// Whether an artist name reads as Turkish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtistLanguage {
    Local,
    Foreign,
}

/// A single recommended track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub query: String,
    pub title: String,
    pub author: String,
    pub external_link: Option<String>,
    pub language: Option<ArtistLanguage>,
}

impl Recommendation {
    /// Placeholder returned when the catalog has nothing for `query`.
    pub fn fallback(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            title: FALLBACK_TITLE.to_string(),
            author: FALLBACK_AUTHOR.to_string(),
            external_link: None,
            language: None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.external_link.is_none() && self.title == FALLBACK_TITLE && self.author == FALLBACK_AUTHOR
    }

    fn from_track(query: &str, track: CatalogTrack) -> Self {
        let language = if is_local_artist(&track.artist) {
            ArtistLanguage::Local
        } else {
            ArtistLanguage::Foreign
        };
        Self {
            query: query.to_string(),
            title: track.title,
            author: track.artist,
            external_link: track.url,
            language: Some(language),
        }
    }
}

/// A track as returned by a catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTrack {
    pub title: String,
    pub artist: String,
    pub url: Option<String>,
}

impl CatalogTrack {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, url: Option<&str>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            url: url.map(str::to_string),
        }
    }
}

/// Raw catalog access.
#[async_trait]
pub trait MusicCatalog: Send + Sync {
    /// Obtain a fresh access token.
    async fn fetch_token(&self) -> AgentResult<String>;

    /// Search tracks. Returns [`AgentError::Unauthorized`](crate::AgentError::Unauthorized)
    /// when the token was rejected.
    async fn search(&self, token: &str, query: &str) -> AgentResult<Vec<CatalogTrack>>;
}

#[async_trait]
pub trait ContentRecommender: Send + Sync {
    async fn recommend(
        &self,
        emotion: EmotionLabel,
        state: &AffectState,
        plan: &RegulationPlan,
    ) -> AgentResult<Recommendation>;
}

/// Recommender used when no catalog credentials are configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineRecommender;

#[async_trait]
impl ContentRecommender for OfflineRecommender {
    async fn recommend(
        &self,
        emotion: EmotionLabel,
        _state: &AffectState,
        plan: &RegulationPlan,
    ) -> AgentResult<Recommendation> {
        let query = candidate_queries(emotion, plan)
            .first()
            .copied()
            .unwrap_or(DEFAULT_QUERY);
        Ok(Recommendation::fallback(query))
    }
}
