//! Catalog-backed recommender with a shared, refreshable access token.
//!
//! Token policy:
//! - the token is fetched lazily and cached for the lifetime of the recommender;
//! - a search rejected with 401 triggers exactly one refresh and one retry;
//! - refreshes are serialized, and a task that loses the race reuses the
//!   token the winner fetched instead of requesting another one;
//! - a second rejection, or a rejected token request, is surfaced as
//!   [`AgentError::MusicAuthorization`]. Every other failure degrades to the
//!   placeholder record.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use moodflow_core::regulation::RegulationPlan;
use moodflow_core::types::{AffectState, EmotionLabel};

use super::{
    candidate_queries, is_local_artist, CatalogTrack, ContentRecommender, MusicCatalog,
    Recommendation, DEFAULT_QUERY,
};
use crate::error::{AgentError, AgentResult};

/// Probability of drawing from local artists when both pools are non-empty.
pub const DEFAULT_LOCAL_PREFERENCE: f64 = 0.5;

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    /// Bumped on every successful fetch.
    generation: u64,
}

pub struct CatalogRecommender {
    catalog: Arc<dyn MusicCatalog>,
    token: RwLock<Option<CachedToken>>,
    refresh_guard: tokio::sync::Mutex<()>,
    rng: Mutex<ChaCha8Rng>,
    local_preference: f64,
}

impl CatalogRecommender {
    /// Recommender seeded from OS entropy.
    pub fn new(catalog: Arc<dyn MusicCatalog>) -> Self {
        Self::with_rng(catalog, ChaCha8Rng::from_entropy())
    }

    /// Deterministic recommender: equal seeds and equal catalog answers give
    /// equal picks.
    pub fn with_seed(catalog: Arc<dyn MusicCatalog>, seed: u64) -> Self {
        Self::with_rng(catalog, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(catalog: Arc<dyn MusicCatalog>, rng: ChaCha8Rng) -> Self {
        Self {
            catalog,
            token: RwLock::new(None),
            refresh_guard: tokio::sync::Mutex::new(()),
            rng: Mutex::new(rng),
            local_preference: DEFAULT_LOCAL_PREFERENCE,
        }
    }

    /// Clamped to `[0, 1]`.
    pub fn with_local_preference(mut self, preference: f64) -> Self {
        self.local_preference = preference.clamp(0.0, 1.0);
        self
    }

    async fn current_token(&self) -> AgentResult<CachedToken> {
        let cached = self.token.read().clone();
        match cached {
            Some(token) => Ok(token),
            None => self.refresh(None).await,
        }
    }

    /// Fetch a new token unless someone already replaced generation `stale`.
    /// `None` means no token has been seen yet.
    async fn refresh(&self, stale: Option<u64>) -> AgentResult<CachedToken> {
        let _guard = self.refresh_guard.lock().await;

        let cached = self.token.read().clone();
        if let Some(token) = &cached {
            if stale.map_or(true, |g| token.generation != g) {
                return Ok(token.clone());
            }
        }

        let value = self.catalog.fetch_token().await.map_err(|e| match e {
            AgentError::Unauthorized { service } => AgentError::MusicAuthorization {
                message: format!("token request rejected by {}", service),
            },
            other => other,
        })?;
        let fresh = CachedToken {
            value,
            generation: cached.map_or(1, |t| t.generation + 1),
        };
        debug!(generation = fresh.generation, "music catalog token refreshed");
        *self.token.write() = Some(fresh.clone());
        Ok(fresh)
    }

    /// Search with the refresh-once policy.
    async fn search(&self, query: &str) -> AgentResult<Vec<CatalogTrack>> {
        let token = self.current_token().await?;
        match self.catalog.search(&token.value, query).await {
            Err(e) if e.is_unauthorized() => {
                debug!(query, "music catalog rejected token, refreshing once");
                let fresh = self.refresh(Some(token.generation)).await?;
                self.catalog
                    .search(&fresh.value, query)
                    .await
                    .map_err(|e| match e {
                        AgentError::Unauthorized { service } => AgentError::MusicAuthorization {
                            message: format!("{} rejected a freshly issued token", service),
                        },
                        other => other,
                    })
            }
            other => other,
        }
    }

    fn choose_query(&self, queries: &[&'static str]) -> &'static str {
        let mut rng = self.rng.lock();
        queries.choose(&mut *rng).copied().unwrap_or(DEFAULT_QUERY)
    }

    /// Draw a local-artist track with probability `local_preference` when
    /// any exist, otherwise prefer foreign ones.
    fn choose_track(&self, tracks: Vec<CatalogTrack>) -> Option<CatalogTrack> {
        let (local, foreign): (Vec<_>, Vec<_>) =
            tracks.into_iter().partition(|t| is_local_artist(&t.artist));

        let mut rng = self.rng.lock();
        let prefer_local = !local.is_empty() && rng.gen::<f64>() < self.local_preference;
        let pool = if prefer_local || foreign.is_empty() {
            local
        } else {
            foreign
        };
        pool.choose(&mut *rng).cloned()
    }
}

#[async_trait]
impl ContentRecommender for CatalogRecommender {
    async fn recommend(
        &self,
        emotion: EmotionLabel,
        _state: &AffectState,
        plan: &RegulationPlan,
    ) -> AgentResult<Recommendation> {
        let queries = candidate_queries(emotion, plan);
        let query = self.choose_query(&queries);

        let tracks = match self.search(query).await {
            Ok(tracks) => tracks,
            Err(e @ AgentError::MusicAuthorization { .. }) => return Err(e),
            Err(e) => {
                warn!(query, error = %e, "music search failed, using fallback");
                return Ok(Recommendation::fallback(query));
            }
        };

        debug!(query, results = tracks.len(), "music search");
        Ok(self
            .choose_track(tracks)
            .map(|track| Recommendation::from_track(query, track))
            .unwrap_or_else(|| Recommendation::fallback(query)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::ArtistLanguage;
    use crate::stubs::FakeCatalog;
    use moodflow_core::regulation::RegulationPlanner;

    fn neutral_plan() -> (AffectState, RegulationPlan) {
        let state = AffectState::neutral();
        let plan = RegulationPlanner::new().plan(&state);
        (state, plan)
    }

    fn mixed_tracks() -> Vec<CatalogTrack> {
        vec![
            CatalogTrack::new("Gül Pembe", "Barış Manço", Some("https://t/1")),
            CatalogTrack::new("Says", "Nils Frahm", Some("https://t/2")),
            CatalogTrack::new("Kuzu Kuzu", "Tarkan", Some("https://t/3")),
        ]
    }

    #[tokio::test]
    async fn test_picks_from_catalog_results() {
        let catalog = Arc::new(FakeCatalog::with_tracks(mixed_tracks()));
        let recommender = CatalogRecommender::with_seed(catalog.clone(), 7);
        let (state, plan) = neutral_plan();

        let rec = recommender
            .recommend(EmotionLabel::Neutral, &state, &plan)
            .await
            .unwrap();

        assert!(!rec.is_fallback());
        assert!(candidate_queries(EmotionLabel::Neutral, &plan).contains(&rec.query.as_str()));
        assert_eq!(catalog.token_fetches(), 1);
    }

    #[tokio::test]
    async fn test_token_is_cached_between_requests() {
        let catalog = Arc::new(FakeCatalog::with_tracks(mixed_tracks()));
        let recommender = CatalogRecommender::with_seed(catalog.clone(), 1);
        let (state, plan) = neutral_plan();

        for _ in 0..3 {
            recommender
                .recommend(EmotionLabel::Sadness, &state, &plan)
                .await
                .unwrap();
        }
        assert_eq!(catalog.token_fetches(), 1);
        assert_eq!(catalog.searches(), 3);
    }

    #[tokio::test]
    async fn test_full_local_preference_picks_local_artist() {
        let catalog = Arc::new(FakeCatalog::with_tracks(mixed_tracks()));
        let recommender = CatalogRecommender::with_seed(catalog, 3).with_local_preference(1.0);
        let (state, plan) = neutral_plan();

        for _ in 0..5 {
            let rec = recommender
                .recommend(EmotionLabel::Happiness, &state, &plan)
                .await
                .unwrap();
            assert_eq!(rec.language, Some(ArtistLanguage::Local));
        }
    }

    #[tokio::test]
    async fn test_zero_local_preference_picks_foreign_artist() {
        let catalog = Arc::new(FakeCatalog::with_tracks(mixed_tracks()));
        let recommender = CatalogRecommender::with_seed(catalog, 3).with_local_preference(0.0);
        let (state, plan) = neutral_plan();

        let rec = recommender
            .recommend(EmotionLabel::Happiness, &state, &plan)
            .await
            .unwrap();
        assert_ne!(rec.author, "Barış Manço");
        assert_eq!(rec.language, Some(ArtistLanguage::Foreign));
    }

    #[tokio::test]
    async fn test_only_local_tracks_still_picked_without_preference() {
        let catalog = Arc::new(FakeCatalog::with_tracks(vec![CatalogTrack::new(
            "Gül Pembe",
            "Barış Manço",
            None,
        )]));
        let recommender = CatalogRecommender::with_seed(catalog, 3).with_local_preference(0.0);
        let (state, plan) = neutral_plan();

        let rec = recommender
            .recommend(EmotionLabel::Neutral, &state, &plan)
            .await
            .unwrap();
        assert_eq!(rec.author, "Barış Manço");
    }

    #[tokio::test]
    async fn test_empty_results_give_placeholder() {
        let catalog = Arc::new(FakeCatalog::with_tracks(Vec::new()));
        let recommender = CatalogRecommender::with_seed(catalog, 3);
        let (state, plan) = neutral_plan();

        let rec = recommender
            .recommend(EmotionLabel::Neutral, &state, &plan)
            .await
            .unwrap();
        assert!(rec.is_fallback());
        assert!(!rec.query.is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_gives_placeholder() {
        let catalog = Arc::new(FakeCatalog::with_tracks(mixed_tracks()).failing_search());
        let recommender = CatalogRecommender::with_seed(catalog, 3);
        let (state, plan) = neutral_plan();

        let rec = recommender
            .recommend(EmotionLabel::Anger, &state, &plan)
            .await
            .unwrap();
        assert!(rec.is_fallback());
    }

    #[tokio::test]
    async fn test_single_rejection_refreshes_once_and_retries() {
        let catalog = Arc::new(FakeCatalog::with_tracks(mixed_tracks()).rejecting_tokens(1));
        let recommender = CatalogRecommender::with_seed(catalog.clone(), 11);
        let (state, plan) = neutral_plan();

        let rec = recommender
            .recommend(EmotionLabel::Neutral, &state, &plan)
            .await
            .unwrap();
        assert!(!rec.is_fallback());
        assert_eq!(catalog.token_fetches(), 2);
        assert_eq!(catalog.searches(), 2);
    }

    #[tokio::test]
    async fn test_second_rejection_is_surfaced() {
        let catalog = Arc::new(FakeCatalog::with_tracks(mixed_tracks()).rejecting_tokens(2));
        let recommender = CatalogRecommender::with_seed(catalog.clone(), 11);
        let (state, plan) = neutral_plan();

        let err = recommender
            .recommend(EmotionLabel::Neutral, &state, &plan)
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::MusicAuthorization { .. }));
        assert_eq!(catalog.token_fetches(), 2);
    }

    #[tokio::test]
    async fn test_rejected_token_request_is_surfaced() {
        let catalog = Arc::new(FakeCatalog::with_tracks(mixed_tracks()).rejecting_token());
        let recommender = CatalogRecommender::with_seed(catalog, 11);
        let (state, plan) = neutral_plan();

        let err = recommender
            .recommend(EmotionLabel::Neutral, &state, &plan)
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::MusicAuthorization { .. }));
    }

    #[tokio::test]
    async fn test_same_seed_same_pick() {
        let (state, plan) = neutral_plan();
        let mut picks = Vec::new();
        for _ in 0..2 {
            let catalog = Arc::new(FakeCatalog::with_tracks(mixed_tracks()));
            let recommender = CatalogRecommender::with_seed(catalog, 42);
            picks.push(
                recommender
                    .recommend(EmotionLabel::Fear, &state, &plan)
                    .await
                    .unwrap(),
            );
        }
        assert_eq!(picks[0], picks[1]);
    }
}
