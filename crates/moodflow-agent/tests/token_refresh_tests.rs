//! Shared music-catalog token under concurrent requests.

use std::sync::Arc;
use std::time::Duration;

use moodflow_agent::stubs::FakeCatalog;
use moodflow_agent::{CatalogRecommender, CatalogTrack, ContentRecommender};
use moodflow_core::regulation::RegulationPlanner;
use moodflow_core::types::{AffectState, EmotionLabel};

const TASKS: usize = 8;

fn tracks() -> Vec<CatalogTrack> {
    vec![
        CatalogTrack::new("Says", "Nils Frahm", Some("https://open.spotify.com/track/b")),
        CatalogTrack::new("Sarı Laleler", "Zülfü Livaneli", None),
    ]
}

async fn run_concurrently(catalog: Arc<FakeCatalog>) -> Vec<bool> {
    let recommender = Arc::new(CatalogRecommender::with_seed(catalog, 5));
    let state = AffectState::neutral();
    let plan = RegulationPlanner::new().plan(&state);

    let handles: Vec<_> = (0..TASKS)
        .map(|_| {
            let recommender = recommender.clone();
            let plan = plan.clone();
            tokio::spawn(async move {
                recommender
                    .recommend(EmotionLabel::Neutral, &state, &plan)
                    .await
                    .map(|rec| !rec.is_fallback())
                    .unwrap_or(false)
            })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(TASKS);
    for handle in handles {
        outcomes.push(handle.await.unwrap());
    }
    outcomes
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_requests_share_one_token() {
    let catalog = Arc::new(
        FakeCatalog::with_tracks(tracks()).with_token_delay(Duration::from_millis(50)),
    );

    let outcomes = run_concurrently(catalog.clone()).await;

    assert!(outcomes.iter().all(|ok| *ok));
    assert_eq!(catalog.token_fetches(), 1);
    assert_eq!(catalog.searches(), TASKS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_rejections_refresh_once() {
    let catalog = Arc::new(
        FakeCatalog::with_tracks(tracks())
            .rejecting_tokens(1)
            .with_token_delay(Duration::from_millis(50)),
    );

    let outcomes = run_concurrently(catalog.clone()).await;

    assert!(outcomes.iter().all(|ok| *ok));
    // One initial token plus exactly one refresh, however many tasks saw 401.
    assert_eq!(catalog.token_fetches(), 2);
}
