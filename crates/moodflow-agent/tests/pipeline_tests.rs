//! Full pipeline runs with in-memory collaborators.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use moodflow_agent::stubs::{FakeCatalog, FixedSentiment, FixedWeather, ScriptedModel};
use moodflow_agent::{
    AgentError, CatalogRecommender, CatalogTrack, ContextCollector, EmotionAnalyzer,
    EventSignalClassifier, MusicCatalog, Orchestrator,
};
use moodflow_core::activity::MicroActivity;
use moodflow_core::event::EventRule;
use moodflow_core::fusion::FusionRule;
use moodflow_core::regulation::Directive;
use moodflow_core::types::{
    AffectDelta, DayType, EmotionLabel, EventType, Polarity, Stage, TimeOfDay, WeatherCategory,
    WeatherReport,
};

fn monday_evening() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(21, 30, 0)
        .unwrap()
}

fn tracks() -> Vec<CatalogTrack> {
    vec![
        CatalogTrack::new("Gül Pembe", "Barış Manço", Some("https://open.spotify.com/track/a")),
        CatalogTrack::new("Says", "Nils Frahm", Some("https://open.spotify.com/track/b")),
        CatalogTrack::new("Weightless", "Marconi Union", Some("https://open.spotify.com/track/c")),
    ]
}

fn orchestrator(catalog: Arc<dyn MusicCatalog>, seed: u64) -> Orchestrator {
    let weather = FixedWeather::new(WeatherReport {
        category: WeatherCategory::Cloudy,
        temperature_c: 3.0,
        is_dark: true,
    });

    Orchestrator::new(
        EmotionAnalyzer::new(
            Some(Arc::new(FixedSentiment::new(Polarity::Negative, 0.81))),
            Some(Arc::new(ScriptedModel::answering(r#"{"label": "sadness"}"#))),
        ),
        EventSignalClassifier::new(Some(Arc::new(ScriptedModel::answering(
            r#"{"event_type": "energy_down", "intensity": 0.3}"#,
        )))),
        ContextCollector::new(Arc::new(weather)).at_fixed_time(monday_evening()),
        Arc::new(CatalogRecommender::with_seed(catalog, seed)),
    )
}

#[tokio::test]
async fn fear_under_pressure_end_to_end() {
    let catalog = Arc::new(FakeCatalog::with_tracks(tracks()));
    let result = orchestrator(catalog.clone(), 42)
        .process(
            "Bugün panik oldum",
            "Ankara",
            Some("Rapor yetersiz ve eksik, acil revize edip yeniden gönder"),
            Some(-1),
        )
        .await
        .unwrap();

    assert_eq!(result.final_emotion, EmotionLabel::Fear);
    assert_eq!(
        result.emotion.fusion.map(|d| d.rule),
        Some(FusionRule::LexiconPrecedence)
    );
    assert_eq!(result.emotion.statistical, Some(EmotionLabel::Sadness));

    assert_eq!(result.event.decision.rule, EventRule::RulePressure);
    assert_eq!(result.event.decision.signal.event_type, EventType::Pressure);
    assert!((result.event.decision.signal.intensity() - 0.8).abs() < 1e-9);
    assert!(result.event.model_opinion.is_none());

    assert_eq!(result.context.time_of_day, TimeOfDay::Night);
    assert_eq!(result.context.day_type, DayType::Weekday);

    assert_eq!(result.affect_state.to_array(), [24, 64, 16, 20, 77]);
    assert_eq!(result.affect_breakdown.reconstruct(), result.affect_state);

    assert_eq!(result.regulation.delta, AffectDelta::new(31, -14, 44, 40, -27));
    assert_eq!(
        result.regulation.directives,
        vec![
            Directive::RaiseValence,
            Directive::LowerArousal,
            Directive::WarmComfort,
            Directive::AmbientCalm,
            Directive::ReduceIntensity,
        ]
    );

    assert_eq!(result.micro_activity, MicroActivity::SlowBreathing);
    assert_eq!(result.micro_activity_text, MicroActivity::SlowBreathing.text());

    assert!(!result.recommendation.is_fallback());
    assert!(result.recommendation.external_link.is_some());
    assert_eq!(catalog.token_fetches(), 1);

    for stage in [
        Stage::Lexicon,
        Stage::Statistical,
        Stage::Generative,
        Stage::Fusion,
        Stage::Event,
        Stage::Micro,
        Stage::Context,
        Stage::Affect,
        Stage::Regulation,
        Stage::Recommendation,
    ] {
        assert!(result.trace.for_stage(stage).count() > 0, "missing {:?}", stage);
    }
}

#[tokio::test]
async fn same_seed_gives_same_recommendation() {
    let mut picks = Vec::new();
    for _ in 0..2 {
        let catalog = Arc::new(FakeCatalog::with_tracks(tracks()));
        let result = orchestrator(catalog, 2024)
            .process("sıradan bir gün geçirdim", "İzmir", None, None)
            .await
            .unwrap();
        picks.push(result.recommendation);
    }
    assert_eq!(picks[0], picks[1]);
}

#[tokio::test]
async fn weak_event_evidence_consults_model() {
    let catalog = Arc::new(FakeCatalog::with_tracks(tracks()));
    let result = orchestrator(catalog, 1)
        .process("sıradan bir gün geçirdim", "Bursa", Some("bugün pek bir şey olmadı"), Some(0))
        .await
        .unwrap();

    assert_eq!(result.event.decision.rule, EventRule::ModelOpinion);
    assert_eq!(result.event.decision.signal.event_type, EventType::EnergyDown);
    assert_eq!(result.event.decision.signal.intensity(), 0.4);
}

#[tokio::test]
async fn guarded_short_text_still_produces_full_result() {
    let catalog = Arc::new(FakeCatalog::with_tracks(tracks()));
    let result = orchestrator(catalog, 1)
        .process("hmm", "Bursa", None, Some(5))
        .await
        .unwrap();

    assert_eq!(result.final_emotion, EmotionLabel::Neutral);
    assert!(result.emotion.was_guarded());
    assert_eq!(result.micro, moodflow_core::types::MicroSignal::Neutral);
    assert!(result.trace.for_stage(Stage::Guard).count() == 1);
}

#[tokio::test]
async fn repeated_catalog_rejection_fails_the_request() {
    let catalog = Arc::new(FakeCatalog::with_tracks(tracks()).rejecting_tokens(2));
    let err = orchestrator(catalog.clone(), 1)
        .process("sıradan bir gün geçirdim", "Bursa", None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::MusicAuthorization { .. }));
    assert_eq!(catalog.token_fetches(), 2);
}

#[tokio::test]
async fn catalog_outage_falls_back_to_placeholder() {
    let catalog = Arc::new(FakeCatalog::with_tracks(tracks()).failing_search());
    let result = orchestrator(catalog, 1)
        .process("sıradan bir gün geçirdim", "Bursa", None, None)
        .await
        .unwrap();

    assert!(result.recommendation.is_fallback());
    assert_eq!(result.recommendation.title, "Rahatlatıcı Seçim");
    assert!(result.recommendation.external_link.is_none());
}

#[tokio::test]
async fn result_serializes_to_json() {
    let catalog = Arc::new(FakeCatalog::with_tracks(tracks()));
    let result = orchestrator(catalog, 9)
        .process("Bugün panik oldum", "Ankara", None, Some(1))
        .await
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["final_emotion"], "fear");
    assert_eq!(json["micro"], "positive");
    assert_eq!(json["affect_breakdown"]["base"]["valence"], 50);
    assert!(json["regulation"]["directives"].is_array());
    assert!(json["trace"].is_array());
}
