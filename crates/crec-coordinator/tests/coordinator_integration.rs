//! Integration tests for the configuration coordinator.
//!
//! These tests exercise the coordinator through its *public* API — the
//! [`MessageRouter`] and [`ConfigState`] — the same way the WebSocket
//! transport does, with the in-memory store and recording prefetcher
//! standing in for disk and network. They verify:
//!
//! - First-run behavior: defaults served, store healed to a complete record.
//! - Save visibility: a caller that awaits `save-config` observes the new
//!   values on the next `get-config`, from any surface.
//! - Partial-record healing and prefetch firing rules.
//! - The silent ignore of frames addressed to other listeners.
//! - One live WebSocket round-trip, including the no-reply-for-unknown-kind
//!   ordering check.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crec_coordinator::application::{ConfigState, DispatchOutcome, Lifecycle, MessageRouter};
use crec_coordinator::infrastructure::prefetch::RecordingPrefetcher;
use crec_coordinator::infrastructure::storage::MemoryStore;
use crec_core::{
    ConfigResponse, ContentConfig, StoredConfig, SurfaceRequest, DEFAULT_ENDPOINT, DEFAULT_TOKEN,
};

// ── Fixtures ──────────────────────────────────────────────────────────────────

fn make_state(store: MemoryStore) -> (Arc<ConfigState>, Arc<MemoryStore>, Arc<RecordingPrefetcher>) {
    let store = Arc::new(store);
    let prefetcher = Arc::new(RecordingPrefetcher::new());
    let state = Arc::new(ConfigState::new(
        Arc::clone(&store) as Arc<dyn crec_coordinator::application::ConfigStore>,
        Arc::clone(&prefetcher) as Arc<dyn crec_coordinator::application::FeedPrefetcher>,
    ));
    (state, store, prefetcher)
}

fn save_request(endpoint: &str, token: &str) -> SurfaceRequest {
    SurfaceRequest::SaveConfig {
        endpoint: endpoint.to_string(),
        token: token.to_string(),
    }
}

// ── First run ─────────────────────────────────────────────────────────────────

/// Empty store → `get-config` returns the documented defaults.
#[tokio::test]
async fn test_first_run_get_config_returns_defaults() {
    let (state, _store, _prefetcher) = make_state(MemoryStore::new());
    state.load().await.expect("load");
    let router = MessageRouter::new(state);

    let outcome = router.dispatch(SurfaceRequest::GetConfig).await;

    assert_eq!(
        outcome,
        DispatchOutcome::Replied(ConfigResponse {
            endpoint: "http://localhost:8080/crec/content".to_string(),
            token: "Mozilla".to_string(),
        })
    );
}

/// After the first load cycle on an empty store, the store contains both
/// fields populated with the defaults.
#[tokio::test]
async fn test_first_run_heals_store_to_complete_record() {
    let (state, store, _prefetcher) = make_state(MemoryStore::new());

    state.load().await.expect("load");

    let record = store.snapshot();
    assert!(record.is_complete());
    assert_eq!(record.endpoint.as_deref(), Some(DEFAULT_ENDPOINT));
    assert_eq!(record.token.as_deref(), Some(DEFAULT_TOKEN));
}

/// The full first-run scenario: defaults served and exactly one prefetch
/// against the default feed URL.
#[tokio::test]
async fn test_first_run_scenario_defaults_and_prefetch() {
    let (state, _store, prefetcher) = make_state(MemoryStore::new());
    state.load().await.expect("load");
    let router = MessageRouter::new(state);

    let outcome = router.dispatch(SurfaceRequest::GetConfig).await;

    assert_eq!(
        outcome,
        DispatchOutcome::Replied(ConfigResponse::from(ContentConfig::default()))
    );
    assert_eq!(
        prefetcher.urls(),
        vec!["http://localhost:8080/crec/content?t=Mozilla".to_string()]
    );
}

// ── Save visibility ───────────────────────────────────────────────────────────

/// Awaiting the `save-config` reply guarantees the following `get-config`
/// observes exactly the saved values.
#[tokio::test]
async fn test_save_then_get_returns_saved_values() {
    let (state, store, _prefetcher) = make_state(MemoryStore::new());
    state.load().await.expect("load");
    let router = MessageRouter::new(state);

    let saved = router.dispatch(save_request("https://x.test/feed", "abc")).await;
    assert_eq!(
        saved,
        DispatchOutcome::Replied(ConfigResponse {
            endpoint: "https://x.test/feed".to_string(),
            token: "abc".to_string(),
        })
    );

    // By the time the save reply is delivered, the record is durable.
    assert_eq!(store.snapshot().endpoint.as_deref(), Some("https://x.test/feed"));

    let fetched = router.dispatch(SurfaceRequest::GetConfig).await;
    assert_eq!(fetched, saved);
}

/// Sequential saves: the last completed write-then-reload determines the
/// final state.
#[tokio::test]
async fn test_second_save_wins() {
    let (state, _store, _prefetcher) = make_state(MemoryStore::new());
    let router = MessageRouter::new(Arc::clone(&state));

    router.dispatch(save_request("https://a.test/feed", "one")).await;
    router.dispatch(save_request("https://b.test/feed", "two")).await;

    assert_eq!(state.current().endpoint, "https://b.test/feed");
    assert_eq!(state.current().token, "two");
}

/// A failed store write leaves the served snapshot stale relative to the
/// caller's intent, with the reply shape unchanged.
#[tokio::test]
async fn test_failed_save_serves_stale_snapshot() {
    let (state, store, prefetcher) = make_state(MemoryStore::new());
    state.load().await.expect("load");
    store.set_fail_writes(true);
    let router = MessageRouter::new(Arc::clone(&state));
    let warms_before = prefetcher.count();

    let outcome = router.dispatch(save_request("https://x.test/feed", "abc")).await;

    assert_eq!(
        outcome,
        DispatchOutcome::Replied(ConfigResponse::from(ContentConfig::default()))
    );
    // No reload ran, so no additional prefetch fired.
    assert_eq!(prefetcher.count(), warms_before);
    assert_eq!(state.lifecycle(), Lifecycle::Ready);
}

// ── Partial-field healing ─────────────────────────────────────────────────────

/// A store seeded with only `endpoint` yields the default token in memory,
/// and the store is updated to contain both fields.
#[tokio::test]
async fn test_partial_record_healed_on_load() {
    let seeded = MemoryStore::with_record(StoredConfig {
        endpoint: Some("https://x.test/feed".to_string()),
        token: None,
    });
    let (state, store, _prefetcher) = make_state(seeded);

    state.load().await.expect("load");

    assert_eq!(state.current().endpoint, "https://x.test/feed");
    assert_eq!(state.current().token, DEFAULT_TOKEN);

    let record = store.snapshot();
    assert_eq!(record.endpoint.as_deref(), Some("https://x.test/feed"));
    assert_eq!(record.token.as_deref(), Some(DEFAULT_TOKEN));
}

/// A complete stored record is loaded verbatim and not rewritten.
#[tokio::test]
async fn test_complete_record_is_not_rewritten() {
    let seeded = MemoryStore::with_record(StoredConfig {
        endpoint: Some("https://x.test/feed".to_string()),
        token: Some("abc".to_string()),
    });
    let (state, store, _prefetcher) = make_state(seeded);

    state.load().await.expect("load");

    assert_eq!(store.write_count(), 0);
    assert_eq!(state.current().token, "abc");
}

// ── Idempotence ───────────────────────────────────────────────────────────────

/// Two `get-config` calls without an intervening save return identical
/// results.
#[tokio::test]
async fn test_get_config_is_idempotent() {
    let (state, _store, _prefetcher) = make_state(MemoryStore::new());
    state.load().await.expect("load");
    let router = MessageRouter::new(state);

    let first = router.dispatch(SurfaceRequest::GetConfig).await;
    let second = router.dispatch(SurfaceRequest::GetConfig).await;

    assert_eq!(first, second);
}

// ── Unknown messages ──────────────────────────────────────────────────────────

/// `{"kind":"noop"}` produces no response and alters nothing.
#[tokio::test]
async fn test_unknown_kind_is_silent_noop() {
    let (state, store, prefetcher) = make_state(MemoryStore::new());
    state.load().await.expect("load");
    let router = MessageRouter::new(Arc::clone(&state));
    let writes_before = store.write_count();
    let warms_before = prefetcher.count();

    let outcome = router.dispatch_frame(r#"{"kind":"noop"}"#).await;

    assert_eq!(outcome, DispatchOutcome::NotHandled);
    assert_eq!(store.write_count(), writes_before);
    assert_eq!(prefetcher.count(), warms_before);
    assert_eq!(state.current(), ContentConfig::default());
}

// ── Prefetch firing ───────────────────────────────────────────────────────────

/// A successful load triggers exactly one request to `{endpoint}?t={token}`;
/// a failed load triggers zero.
#[tokio::test]
async fn test_prefetch_fires_once_per_successful_load_only() {
    let seeded = MemoryStore::with_record(StoredConfig {
        endpoint: Some("https://x.test/feed".to_string()),
        token: Some("abc".to_string()),
    });
    let (state, store, prefetcher) = make_state(seeded);

    state.load().await.expect("load");
    assert_eq!(prefetcher.urls(), vec!["https://x.test/feed?t=abc".to_string()]);

    store.set_fail_reads(true);
    let result = state.load().await;

    assert!(result.is_err());
    assert_eq!(prefetcher.count(), 1, "failed load must not prefetch");
    // The snapshot survives the failed reload.
    assert_eq!(state.current().endpoint, "https://x.test/feed");
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

/// `Uninitialized` until the first load attempt; `Ready` afterwards, on the
/// success and the error path alike.
#[tokio::test]
async fn test_lifecycle_reaches_ready_on_both_paths() {
    let (state, store, _prefetcher) = make_state(MemoryStore::new());
    assert_eq!(state.lifecycle(), Lifecycle::Uninitialized);

    state.load().await.expect("load");
    assert_eq!(state.lifecycle(), Lifecycle::Ready);

    store.set_fail_reads(true);
    let _ = state.load().await;
    assert_eq!(state.lifecycle(), Lifecycle::Ready);
}

/// `current()` serves defaults before any load has completed.
#[tokio::test]
async fn test_current_before_first_load_is_defaults() {
    let (state, _store, _prefetcher) = make_state(MemoryStore::new());
    assert_eq!(state.current(), ContentConfig::default());
}

// ── WebSocket round-trip ──────────────────────────────────────────────────────

/// One live session: an unknown-kind frame draws no reply, and the
/// `get-config` that follows is answered with the defaults. Receiving the
/// `get-config` reply as the *first* frame proves the unknown kind was
/// silently ignored rather than answered.
#[tokio::test]
async fn test_websocket_round_trip_ignores_unknown_kind() {
    use futures_util::{SinkExt, StreamExt};
    use tokio_tungstenite::tungstenite::Message;

    let (state, _store, _prefetcher) = make_state(MemoryStore::new());
    state.load().await.expect("load");
    let router = Arc::new(MessageRouter::new(state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let running = Arc::new(AtomicBool::new(true));
    let server = tokio::spawn(crec_coordinator::infrastructure::run_with_listener(
        listener,
        router,
        Arc::clone(&running),
    ));

    let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .expect("connect");

    ws.send(Message::Text(r#"{"kind":"noop"}"#.to_string()))
        .await
        .expect("send noop");
    ws.send(Message::Text(r#"{"kind":"get-config"}"#.to_string()))
        .await
        .expect("send get-config");

    let frame = ws
        .next()
        .await
        .expect("reply frame")
        .expect("clean frame");
    let response: ConfigResponse =
        serde_json::from_str(frame.to_text().expect("text frame")).expect("decode reply");

    assert_eq!(response, ConfigResponse::from(ContentConfig::default()));

    running.store(false, Ordering::Relaxed);
    let _ = server.await;
}
