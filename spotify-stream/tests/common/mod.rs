//! Shared helpers for the polling integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use spotify_api::{ApiError, PlaybackStatus, Track, TransportError};
use spotify_stream::{PlaybackEvent, PollingStateMachine, StatusFetcher};
use tokio::time::Instant;

pub type Step = Result<Option<PlaybackStatus>, ApiError>;

/// A status fetcher that replays a fixed script
///
/// Once the script is exhausted every fetch reports no active playback.
pub struct ScriptedFetcher {
    steps: Mutex<VecDeque<Step>>,
    latency: Duration,
    calls: Mutex<Vec<Instant>>,
}

impl ScriptedFetcher {
    pub fn new(steps: Vec<Step>) -> Arc<Self> {
        Self::with_latency(steps, Duration::ZERO)
    }

    pub fn with_latency(steps: Vec<Step>, latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            latency,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Start times of every fetch, relative to the first one
    pub fn call_offsets(&self) -> Vec<Duration> {
        let calls = self.calls.lock();
        match calls.first() {
            Some(first) => calls.iter().map(|call| *call - *first).collect(),
            None => Vec::new(),
        }
    }
}

#[async_trait]
impl StatusFetcher for ScriptedFetcher {
    async fn fetch_status(&self) -> Result<Option<PlaybackStatus>, ApiError> {
        self.calls.lock().push(Instant::now());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let step = self.steps.lock().pop_front();
        step.unwrap_or(Ok(None))
    }
}

/// Every event the machine emitted, with the time it was emitted
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<(Instant, PlaybackEvent)>>>);

impl EventLog {
    pub fn attach(machine: &PollingStateMachine) -> Self {
        let log = Self::default();
        let sink = log.clone();
        machine.on_any(move |event| sink.0.lock().push((Instant::now(), event.clone())));
        log
    }

    pub fn events(&self) -> Vec<PlaybackEvent> {
        self.0.lock().iter().map(|(_, event)| event.clone()).collect()
    }

    pub fn new_states(&self) -> Vec<PlaybackStatus> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PlaybackEvent::NewPlaybackState(status) => Some(status),
                _ => None,
            })
            .collect()
    }

    pub fn finished(&self) -> Vec<(Instant, PlaybackStatus)> {
        self.0
            .lock()
            .iter()
            .filter_map(|(at, event)| match event {
                PlaybackEvent::TrackFinished(status) => Some((*at, status.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }
}

pub fn playing(uri: &str, progress_ms: u64, duration_ms: u64) -> PlaybackStatus {
    PlaybackStatus::new(true)
        .with_progress(progress_ms)
        .with_item(Track::new(uri, duration_ms))
}

pub fn network_error() -> ApiError {
    TransportError::Network("connection reset".to_string()).into()
}

pub fn assert_close(actual: Duration, expected_ms: u64) {
    let actual_ms = actual.as_millis() as i128;
    assert!(
        (actual_ms - expected_ms as i128).abs() <= 5,
        "expected ~{}ms, got {}ms",
        expected_ms,
        actual_ms
    );
}
