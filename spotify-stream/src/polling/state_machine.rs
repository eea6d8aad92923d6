//! The polling state machine
//!
//! Owns the last known playback status and the pending finish prediction.
//! Two sources mutate that state: the polling loop (one diff per successful
//! poll) and the finish timer. Both go through the dispatch lock, so the
//! events of one poll cycle are delivered contiguously and a timer firing
//! never interleaves with them.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use spotify_api::PlaybackStatus;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;

use super::detector::detect_changes;
use super::fetcher::StatusFetcher;
use super::finish_timer::FinishTimer;
use super::scheduler::run_polling_loop;
use crate::config::PollerConfig;
use crate::error::{PollerError, PollerResult};
use crate::events::{EventHandler, EventKind, EventRegistry, HandlerId, PlaybackEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Running,
    /// The loop gave up after too many failures
    Failed,
    Stopped,
}

struct MachineState {
    lifecycle: Lifecycle,
    last_known: Option<PlaybackStatus>,
    finish_timer: Option<FinishTimer>,
}

/// State shared between the machine handle, the loop task and timer tasks
pub(crate) struct Shared {
    config: PollerConfig,
    fetcher: Arc<dyn StatusFetcher>,
    registry: EventRegistry,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<PlaybackEvent>>>,
    state: Mutex<MachineState>,
    /// Held while computing and emitting one batch of events
    dispatch: Mutex<()>,
    wake: Notify,
    next_generation: AtomicU64,
}

impl Shared {
    pub(crate) fn config(&self) -> &PollerConfig {
        &self.config
    }

    pub(crate) fn fetcher(&self) -> &dyn StatusFetcher {
        self.fetcher.as_ref()
    }

    pub(crate) fn wake(&self) -> &Notify {
        &self.wake
    }

    pub(crate) fn is_active(&self) -> bool {
        self.state.lock().lifecycle == Lifecycle::Running
    }

    pub(crate) fn mark_failed(&self) {
        let mut state = self.state.lock();
        if state.lifecycle == Lifecycle::Running {
            state.lifecycle = Lifecycle::Failed;
        }
    }

    /// Diff a polled status against the last known one and emit the result
    ///
    /// Returns false, without touching any state, when the machine is no
    /// longer running.
    pub(crate) fn apply(self: &Arc<Self>, status: PlaybackStatus) -> bool {
        let _dispatch = self.dispatch.lock();

        let events = {
            let mut state = self.state.lock();
            if state.lifecycle != Lifecycle::Running {
                return false;
            }

            let transition = detect_changes(state.last_known.as_ref(), &status);

            if transition.finish_in.is_some() || transition.track_changed {
                if let Some(timer) = state.finish_timer.take() {
                    tracing::debug!("Cancelling finish timer {}", timer.generation());
                    timer.cancel();
                }
            }

            if transition.track_changed {
                tracing::debug!(
                    "Track changed to {}",
                    status.track_uri().unwrap_or("<none>")
                );
            }

            if let Some(delay) = transition.finish_in {
                state.finish_timer = Some(self.schedule_finish(delay, status.clone()));
            }

            state.last_known = Some(status);
            transition.events
        };

        for event in &events {
            self.emit(event);
        }
        true
    }

    fn schedule_finish(self: &Arc<Self>, delay: Duration, status: PlaybackStatus) -> FinishTimer {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let shared: Weak<Shared> = Arc::downgrade(self);

        tracing::debug!("Track predicted to finish in {:?} (timer {})", delay, generation);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(shared) = shared.upgrade() {
                shared.finish_track(generation, status);
            }
        });

        FinishTimer::new(generation, handle)
    }

    fn finish_track(&self, generation: u64, status: PlaybackStatus) {
        let _dispatch = self.dispatch.lock();

        {
            let mut state = self.state.lock();
            match &state.finish_timer {
                Some(timer) if timer.generation() == generation => {}
                _ => {
                    tracing::trace!("Ignoring superseded finish timer {}", generation);
                    return;
                }
            }
            state.finish_timer = None;
            state.last_known = None;
        }

        tracing::debug!(
            "Predicted end of track {}",
            status.track_uri().unwrap_or("<none>")
        );
        self.emit(&PlaybackEvent::TrackFinished(status));
    }

    fn emit(&self, event: &PlaybackEvent) {
        tracing::trace!("Emitting {}", event.kind());
        self.registry.emit(event);
        self.subscribers
            .lock()
            .retain(|sender| sender.send(event.clone()).is_ok());
    }
}

/// Polls the remote playback status and turns it into change events
///
/// ```no_run
/// use spotify_api::{SpotifyClient, StaticToken};
/// use spotify_stream::{PollerConfig, PollingStateMachine};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SpotifyClient::new(StaticToken::new("token"))?;
/// let machine = PollingStateMachine::new(client, PollerConfig::default())?;
///
/// machine.on_is_playing_changed(|playing| println!("playing: {}", playing));
/// machine.on_track_finished(|status| println!("finished: {:?}", status.track_uri()));
/// machine.start()?;
/// # Ok(())
/// # }
/// ```
pub struct PollingStateMachine {
    shared: Arc<Shared>,
    task: Mutex<Option<JoinHandle<PollerResult<()>>>>,
}

impl PollingStateMachine {
    /// Create a stopped machine; nothing is fetched until `start()`
    pub fn new<F>(fetcher: F, config: PollerConfig) -> PollerResult<Self>
    where
        F: StatusFetcher + 'static,
    {
        config.validate()?;

        let shared = Shared {
            config,
            fetcher: Arc::new(fetcher),
            registry: EventRegistry::new(),
            subscribers: Mutex::new(Vec::new()),
            state: Mutex::new(MachineState {
                lifecycle: Lifecycle::Idle,
                last_known: None,
                finish_timer: None,
            }),
            dispatch: Mutex::new(()),
            wake: Notify::new(),
            next_generation: AtomicU64::new(0),
        };

        Ok(Self {
            shared: Arc::new(shared),
            task: Mutex::new(None),
        })
    }

    /// Spawn the polling loop on the current tokio runtime
    ///
    /// A machine polls at most once: a second call fails with
    /// `AlreadyStarted`, a call after `stop()` with `Stopped`.
    pub fn start(&self) -> PollerResult<()> {
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| PollerError::NoRuntime)?;

        {
            let mut state = self.shared.state.lock();
            match state.lifecycle {
                Lifecycle::Idle => state.lifecycle = Lifecycle::Running,
                Lifecycle::Running | Lifecycle::Failed => return Err(PollerError::AlreadyStarted),
                Lifecycle::Stopped => return Err(PollerError::Stopped),
            }
        }

        let handle = runtime.spawn(run_polling_loop(Arc::clone(&self.shared)));
        *self.task.lock() = Some(handle);
        Ok(())
    }

    /// Stop polling and cancel the pending finish prediction
    ///
    /// A fetch in flight completes but its result is dropped. Calling this
    /// more than once has no further effect.
    pub fn stop(&self) {
        let timer = {
            let mut state = self.shared.state.lock();
            if state.lifecycle == Lifecycle::Stopped {
                return;
            }
            state.lifecycle = Lifecycle::Stopped;
            state.finish_timer.take()
        };

        if let Some(timer) = timer {
            tracing::debug!("Cancelling pending finish timer {}", timer.generation());
            timer.cancel();
        }

        self.shared.wake.notify_one();
        tracing::info!("Playback polling stopped");
    }

    /// Stop and wait for the loop task, returning how the loop ended
    pub async fn shutdown(&self) -> PollerResult<()> {
        self.stop();

        let handle = self.task.lock().take();
        match handle {
            Some(handle) => handle
                .await
                .map_err(|e| PollerError::TaskJoin(e.to_string()))?,
            None => Ok(()),
        }
    }

    /// Register a handler for one event kind
    pub fn on<F>(&self, kind: EventKind, handler: F) -> HandlerId
    where
        F: Fn(&PlaybackEvent) + Send + Sync + 'static,
    {
        self.shared.registry.on(kind, Arc::new(handler))
    }

    /// Register a handler by event name, e.g. `"track_finished"`
    pub fn on_named<F>(&self, name: &str, handler: F) -> PollerResult<HandlerId>
    where
        F: Fn(&PlaybackEvent) + Send + Sync + 'static,
    {
        let kind: EventKind = name.parse()?;
        Ok(self.on(kind, handler))
    }

    /// Register a handler for every event kind
    pub fn on_any<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&PlaybackEvent) + Send + Sync + 'static,
    {
        let handler: EventHandler = Arc::new(handler);
        self.shared.registry.on_any(handler)
    }

    /// Remove a handler registration
    pub fn off(&self, id: HandlerId) -> bool {
        self.shared.registry.off(id)
    }

    pub fn on_new_playback_state<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&PlaybackStatus) + Send + Sync + 'static,
    {
        self.on(EventKind::NewPlaybackState, move |event| {
            if let PlaybackEvent::NewPlaybackState(status) = event {
                handler(status);
            }
        })
    }

    pub fn on_is_playing_changed<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on(EventKind::IsPlayingChanged, move |event| {
            if let PlaybackEvent::IsPlayingChanged(is_playing) = event {
                handler(*is_playing);
            }
        })
    }

    pub fn on_progress_ms_changed<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(Option<u64>) + Send + Sync + 'static,
    {
        self.on(EventKind::ProgressMsChanged, move |event| {
            if let PlaybackEvent::ProgressMsChanged(progress) = event {
                handler(*progress);
            }
        })
    }

    pub fn on_track_finished<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&PlaybackStatus) + Send + Sync + 'static,
    {
        self.on(EventKind::TrackFinished, move |event| {
            if let PlaybackEvent::TrackFinished(status) = event {
                handler(status);
            }
        })
    }

    /// Receive every event through a channel instead of a callback
    ///
    /// The channel closes when the machine is dropped.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<PlaybackEvent> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.shared.subscribers.lock().push(sender);
        receiver
    }

    /// The most recent observation, `None` before the first poll and after a
    /// predicted track end
    pub fn last_known_state(&self) -> Option<PlaybackStatus> {
        self.shared.state.lock().last_known.clone()
    }

    pub fn has_pending_finish_timer(&self) -> bool {
        self.shared.state.lock().finish_timer.is_some()
    }

    /// Whether the loop is meant to keep polling
    pub fn is_active(&self) -> bool {
        self.shared.is_active()
    }

    /// Whether the loop task is still alive
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    pub fn config(&self) -> &PollerConfig {
        &self.shared.config
    }
}

impl Drop for PollingStateMachine {
    fn drop(&mut self) {
        self.stop();
        self.shared.subscribers.lock().clear();
    }
}

impl fmt::Debug for PollingStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("PollingStateMachine")
            .field("config", &self.shared.config)
            .field("lifecycle", &state.lifecycle)
            .field("has_last_known", &state.last_known.is_some())
            .field("has_pending_finish_timer", &state.finish_timer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use spotify_api::{ApiError, Track};

    struct NeverPlaying;

    #[async_trait]
    impl StatusFetcher for NeverPlaying {
        async fn fetch_status(&self) -> Result<Option<PlaybackStatus>, ApiError> {
            Ok(None)
        }
    }

    fn machine() -> PollingStateMachine {
        PollingStateMachine::new(NeverPlaying, PollerConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = PollerConfig::default().with_poll_interval(Duration::ZERO);
        let error = PollingStateMachine::new(NeverPlaying, config).unwrap_err();
        assert!(matches!(error, PollerError::Configuration(_)));
    }

    #[test]
    fn test_start_outside_runtime() {
        let machine = machine();
        assert!(matches!(machine.start(), Err(PollerError::NoRuntime)));
        assert!(!machine.is_active());
    }

    #[test]
    fn test_on_named_rejects_unknown_event() {
        let machine = machine();
        assert!(machine.on_named("track_finished", |_| {}).is_ok());
        assert!(matches!(
            machine.on_named("volume_changed", |_| {}),
            Err(PollerError::UnknownEvent(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_emits_in_order() {
        let machine = machine();
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        machine.on_any(move |event| sink.lock().push(event.kind()));

        machine.shared.state.lock().lifecycle = Lifecycle::Running;
        let status = PlaybackStatus::new(true)
            .with_progress(1000)
            .with_item(Track::new("spotify:track:a", 5000));

        assert!(machine.shared.apply(status.clone()));
        assert_eq!(
            *log.lock(),
            vec![
                EventKind::NewPlaybackState,
                EventKind::IsPlayingChanged,
                EventKind::ProgressMsChanged,
            ]
        );
        assert_eq!(machine.last_known_state(), Some(status));
        assert!(machine.has_pending_finish_timer());
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_after_stop_is_discarded() {
        let machine = machine();
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);
        machine.on_any(move |_| *sink.lock() += 1);

        machine.stop();
        assert!(!machine.shared.apply(PlaybackStatus::new(true).with_progress(10)));
        assert_eq!(*count.lock(), 0);
        assert_eq!(machine.last_known_state(), None);
        assert!(!machine.has_pending_finish_timer());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_clears_last_known_state() {
        let machine = machine();
        let finished = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&finished);
        machine.on_track_finished(move |status| sink.lock().push(status.clone()));

        machine.shared.state.lock().lifecycle = Lifecycle::Running;
        let status = PlaybackStatus::new(true)
            .with_progress(4900)
            .with_item(Track::new("spotify:track:a", 5000));
        machine.shared.apply(status.clone());

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(*finished.lock(), vec![status]);
        assert_eq!(machine.last_known_state(), None);
        assert!(!machine.has_pending_finish_timer());
    }

    #[tokio::test]
    async fn test_subscriber_dropped_receiver_is_pruned() {
        let machine = machine();
        let receiver = machine.subscribe();
        drop(receiver);

        machine.shared.state.lock().lifecycle = Lifecycle::Running;
        machine.shared.apply(PlaybackStatus::new(false));
        assert!(machine.shared.subscribers.lock().is_empty());
    }
}
