//! Call detail modal and its simulated recording playback.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::domain::call::{CallDetails, CallRecord, format_duration};
use crate::domain::types::RecordId;
use crate::services::calls::call_details;
use crate::services::source::DataSource;

pub const PLAYBACK_TICK: Duration = Duration::from_secs(1);

/// Position of the simulated recording player, in whole seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Playback {
    position: u32,
    duration: u32,
    playing: bool,
}

impl Playback {
    pub fn new(duration: u32) -> Self {
        Self {
            position: 0,
            duration,
            playing: false,
        }
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.duration
    }

    /// Advances one second while playing. Reaching the end stops playback.
    /// Returns whether anything changed.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        self.position = (self.position + 1).min(self.duration);
        if self.is_finished() {
            self.playing = false;
        }
        true
    }

    /// Play/pause. Playing a finished recording starts it over.
    pub fn toggle(&mut self) {
        if !self.playing && self.is_finished() {
            self.position = 0;
        }
        self.playing = !self.playing && !self.is_finished();
    }

    pub fn reset(&mut self) {
        self.position = 0;
        self.playing = false;
    }

    /// Share of the recording played, `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.duration == 0 {
            0.0
        } else {
            f64::from(self.position) / f64::from(self.duration)
        }
    }

    /// `M:SS / M:SS`.
    pub fn label(&self) -> String {
        format!(
            "{} / {}",
            format_duration(self.position),
            format_duration(self.duration)
        )
    }
}

/// Ticks a [`Playback`] once per [`PLAYBACK_TICK`] on a background task.
/// Dropping the timer cancels the task.
pub struct PlaybackTimer {
    state: Arc<watch::Sender<Playback>>,
    task: JoinHandle<()>,
}

impl PlaybackTimer {
    pub fn start(playback: Playback) -> Self {
        let state = Arc::new(watch::Sender::new(playback));
        let ticking = Arc::clone(&state);

        let task = tokio::spawn(async move {
            let mut ticks = interval(PLAYBACK_TICK);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticks.tick().await;
            loop {
                ticks.tick().await;
                ticking.send_if_modified(Playback::tick);
            }
        });

        Self { state, task }
    }

    pub fn snapshot(&self) -> Playback {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Playback> {
        self.state.subscribe()
    }

    pub fn toggle(&self) {
        self.state.send_modify(Playback::toggle);
    }

    pub fn reset(&self) {
        self.state.send_modify(Playback::reset);
    }
}

impl Drop for PlaybackTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DetailState {
    #[default]
    Closed,
    Loading(RecordId),
    Failed {
        id: RecordId,
        message: String,
    },
    Ready(CallDetails),
}

/// The call detail modal. At most one call is open at a time.
#[derive(Default)]
pub struct DetailModal {
    state: DetailState,
    timer: Option<PlaybackTimer>,
}

impl DetailModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DetailState::Closed
    }

    /// Loads `id` into the modal, replacing whatever was open.
    pub async fn open<S>(&mut self, source: &S, id: RecordId) -> &DetailState
    where
        S: DataSource<CallRecord> + ?Sized,
    {
        self.close();
        self.state = DetailState::Loading(id.clone());

        self.state = match call_details(source, &id).await {
            Ok(details) => DetailState::Ready(details),
            Err(err) => DetailState::Failed {
                id,
                message: err.to_string(),
            },
        };
        &self.state
    }

    /// Closes the modal and discards playback.
    pub fn close(&mut self) {
        self.timer = None;
        self.state = DetailState::Closed;
    }

    /// Current playback, or a stopped player at 0:00 if never started.
    pub fn playback(&self) -> Option<Playback> {
        let DetailState::Ready(details) = &self.state else {
            return None;
        };
        Some(match &self.timer {
            Some(timer) => timer.snapshot(),
            None => Playback::new(details.record.duration),
        })
    }

    /// Play/pause, starting the timer on first use.
    pub fn toggle_playback(&mut self) {
        let DetailState::Ready(details) = &self.state else {
            return;
        };
        let duration = details.record.duration;
        self.timer
            .get_or_insert_with(|| PlaybackTimer::start(Playback::new(duration)))
            .toggle();
    }

    pub fn subscribe_playback(&self) -> Option<watch::Receiver<Playback>> {
        self.timer.as_ref().map(PlaybackTimer::subscribe)
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::advance;

    use super::*;
    use crate::repository::{InMemoryRepository, seed};
    use crate::services::source::Direct;

    fn source() -> Direct<InMemoryRepository<CallRecord>> {
        Direct::new(InMemoryRepository::new(seed::calls().unwrap()))
    }

    #[test]
    fn tick_stops_at_duration() {
        let mut playback = Playback::new(2);
        assert!(!playback.tick());

        playback.toggle();
        assert!(playback.tick());
        assert!(playback.tick());
        assert_eq!(playback.position(), 2);
        assert!(!playback.is_playing());
        assert!(!playback.tick());
        assert_eq!(playback.label(), "0:02 / 0:02");
    }

    #[test]
    fn toggle_on_finished_restarts() {
        let mut playback = Playback::new(1);
        playback.toggle();
        playback.tick();
        assert!(playback.is_finished());

        playback.toggle();
        assert_eq!(playback.position(), 0);
        assert!(playback.is_playing());
    }

    #[test]
    fn empty_recording_never_plays() {
        let mut playback = Playback::new(0);
        playback.toggle();
        assert!(!playback.is_playing());
        assert_eq!(playback.progress(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_advances_once_per_second() {
        let timer = PlaybackTimer::start(Playback::new(420));
        timer.toggle();
        let mut updates = timer.subscribe();

        for _ in 0..3 {
            updates.changed().await.unwrap();
        }
        assert_eq!(timer.snapshot().position(), 3);

        timer.toggle();
        advance(Duration::from_secs(10)).await;
        assert_eq!(timer.snapshot().position(), 3);
    }

    #[tokio::test]
    async fn open_loads_details_and_close_resets() {
        let mut modal = DetailModal::new();
        let id = RecordId::new("call-001").unwrap();

        let state = modal.open(&source(), id.clone()).await;
        let DetailState::Ready(details) = state else {
            panic!("expected ready state, got {state:?}");
        };
        assert_eq!(details.record.id, id);
        assert_eq!(modal.playback().unwrap().label(), "0:00 / 7:00");

        modal.toggle_playback();
        assert!(modal.playback().unwrap().is_playing());

        modal.close();
        assert!(!modal.is_open());
        assert!(modal.playback().is_none());
        assert!(modal.subscribe_playback().is_none());
    }

    #[tokio::test]
    async fn unknown_call_fails_to_load() {
        let mut modal = DetailModal::new();
        let id = RecordId::new("call-999").unwrap();

        let state = modal.open(&source(), id.clone()).await;
        assert_eq!(
            state,
            &DetailState::Failed {
                id,
                message: "Failed to load call details. Please try again.".into(),
            }
        );
    }

    #[tokio::test]
    async fn reopening_starts_playback_over() {
        let mut modal = DetailModal::new();
        modal
            .open(&source(), RecordId::new("call-001").unwrap())
            .await;
        modal.toggle_playback();

        modal
            .open(&source(), RecordId::new("call-002").unwrap())
            .await;
        let playback = modal.playback().unwrap();
        assert_eq!(playback.position(), 0);
        assert!(!playback.is_playing());
    }
}
