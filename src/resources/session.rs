//! Training session state machine.
//!
//! [`TrainingSession`] is the single source of truth for whether play is
//! active. It owns the countdown, the shot and flash counters, and the
//! `revision` token spawners compare against to notice that the world was
//! reset underneath them.
//!
//! ```text
//! Idle ──start──▶ Running ◀──set_paused(false)── Paused
//!                    │  └──────set_paused(true)─────▶│
//!                    └──────────end / timeout──────────┴──▶ Finished
//! ```
//!
//! `reset_session` is legal from every state and always lands in `Idle`.
//! `Finished` only leaves through a reset.
//!
//! The session never touches [`WorldTime`](crate::resources::worldtime::WorldTime)
//! directly; [`crate::systems::session::sync_pause_time_scale`] mirrors the
//! paused flag onto the time scale after each update.

use bevy_ecs::prelude::Resource;
use log::{debug, info};
use serde::Serialize;

use crate::exposure::FlashExposure;
use crate::resources::trainingconfig::SessionSettings;

/// Discrete states of a training session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

impl SessionState {
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "IDLE",
            SessionState::Running => "RUNNING",
            SessionState::Paused => "PAUSED",
            SessionState::Finished => "FINISHED",
        }
    }
}

/// The time-bounded practice run and its aggregate statistics.
#[derive(Resource, Debug, Clone)]
pub struct TrainingSession {
    duration_seconds: f64,
    pause_enabled: bool,
    freeze_time_scale_when_paused: bool,

    time_remaining: f64,
    state: SessionState,

    shots_fired: u64,
    shots_hit: u64,

    flashes_total: u64,
    flashes_front: u64,
    flashes_side: u64,
    flashes_back: u64,
    last_flash_intensity01: f32,
    last_flash_angle_degrees: f32,

    revision: u64,
}

impl TrainingSession {
    /// Create an idle session with a full clock and revision `0`.
    ///
    /// The first [`TrainingSession::reset_session`] bumps the revision to `1`.
    pub fn new(settings: &SessionSettings) -> Self {
        let duration_seconds = settings.duration_seconds.max(1.0);
        TrainingSession {
            duration_seconds,
            pause_enabled: settings.pause_enabled,
            freeze_time_scale_when_paused: settings.freeze_time_scale_when_paused,
            time_remaining: duration_seconds,
            state: SessionState::Idle,
            shots_fired: 0,
            shots_hit: 0,
            flashes_total: 0,
            flashes_front: 0,
            flashes_side: 0,
            flashes_back: 0,
            last_flash_intensity01: 0.0,
            last_flash_angle_degrees: 0.0,
            revision: 0,
        }
    }

    /// Session with the given duration and every other setting at its default.
    pub fn with_duration(duration_seconds: f64) -> Self {
        Self::new(&SessionSettings {
            duration_seconds,
            ..SessionSettings::default()
        })
    }

    pub fn reset_session(&mut self) {
        self.revision += 1;
        self.shots_fired = 0;
        self.shots_hit = 0;
        self.flashes_total = 0;
        self.flashes_front = 0;
        self.flashes_side = 0;
        self.flashes_back = 0;
        self.last_flash_intensity01 = 0.0;
        self.last_flash_angle_degrees = 0.0;
        self.time_remaining = self.duration_seconds;
        self.state = SessionState::Idle;
        info!("Session reset (revision {})", self.revision);
    }

    pub fn start_session(&mut self) {
        if self.state == SessionState::Finished {
            debug!("start_session ignored: session finished");
            return;
        }
        if self.state != SessionState::Running {
            info!("Session {} -> RUNNING", self.state.label());
        }
        self.state = SessionState::Running;
    }

    pub fn end_session(&mut self) {
        if self.state != SessionState::Finished {
            info!(
                "Session finished: {}/{} hits, {}/{} back flashes",
                self.shots_hit, self.shots_fired, self.flashes_back, self.flashes_total
            );
        }
        self.state = SessionState::Finished;
    }

    /// Toggle the paused flag of a started session.
    ///
    /// Ignored when pausing is disabled, when the session is idle or finished,
    /// or when the requested value already holds.
    pub fn set_paused(&mut self, paused: bool) {
        if !self.pause_enabled {
            return;
        }
        match (self.state, paused) {
            (SessionState::Running, true) => {
                self.state = SessionState::Paused;
                info!("Session paused");
            }
            (SessionState::Paused, false) => {
                self.state = SessionState::Running;
                info!("Session resumed");
            }
            _ => {}
        }
    }

    /// Advance the countdown by `dt` seconds.
    ///
    /// Only a `Running` session loses time. Reaching zero clamps the clock and
    /// finishes the session within the same call.
    pub fn update(&mut self, dt: f64) {
        if self.state != SessionState::Running {
            return;
        }
        self.time_remaining -= dt.max(0.0);
        if self.time_remaining <= 0.0 {
            self.time_remaining = 0.0;
            self.end_session();
        }
    }

    pub fn register_shot(&mut self) {
        if !self.is_active() {
            return;
        }
        self.shots_fired += 1;
    }

    /// Count a hit. A hit never outnumbers the shots fired.
    pub fn register_hit(&mut self) {
        if !self.is_active() {
            return;
        }
        if self.shots_hit >= self.shots_fired {
            debug!("register_hit ignored: no unmatched shot");
            return;
        }
        self.shots_hit += 1;
    }

    pub fn register_flash(&mut self, exposure: FlashExposure, intensity01: f32, angle_degrees: f32) {
        if !self.is_active() {
            return;
        }
        self.flashes_total += 1;
        match exposure {
            FlashExposure::Front => self.flashes_front += 1,
            FlashExposure::Side => self.flashes_side += 1,
            FlashExposure::Back => self.flashes_back += 1,
        }
        self.last_flash_intensity01 = clamp_finite(intensity01, 0.0, 1.0);
        self.last_flash_angle_degrees = clamp_finite(angle_degrees, 0.0, 180.0);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// `true` for a started session that has not finished, paused or not.
    pub fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Running | SessionState::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    /// `true` only while the clock is ticking.
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    pub fn shots_fired(&self) -> u64 {
        self.shots_fired
    }

    pub fn shots_hit(&self) -> u64 {
        self.shots_hit
    }

    pub fn flashes_total(&self) -> u64 {
        self.flashes_total
    }

    pub fn flashes_front(&self) -> u64 {
        self.flashes_front
    }

    pub fn flashes_side(&self) -> u64 {
        self.flashes_side
    }

    pub fn flashes_back(&self) -> u64 {
        self.flashes_back
    }

    pub fn last_flash_intensity01(&self) -> f32 {
        self.last_flash_intensity01
    }

    pub fn last_flash_angle_degrees(&self) -> f32 {
        self.last_flash_angle_degrees
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn freezes_time_scale(&self) -> bool {
        self.freeze_time_scale_when_paused
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.shots_hit, self.shots_fired)
    }

    pub fn back_flash_rate(&self) -> f64 {
        ratio(self.flashes_back, self.flashes_total)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            time_remaining: self.time_remaining,
            shots_fired: self.shots_fired,
            shots_hit: self.shots_hit,
            accuracy: self.accuracy(),
            flashes_total: self.flashes_total,
            flashes_front: self.flashes_front,
            flashes_side: self.flashes_side,
            flashes_back: self.flashes_back,
            back_flash_rate: self.back_flash_rate(),
            last_flash_intensity01: self.last_flash_intensity01,
            last_flash_angle_degrees: self.last_flash_angle_degrees,
            revision: self.revision,
        }
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

// `clamp` passes NaN through.
fn clamp_finite(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// Read-only view of a session for HUDs and reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub time_remaining: f64,
    pub shots_fired: u64,
    pub shots_hit: u64,
    pub accuracy: f64,
    pub flashes_total: u64,
    pub flashes_front: u64,
    pub flashes_side: u64,
    pub flashes_back: u64,
    pub back_flash_rate: f64,
    pub last_flash_intensity01: f32,
    pub last_flash_angle_degrees: f32,
    pub revision: u64,
}

impl SessionSnapshot {
    /// Multi-line status block in the layout of the in-game stats panel.
    pub fn hud_text(&self) -> String {
        format!(
            "Time: {:.1}s\nHits: {}\nShots: {}\nAcc: {:.1}%\nBackflash: {} / {} ({:.1}%)\nStatus: {}",
            self.time_remaining,
            self.shots_hit,
            self.shots_fired,
            self.accuracy * 100.0,
            self.flashes_back,
            self.flashes_total,
            self.back_flash_rate * 100.0,
            self.state.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn running(duration: f64) -> TrainingSession {
        let mut session = TrainingSession::with_duration(duration);
        session.reset_session();
        session.start_session();
        session
    }

    #[test]
    fn test_new_session_is_idle_with_full_clock() {
        let session = TrainingSession::with_duration(30.0);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(approx_eq(session.time_remaining(), 30.0));
        assert_eq!(session.revision(), 0);
    }

    #[test]
    fn test_duration_below_one_second_is_raised() {
        let session = TrainingSession::with_duration(0.2);
        assert!(approx_eq(session.duration_seconds(), 1.0));
    }

    #[test]
    fn test_reset_clears_counters_and_bumps_revision() {
        let mut session = running(60.0);
        session.register_shot();
        session.register_hit();
        session.register_flash(FlashExposure::Back, 0.0, 120.0);
        session.update(5.0);
        let before = session.revision();

        session.reset_session();

        assert!(session.revision() > before);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(approx_eq(session.time_remaining(), 60.0));
        assert_eq!(session.shots_fired(), 0);
        assert_eq!(session.shots_hit(), 0);
        assert_eq!(session.flashes_total(), 0);
        assert_eq!(session.flashes_back(), 0);
        assert_eq!(session.last_flash_angle_degrees(), 0.0);
    }

    #[test]
    fn test_reset_from_finished_returns_to_idle() {
        let mut session = running(1.0);
        session.update(2.0);
        assert!(session.is_finished());
        session.reset_session();
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_start_while_finished_is_ignored() {
        let mut session = running(10.0);
        session.end_session();
        session.start_session();
        assert_eq!(session.state(), SessionState::Finished);
    }

    #[test]
    fn test_start_from_paused_resumes() {
        let mut session = running(10.0);
        session.set_paused(true);
        session.start_session();
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn test_end_from_idle_finishes() {
        let mut session = TrainingSession::with_duration(10.0);
        session.end_session();
        assert!(session.is_finished());
    }

    #[test]
    fn test_set_paused_requires_started_session() {
        let mut session = TrainingSession::with_duration(10.0);
        session.set_paused(true);
        assert_eq!(session.state(), SessionState::Idle);

        session.start_session();
        session.set_paused(true);
        assert_eq!(session.state(), SessionState::Paused);
        session.set_paused(true);
        assert_eq!(session.state(), SessionState::Paused);
        session.set_paused(false);
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn test_set_paused_disabled_by_settings() {
        let mut session = TrainingSession::new(&SessionSettings {
            pause_enabled: false,
            ..SessionSettings::default()
        });
        session.start_session();
        session.set_paused(true);
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn test_sixty_one_second_ticks_finish_on_the_last() {
        let mut session = running(60.0);
        for tick in 1..=60 {
            session.update(1.0);
            if tick < 60 {
                assert_eq!(session.state(), SessionState::Running, "tick {tick}");
            }
        }
        assert_eq!(session.state(), SessionState::Finished);
        assert_eq!(session.time_remaining(), 0.0);
    }

    #[test]
    fn test_paused_session_keeps_its_clock() {
        let mut session = running(10.0);
        session.set_paused(true);
        session.update(3.0);
        assert!(approx_eq(session.time_remaining(), 10.0));
    }

    #[test]
    fn test_counters_ignored_unless_running() {
        let mut session = TrainingSession::with_duration(10.0);
        session.register_shot();
        session.register_flash(FlashExposure::Front, 1.0, 0.0);
        assert_eq!(session.shots_fired(), 0);
        assert_eq!(session.flashes_total(), 0);

        session.start_session();
        session.set_paused(true);
        session.register_shot();
        assert_eq!(session.shots_fired(), 0);
    }

    #[test]
    fn test_hits_never_exceed_shots() {
        let mut session = running(10.0);
        session.register_hit();
        assert_eq!(session.shots_hit(), 0);

        session.register_shot();
        session.register_hit();
        session.register_hit();
        assert_eq!(session.shots_hit(), 1);
        assert!(session.shots_hit() <= session.shots_fired());
    }

    #[test]
    fn test_accuracy() {
        let mut session = running(10.0);
        assert_eq!(session.accuracy(), 0.0);
        for _ in 0..4 {
            session.register_shot();
        }
        session.register_hit();
        assert!(approx_eq(session.accuracy(), 0.25));
    }

    #[test]
    fn test_register_flash_counts_and_clamps() {
        let mut session = running(10.0);
        session.register_flash(FlashExposure::Front, 3.0, 12.0);
        session.register_flash(FlashExposure::Side, 0.5, 90.0);
        session.register_flash(FlashExposure::Back, -1.0, 400.0);

        assert_eq!(session.flashes_total(), 3);
        assert_eq!(session.flashes_front(), 1);
        assert_eq!(session.flashes_side(), 1);
        assert_eq!(session.flashes_back(), 1);
        assert_eq!(session.last_flash_intensity01(), 0.0);
        assert_eq!(session.last_flash_angle_degrees(), 180.0);
        assert!(approx_eq(session.back_flash_rate(), 1.0 / 3.0));
    }

    #[test]
    fn test_back_flash_rate_zero_without_flashes() {
        let session = running(10.0);
        assert_eq!(session.back_flash_rate(), 0.0);
    }

    #[test]
    fn test_snapshot_hud_text() {
        let mut session = running(10.0);
        session.register_shot();
        session.register_hit();
        let text = session.snapshot().hud_text();
        assert!(text.contains("Hits: 1"));
        assert!(text.contains("Acc: 100.0%"));
        assert!(text.contains("Status: RUNNING"));
    }
}
