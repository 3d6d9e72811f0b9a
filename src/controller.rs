//! Session lifecycle around the simulation
//!
//! The controller owns the game state, the high-score store and the
//! scheduler. It starts and stops the two periodic tasks (animation frames and
//! the enemy spawn interval) and turns simulation results into [`GameEvent`]s
//! for the HUD.

use glam::Vec2;

use crate::consts::{DEFAULT_FRAME_DT, MAX_FRAME_DT};
use crate::highscores::{HighScores, KeyValueStore};
use crate::platform::{ManualScheduler, Scheduler, TaskHandle};
use crate::renderer::Surface;
use crate::sim::{GameState, tick};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing started yet, start panel showing
    Idle,
    /// Frame loop and spawn timer active
    Running,
    /// Game over, end panel showing
    Ended,
}

/// Presentation updates produced by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Panels hidden, play begins
    SessionStarted { high_score: u64 },
    ScoreChanged { score: u64 },
    /// Game over
    SessionEnded {
        score: u64,
        high_score: u64,
        new_record: bool,
    },
}

pub struct GameController<K, S> {
    state: GameState,
    phase: SessionPhase,
    high_scores: HighScores<K>,
    scheduler: S,
    /// Pending animation frame
    frame: Option<TaskHandle>,
    /// Active spawn interval
    spawn_timer: Option<TaskHandle>,
    last_frame_ms: Option<f64>,
    events: Vec<GameEvent>,
}

impl<K: KeyValueStore, S: Scheduler> GameController<K, S> {
    pub fn new(state: GameState, store: K, scheduler: S) -> Self {
        Self {
            state,
            phase: SessionPhase::Idle,
            high_scores: HighScores::new(store),
            scheduler,
            frame: None,
            spawn_timer: None,
            last_frame_ms: None,
            events: Vec::new(),
        }
    }

    /// Begin a new session
    ///
    /// Always resets, even mid-session.
    pub fn start_game(&mut self) {
        self.stop_tasks();
        self.state.init();
        self.phase = SessionPhase::Running;
        self.last_frame_ms = None;
        self.events.push(GameEvent::ScoreChanged { score: 0 });

        self.frame = self.scheduler.request_frame();
        self.start_spawning();

        let high_score = self.high_scores.best();
        self.events.push(GameEvent::SessionStarted { high_score });
        log::info!("Session started (high score {})", high_score);
    }

    /// Game over: stop both tasks and settle the high score
    ///
    /// Does nothing beyond cancelling tasks unless a session is running.
    pub fn end_game(&mut self) {
        self.stop_tasks();
        if self.phase != SessionPhase::Running {
            return;
        }
        self.phase = SessionPhase::Ended;

        let score = self.state.score;
        let new_record = self.high_scores.submit(score);
        let high_score = self.high_scores.best();
        self.events.push(GameEvent::SessionEnded {
            score,
            high_score,
            new_record,
        });
        log::info!(
            "Session ended with score {} (high score {})",
            score,
            high_score
        );
    }

    /// One animation frame; `time_ms` is the frame timestamp
    pub fn animate(&mut self, surface: &mut dyn Surface, time_ms: f64) {
        if self.phase != SessionPhase::Running {
            return;
        }
        // Reschedule first, like the browser loop does
        self.frame = self.scheduler.request_frame();

        let dt = match self.last_frame_ms {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => DEFAULT_FRAME_DT,
        }
        .clamp(0.0, MAX_FRAME_DT);
        self.last_frame_ms = Some(time_ms);

        let outcome = tick(&mut self.state, surface, dt);
        if outcome.score_changed() {
            self.events.push(GameEvent::ScoreChanged {
                score: self.state.score,
            });
        }
        if outcome.game_over {
            self.end_game();
        }
    }

    /// Spawn interval callback
    pub fn on_spawn_timer(&mut self) {
        if self.phase == SessionPhase::Running {
            self.state.spawn_enemy();
        }
    }

    /// Pointer click at canvas coordinates; fires only while running
    pub fn handle_click(&mut self, x: f32, y: f32) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.state.fire_projectile(Vec2::new(x, y));
        true
    }

    /// Canvas resized; the player re-centers
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(Vec2::new(width, height));
    }

    /// Tab visibility changed
    ///
    /// Hiding only pauses spawning; the frame loop is left alone.
    pub fn on_visibility_change(&mut self, hidden: bool) {
        if hidden {
            if self.stop_spawning() {
                log::info!("Spawning paused (tab hidden)");
            }
        } else if self.frame.is_some() && self.spawn_timer.is_none() {
            self.start_spawning();
            log::info!("Spawning resumed (tab visible)");
        }
    }

    /// Save the current score if it is a new best (page unload)
    pub fn persist_high_score(&mut self) -> bool {
        self.high_scores.submit(self.state.score)
    }

    fn start_spawning(&mut self) {
        let period = self.state.settings.spawn_interval_ms;
        self.spawn_timer = self.scheduler.start_interval(period);
    }

    /// Returns true if a timer was running
    fn stop_spawning(&mut self) -> bool {
        match self.spawn_timer.take() {
            Some(handle) => {
                self.scheduler.cancel_interval(handle);
                true
            }
            None => false,
        }
    }

    fn stop_tasks(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.stop_spawning();
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_scores.best()
    }

    pub fn is_spawning(&self) -> bool {
        self.spawn_timer.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.frame.is_some()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &K {
        self.high_scores.store()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<K: KeyValueStore> GameController<K, ManualScheduler> {
    /// Drive the virtual clock at 60 Hz for `duration_ms`
    pub fn run_for(&mut self, surface: &mut dyn Surface, duration_ms: f64) {
        let frame_ms = 1000.0 / 60.0;
        let frames = (duration_ms / frame_ms).ceil() as u64;
        for _ in 0..frames {
            let due = self.scheduler.advance(frame_ms);
            for _ in 0..due.interval_fires {
                self.on_spawn_timer();
            }
            if due.frame.is_some() {
                self.animate(surface, due.now_ms);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::renderer::{Color, RecordingSurface};
    use crate::settings::Settings;
    use crate::sim::Body;

    type TestController = GameController<MemoryStore, ManualScheduler>;

    fn controller_with_high_score(high: Option<&str>) -> TestController {
        let mut store = MemoryStore::new();
        if let Some(raw) = high {
            store.set("highScore", raw);
        }
        let state = GameState::new(42, Vec2::new(800.0, 600.0), Settings::default());
        GameController::new(state, store, ManualScheduler::new())
    }

    fn controller() -> TestController {
        controller_with_high_score(None)
    }

    #[test]
    fn test_starts_idle() {
        let c = controller();
        assert_eq!(c.phase(), SessionPhase::Idle);
        assert!(!c.is_animating());
        assert!(!c.is_spawning());
    }

    #[test]
    fn test_start_game_arms_tasks() {
        let mut c = controller_with_high_score(Some("70"));
        c.start_game();
        assert_eq!(c.phase(), SessionPhase::Running);
        assert!(c.scheduler().pending_frame().is_some());
        assert_eq!(c.scheduler().active_intervals(), 1);
        assert_eq!(c.score(), 0);
        assert_eq!(
            c.drain_events(),
            vec![
                GameEvent::ScoreChanged { score: 0 },
                GameEvent::SessionStarted { high_score: 70 },
            ]
        );
    }

    #[test]
    fn test_restart_resets_without_duplicate_tasks() {
        let mut c = controller();
        let mut surface = RecordingSurface::new();
        c.start_game();
        c.run_for(&mut surface, 2500.0);
        assert!(!c.state().enemies.is_empty());
        c.state_mut().score = 40;

        c.start_game();
        assert_eq!(c.score(), 0);
        assert!(c.state().enemies.is_empty());
        assert!(c.state().projectiles.is_empty());
        assert!(c.state().particles.is_empty());
        assert_eq!(c.scheduler().active_intervals(), 1);
    }

    #[test]
    fn test_spawn_timer_spawns_on_interval() {
        let mut c = controller();
        let mut surface = RecordingSurface::new();
        c.start_game();
        c.run_for(&mut surface, 1500.0);
        assert_eq!(c.state().enemies.len(), 1);
        c.run_for(&mut surface, 1000.0);
        assert_eq!(c.state().enemies.len(), 2);
    }

    #[test]
    fn test_end_game_records_new_high_score() {
        let mut c = controller_with_high_score(Some("100"));
        c.start_game();
        c.state_mut().score = 150;
        c.drain_events();

        c.end_game();
        assert_eq!(c.phase(), SessionPhase::Ended);
        assert_eq!(c.high_score(), 150);
        assert_eq!(c.store().get("highScore").as_deref(), Some("150"));
        assert_eq!(
            c.drain_events(),
            vec![GameEvent::SessionEnded {
                score: 150,
                high_score: 150,
                new_record: true,
            }]
        );
    }

    #[test]
    fn test_end_game_keeps_higher_score() {
        let mut c = controller_with_high_score(Some("100"));
        c.start_game();
        c.state_mut().score = 50;
        c.end_game();
        assert_eq!(c.high_score(), 100);
        assert_eq!(c.store().get("highScore").as_deref(), Some("100"));
    }

    #[test]
    fn test_end_game_idempotent() {
        let mut c = controller();
        c.start_game();
        c.end_game();
        c.drain_events();

        c.end_game();
        assert_eq!(c.phase(), SessionPhase::Ended);
        assert!(c.drain_events().is_empty());
        assert!(c.scheduler().pending_frame().is_none());
        assert_eq!(c.scheduler().active_intervals(), 0);
    }

    #[test]
    fn test_enemy_contact_ends_session() {
        let mut c = controller_with_high_score(Some("5"));
        let mut surface = RecordingSurface::new();
        c.start_game();
        let center = c.state().center();
        c.state_mut().score = 30;
        c.state_mut().push_enemy(Body::new(
            center + Vec2::new(25.0, 0.0),
            12.0,
            Color::hsl(0.0, 50.0, 50.0),
            Vec2::new(-1.0, 0.0),
        ));

        c.run_for(&mut surface, 100.0);
        assert_eq!(c.phase(), SessionPhase::Ended);
        assert!(!c.is_animating());
        assert!(!c.is_spawning());
        assert_eq!(c.scheduler().pending_frame(), None);
        assert_eq!(c.high_score(), 30);
    }

    #[test]
    fn test_no_frames_after_end() {
        let mut c = controller();
        let mut surface = RecordingSurface::new();
        c.start_game();
        c.end_game();
        surface.clear();
        c.run_for(&mut surface, 500.0);
        assert!(surface.commands.is_empty());
        assert!(c.state().enemies.is_empty());
    }

    #[test]
    fn test_click_only_while_running() {
        let mut c = controller();
        assert!(!c.handle_click(10.0, 10.0));
        c.start_game();
        assert!(c.handle_click(10.0, 10.0));
        assert_eq!(c.state().projectiles.len(), 1);
        c.end_game();
        assert!(!c.handle_click(10.0, 10.0));
    }

    #[test]
    fn test_hit_emits_score_event() {
        let mut c = controller();
        let mut surface = RecordingSurface::new();
        c.start_game();
        let min = c.state().settings.enemy_min_radius;
        let target = Vec2::new(400.0, 100.0);
        c.state_mut()
            .push_enemy(Body::new(target, min, Color::WHITE, Vec2::ZERO));
        c.handle_click(target.x, target.y);
        c.drain_events();

        // Projectile covers the 200px in 40 frames
        c.run_for(&mut surface, 800.0);
        assert_eq!(c.score(), 20);
        assert!(
            c.drain_events()
                .contains(&GameEvent::ScoreChanged { score: 20 })
        );
    }

    #[test]
    fn test_visibility_pauses_spawning_only() {
        let mut c = controller();
        let mut surface = RecordingSurface::new();
        c.start_game();

        c.on_visibility_change(true);
        assert!(!c.is_spawning());
        assert!(c.is_animating());
        c.run_for(&mut surface, 3000.0);
        assert!(c.state().enemies.is_empty());
        assert!(c.is_animating());

        c.on_visibility_change(false);
        assert!(c.is_spawning());
        c.run_for(&mut surface, 1500.0);
        assert_eq!(c.state().enemies.len(), 1);
    }

    #[test]
    fn test_visibility_does_not_revive_ended_session() {
        let mut c = controller();
        c.start_game();
        c.end_game();
        c.on_visibility_change(true);
        c.on_visibility_change(false);
        assert!(!c.is_spawning());
    }

    #[test]
    fn test_persist_on_unload() {
        let mut c = controller_with_high_score(Some("10"));
        c.start_game();
        c.state_mut().score = 60;
        assert!(c.persist_high_score());
        assert_eq!(c.high_score(), 60);
        c.state_mut().score = 20;
        assert!(!c.persist_high_score());
        assert_eq!(c.high_score(), 60);
    }

    #[test]
    fn test_resize_recenters() {
        let mut c = controller();
        c.resize(1024.0, 768.0);
        assert_eq!(c.state().player.pos, Vec2::new(512.0, 384.0));
    }

    #[test]
    fn test_large_frame_gap_is_clamped() {
        let mut c = controller();
        let mut surface = RecordingSurface::new();
        c.start_game();
        let min = c.state().settings.enemy_min_radius;
        c.state_mut().push_enemy(Body::new(
            Vec2::new(100.0, 100.0),
            min + 15.0,
            Color::WHITE,
            Vec2::ZERO,
        ));
        c.state_mut()
            .push_projectile(Body::new(Vec2::new(100.0, 100.0), 5.0, Color::WHITE, Vec2::ZERO));

        c.animate(&mut surface, 0.0);
        // A 10 second stall only advances the shrink by MAX_FRAME_DT
        c.animate(&mut surface, 10_000.0);
        let radius = c.state().enemies[0].body.radius;
        assert!(radius > min + 5.0);
    }
}
