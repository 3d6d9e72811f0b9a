//! Platform abstraction
//!
//! The controller never talks to the browser directly. It asks a [`Scheduler`]
//! for frame and interval callbacks and reports UI changes to a [`Hud`].

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebScheduler;

use crate::controller::GameEvent;

/// Opaque id of a scheduled frame or interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub i32);

/// Periodic callback source
///
/// What a frame or interval *does* is fixed by the implementation: frames
/// drive `GameController::animate`, intervals drive
/// `GameController::on_spawn_timer`. Returning `None` means scheduling failed.
pub trait Scheduler {
    /// Run one frame callback before the next repaint
    fn request_frame(&mut self) -> Option<TaskHandle>;
    fn cancel_frame(&mut self, handle: TaskHandle);
    /// Run the interval callback every `period_ms`
    fn start_interval(&mut self, period_ms: u32) -> Option<TaskHandle>;
    fn cancel_interval(&mut self, handle: TaskHandle);
}

/// Receives presentation updates
pub trait Hud {
    fn apply(&mut self, event: &GameEvent);
}

/// Hud that only logs (headless runs)
#[derive(Debug, Default)]
pub struct LogHud;

impl Hud for LogHud {
    fn apply(&mut self, event: &GameEvent) {
        log::debug!("hud: {:?}", event);
    }
}

#[derive(Debug, Clone)]
struct ManualInterval {
    handle: TaskHandle,
    period_ms: f64,
    elapsed_ms: f64,
}

/// Callbacks that came due during [`ManualScheduler::advance`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DueTasks {
    /// The pending frame, consumed by this advance
    pub frame: Option<TaskHandle>,
    /// How many interval periods elapsed
    pub interval_fires: u32,
    /// Clock value after advancing (milliseconds)
    pub now_ms: f64,
}

/// Hand-cranked scheduler with a virtual clock
///
/// Nothing runs on its own: the owner calls [`advance`](Self::advance) and then
/// invokes whatever came due.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next_id: i32,
    frame: Option<TaskHandle>,
    intervals: Vec<ManualInterval>,
    now_ms: f64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> TaskHandle {
        self.next_id += 1;
        TaskHandle(self.next_id)
    }

    /// Frame waiting to run, if any
    pub fn pending_frame(&self) -> Option<TaskHandle> {
        self.frame
    }

    /// Number of live intervals
    pub fn active_intervals(&self) -> usize {
        self.intervals.len()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Move the clock forward by `ms`
    pub fn advance(&mut self, ms: f64) -> DueTasks {
        self.now_ms += ms;
        let mut interval_fires = 0;
        for interval in &mut self.intervals {
            interval.elapsed_ms += ms;
            while interval.elapsed_ms >= interval.period_ms {
                interval.elapsed_ms -= interval.period_ms;
                interval_fires += 1;
            }
        }
        DueTasks {
            frame: self.frame.take(),
            interval_fires,
            now_ms: self.now_ms,
        }
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<TaskHandle> {
        let handle = self.allocate();
        self.frame = Some(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: TaskHandle) {
        if self.frame == Some(handle) {
            self.frame = None;
        }
    }

    fn start_interval(&mut self, period_ms: u32) -> Option<TaskHandle> {
        let handle = self.allocate();
        self.intervals.push(ManualInterval {
            handle,
            period_ms: period_ms.max(1) as f64,
            elapsed_ms: 0.0,
        });
        Some(handle)
    }

    fn cancel_interval(&mut self, handle: TaskHandle) {
        self.intervals.retain(|i| i.handle != handle);
    }
}
