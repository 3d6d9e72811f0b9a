//! Browser scheduler backed by `requestAnimationFrame` and `setInterval`

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{Scheduler, TaskHandle};

pub struct WebScheduler {
    window: web_sys::Window,
    on_frame: Rc<dyn Fn(f64)>,
    on_interval: Rc<dyn Fn()>,
    /// Interval closures must outlive their registration
    intervals: Vec<(TaskHandle, Closure<dyn FnMut()>)>,
}

impl WebScheduler {
    /// `on_frame` receives the rAF timestamp in milliseconds
    pub fn new(
        window: web_sys::Window,
        on_frame: impl Fn(f64) + 'static,
        on_interval: impl Fn() + 'static,
    ) -> Self {
        Self {
            window,
            on_frame: Rc::new(on_frame),
            on_interval: Rc::new(on_interval),
            intervals: Vec::new(),
        }
    }
}

impl Scheduler for WebScheduler {
    fn request_frame(&mut self) -> Option<TaskHandle> {
        let on_frame = self.on_frame.clone();
        let closure = Closure::once_into_js(move |time: f64| on_frame(time));
        match self
            .window
            .request_animation_frame(closure.unchecked_ref())
        {
            Ok(id) => Some(TaskHandle(id)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: TaskHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }

    fn start_interval(&mut self, period_ms: u32) -> Option<TaskHandle> {
        let on_interval = self.on_interval.clone();
        let closure = Closure::<dyn FnMut()>::new(move || on_interval());
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms as i32,
            ) {
            Ok(id) => {
                let handle = TaskHandle(id);
                self.intervals.push((handle, closure));
                Some(handle)
            }
            Err(e) => {
                log::error!("setInterval failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_interval(&mut self, handle: TaskHandle) {
        self.window.clear_interval_with_handle(handle.0);
        self.intervals.retain(|(h, _)| *h != handle);
    }
}
