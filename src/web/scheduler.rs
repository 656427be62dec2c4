//! [`Scheduler`] backed by the window's timer functions.

use crate::host::{Scheduler, TimerId};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

/// Intervals keep their closures here until cancelled, so the closure lives
/// exactly as long as the browser may call it. One-shot timeouts hand their
/// closure to JS, which frees it after the single call.
#[derive(Clone)]
pub struct BrowserScheduler {
    window: Window,
    intervals: Rc<RefCell<HashMap<i32, Closure<dyn FnMut()>>>>,
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            intervals: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

fn millis(d: Duration) -> i32 {
    i32::try_from(d.as_millis()).unwrap_or(i32::MAX)
}

impl Scheduler for BrowserScheduler {
    fn every(&self, period: Duration, task: Rc<dyn Fn()>) -> TimerId {
        let closure = Closure::wrap(Box::new(move || task()) as Box<dyn FnMut()>);
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis(period),
            ) {
            Ok(id) => {
                self.intervals.borrow_mut().insert(id, closure);
                TimerId(id)
            }
            Err(e) => {
                error_log!("setInterval failed: {e:?}");
                // Browsers never issue 0, so cancelling it is a no-op.
                TimerId(0)
            }
        }
    }

    fn after(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let callback = Closure::once_into_js(move || task());
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis(delay),
            ) {
            Ok(id) => TimerId(id),
            Err(e) => {
                error_log!("setTimeout failed: {e:?}");
                TimerId(0)
            }
        }
    }

    fn cancel(&self, id: TimerId) {
        let interval = self.intervals.borrow_mut().remove(&id.0);
        if interval.is_some() {
            self.window.clear_interval_with_handle(id.0);
        } else {
            self.window.clear_timeout_with_handle(id.0);
        }
    }

    fn now(&self) -> DateTime<FixedOffset> {
        let date = js_sys::Date::new_0();
        // getTimezoneOffset is UTC minus local, in minutes.
        let east = -(date.get_timezone_offset() as i32) * 60;
        let offset = FixedOffset::east_opt(east).unwrap_or_else(|| Utc.fix());
        DateTime::<Utc>::from_timestamp_millis(date.get_time() as i64)
            .unwrap_or_default()
            .with_timezone(&offset)
    }
}
