use gloo::timers::callback::{Interval, Timeout};
use memora_core::{Millis, Scheduler, Task};
use yew::Callback;

/// Keeps the browser timer alive, dropping it clears the timer.
#[derive(Debug)]
pub(crate) enum TimerHandle {
    Once { _timeout: Timeout },
    Every { _interval: Interval },
}

/// Runs engine tasks on browser timers, fired tasks come back as component messages.
#[derive(Debug)]
pub(crate) struct BrowserScheduler {
    callback: Callback<Task>,
}

impl BrowserScheduler {
    pub(crate) fn new(callback: Callback<Task>) -> Self {
        Self { callback }
    }
}

impl Scheduler for BrowserScheduler {
    type Handle = TimerHandle;

    fn schedule_once(&mut self, delay: Millis, task: Task) -> Self::Handle {
        let callback = self.callback.clone();
        TimerHandle::Once {
            _timeout: Timeout::new(delay, move || callback.emit(task)),
        }
    }

    fn schedule_every(&mut self, period: Millis, task: Task) -> Self::Handle {
        let callback = self.callback.clone();
        TimerHandle::Every {
            _interval: Interval::new(period, move || callback.emit(task)),
        }
    }
}
