use std::time::Duration;

use dioxus::core::Task;
use dioxus::prelude::*;
use vocab_core::model::TimerEpoch;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Owns at most one outstanding timer task for a view.
#[derive(Default)]
pub struct TimerSlot {
    task: Option<Task>,
}

impl TimerSlot {
    /// Replace the running task, cancelling the previous one.
    pub fn arm(&mut self, task: Task) {
        self.cancel();
        self.task = Some(task);
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }

    /// Forget a task that has already fired.
    pub fn release(&mut self) {
        self.task = None;
    }
}

/// Report `epoch` once per `TICK_INTERVAL` until the task is cancelled.
pub fn spawn_ticker(epoch: TimerEpoch, on_tick: Callback<TimerEpoch>) -> Task {
    spawn(async move {
        loop {
            tokio::time::sleep(TICK_INTERVAL).await;
            on_tick.call(epoch);
        }
    })
}

/// Report `epoch` once after `delay`.
pub fn spawn_after(delay: Duration, epoch: TimerEpoch, on_fire: Callback<TimerEpoch>) -> Task {
    spawn(async move {
        tokio::time::sleep(delay).await;
        on_fire.call(epoch);
    })
}
