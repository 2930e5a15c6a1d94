//! The one-second cooldown timer and the task guard that cancels it.

use super::coordinator::ClaimCoordinator;
use super::notice::Notice;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

pub const READY_MESSAGE: &str = "Ready to flush again!";

/// Owns a spawned task and aborts it when dropped.
#[derive(Debug)]
pub struct TaskGuard {
    handle: JoinHandle<()>,
}

impl TaskGuard {
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Ticks the coordinator every `period` until its cooldown ends, then posts
/// [`READY_MESSAGE`]. Dropping the countdown cancels it.
#[derive(Debug)]
pub struct Countdown {
    deadline: DateTime<Utc>,
    task: TaskGuard,
}

impl Countdown {
    pub fn spawn(
        coordinator: Arc<Mutex<ClaimCoordinator>>,
        notices: mpsc::UnboundedSender<Notice>,
        deadline: DateTime<Utc>,
        period: Duration,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let mut coordinator = coordinator.lock().await;
                if coordinator.tick().is_some() {
                    drop(coordinator);
                    let _ = notices.send(Notice::success(READY_MESSAGE));
                    break;
                }
                if coordinator.deadline() != Some(deadline) {
                    debug!("Cooldown replaced or cleared; stopping countdown");
                    break;
                }
            }
        });
        Self {
            deadline,
            task: TaskGuard::new(handle),
        }
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

/// `HH:MM:SS`, hours unbounded.
pub fn format_countdown(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}
