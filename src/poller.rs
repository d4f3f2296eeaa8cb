//! Periodic task scheduling with manual triggers and cancellation.
//!
//! Each scheduled task runs its action once immediately, then on a fixed
//! interval, independent of every other task. A manual trigger runs the
//! action out of band without touching the periodic timer. The handle owns
//! the spawned tasks; cancelling (or dropping) it stops them all, so no
//! callback can fire into a torn-down consumer.

use anyhow::Result;
use log::{debug, warn};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

type BoxFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;
type Action = Arc<dyn Fn() -> BoxFuture + Send + Sync>;

/// A named periodic task.
pub struct ScheduledTask {
    pub name: &'static str,
    pub interval: Duration,
    action: Action,
}

impl ScheduledTask {
    pub fn new<F, Fut>(name: &'static str, interval: Duration, action: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            name,
            interval,
            action: Arc::new(move || -> BoxFuture { Box::pin(action()) }),
        }
    }
}

/// Scheduler for a fixed set of periodic tasks.
pub struct Scheduler;

impl Scheduler {
    /// Spawn every task and hand back the owning handle.
    pub fn start(tasks: Vec<ScheduledTask>) -> SchedulerHandle {
        let mut handles = Vec::with_capacity(tasks.len());
        let mut triggers = HashMap::new();
        for task in tasks {
            let trigger = Arc::new(Notify::new());
            triggers.insert(task.name, trigger.clone());
            handles.push(tokio::spawn(run_task(task, trigger)));
        }
        SchedulerHandle { handles, triggers }
    }
}

async fn run_task(task: ScheduledTask, trigger: Arc<Notify>) {
    let mut ticker = tokio::time::interval(task.interval);
    // A slow action delays only this task's next natural firing; no
    // catch-up bursts.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = trigger.notified() => debug!("{} task triggered manually", task.name),
        }
        if let Err(e) = (task.action)().await {
            warn!("{} task failed: {e:#}", task.name);
        }
    }
}

/// Owns the spawned tasks. The consumer must cancel it on teardown; Drop
/// also cancels.
pub struct SchedulerHandle {
    handles: Vec<JoinHandle<()>>,
    triggers: HashMap<&'static str, Arc<Notify>>,
}

impl SchedulerHandle {
    /// Run the named task's action now, without resetting its timer.
    /// Unknown names are ignored.
    pub fn trigger(&self, name: &str) {
        match self.triggers.get(name) {
            Some(trigger) => trigger.notify_one(),
            None => debug!("no scheduled task named {name}"),
        }
    }

    /// Stop all owned periodic tasks.
    pub fn cancel(&self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
