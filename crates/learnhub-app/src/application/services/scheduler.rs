use futures::future::join_all;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Handle for a scheduled task
pub type TaskId = u64;

struct ScheduledTask {
    label: String,
    handle: JoinHandle<()>,
}

/// Runs fire-and-forget work after a fixed delay.
///
/// Finished tasks drop out of the table on their own; whatever is still
/// pending can be cancelled one by one or all at once on shutdown.
pub struct TaskScheduler {
    tasks: Arc<Mutex<HashMap<TaskId, ScheduledTask>>>,
    next_id: AtomicU64,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }

    /// Run `task` once `delay` has elapsed
    pub async fn schedule_after<F>(&self, label: &str, delay: Duration, task: F) -> TaskId
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let tasks = self.tasks.clone();
        let task_label = label.to_string();

        // hold the table while spawning so the task cannot finish and
        // deregister before it was registered
        let mut table = self.tasks.lock().await;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!("[scheduler] running task {} ({})", id, task_label);
            task.await;
            tasks.lock().await.remove(&id);
        });
        table.insert(
            id,
            ScheduledTask {
                label: label.to_string(),
                handle,
            },
        );

        debug!(
            "[scheduler] scheduled task {} ({}) in {}ms",
            id,
            label,
            delay.as_millis()
        );
        id
    }

    /// Abort a pending task; `false` when it already ran or never existed
    pub async fn cancel(&self, id: TaskId) -> bool {
        match self.tasks.lock().await.remove(&id) {
            Some(task) => {
                task.handle.abort();
                debug!("[scheduler] cancelled task {} ({})", id, task.label);
                true
            }
            None => false,
        }
    }

    pub async fn pending_count(&self) -> usize {
        self.tasks.lock().await.len()
    }

    /// Wait until no task is pending, including tasks scheduled by tasks.
    /// Returns how many tasks were awaited.
    pub async fn join_all(&self) -> usize {
        let mut joined = 0;
        loop {
            let batch: Vec<(TaskId, ScheduledTask)> = self.tasks.lock().await.drain().collect();
            if batch.is_empty() {
                return joined;
            }
            joined += batch.len();

            let (labels, handles): (Vec<_>, Vec<_>) = batch
                .into_iter()
                .map(|(id, task)| ((id, task.label), task.handle))
                .unzip();

            for ((id, label), result) in labels.into_iter().zip(join_all(handles).await) {
                if let Err(e) = result {
                    if e.is_panic() {
                        error!("[scheduler] task {} ({}) panicked: {}", id, label, e);
                    }
                }
            }
        }
    }

    /// Abort everything still pending
    pub async fn shutdown(&self) {
        let mut tasks = self.tasks.lock().await;
        if tasks.is_empty() {
            return;
        }

        info!("[scheduler] stopping {} pending task(s)", tasks.len());
        for (id, task) in tasks.drain() {
            debug!("[scheduler] aborting task {} ({})", id, task.label);
            task.handle.abort();
        }
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter_task(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_runs_after_delay() {
        let scheduler = TaskScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        scheduler
            .schedule_after("reply", Duration::from_secs(2), counter_task(&counter))
            .await;
        assert_eq!(scheduler.pending_count().await, 1);

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_run() {
        let scheduler = TaskScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let id = scheduler
            .schedule_after("reply", Duration::from_secs(2), counter_task(&counter))
            .await;
        assert!(scheduler.cancel(id).await);
        assert!(!scheduler.cancel(id).await);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_join_all_waits_for_nested_tasks() {
        let scheduler = Arc::new(TaskScheduler::new());
        let counter = Arc::new(AtomicUsize::new(0));

        let inner_scheduler = scheduler.clone();
        let inner_counter = counter.clone();
        scheduler
            .schedule_after("outer", Duration::from_millis(1500), async move {
                inner_scheduler
                    .schedule_after("inner", Duration::from_secs(2), counter_task(&inner_counter))
                    .await;
            })
            .await;
        scheduler
            .schedule_after("sibling", Duration::from_secs(1), counter_task(&counter))
            .await;

        assert_eq!(scheduler.join_all().await, 3);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(scheduler.pending_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_aborts_pending() {
        let scheduler = TaskScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            scheduler
                .schedule_after("reply", Duration::from_secs(2), counter_task(&counter))
                .await;
        }
        scheduler.shutdown().await;
        assert_eq!(scheduler.pending_count().await, 0);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.join_all().await, 0);
    }
}
