use std::{
    sync::{
        atomic::{
            AtomicBool,
            Ordering,
        },
        Arc,
    },
    thread,
    time::Duration,
};

use tokio::{
    runtime::Handle,
    task::JoinHandle,
};
use tracing::debug;

enum Pending {
    Task(JoinHandle<()>),
    /// Timer thread for callers outside a tokio runtime.
    Thread { cancelled: Arc<AtomicBool>, handle: thread::JoinHandle<()> },
}

impl Pending {
    fn cancel(self) {
        match self {
            Pending::Task(handle) => handle.abort(),
            Pending::Thread { cancelled, .. } => cancelled.store(true, Ordering::SeqCst),
        }
    }

    fn is_finished(&self) -> bool {
        match self {
            Pending::Task(handle) => handle.is_finished(),
            Pending::Thread { handle, .. } => handle.is_finished(),
        }
    }
}

/// Single pending-timer slot: scheduling again cancels whatever was waiting.
pub struct Debouncer {
    delay: Duration,
    pending: Option<Pending>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs `action` once `delay` has passed without another call. Inside a tokio runtime
    /// the timer is a task, otherwise a short-lived thread.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();

        let delay = self.delay;
        let pending = match Handle::try_current() {
            Ok(handle) => Pending::Task(handle.spawn(async move {
                tokio::time::sleep(delay).await;
                action();
            })),
            Err(_) => {
                debug!(delay_ms = delay.as_millis() as u64, "no tokio runtime, timer on a thread");
                let cancelled = Arc::new(AtomicBool::new(false));
                let flag = cancelled.clone();
                let handle = thread::spawn(move || {
                    thread::sleep(delay);
                    if !flag.load(Ordering::SeqCst) {
                        action();
                    }
                });
                Pending::Thread { cancelled, handle }
            }
        };
        self.pending = Some(pending);
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().map(|pending| !pending.is_finished()).unwrap_or(false)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
