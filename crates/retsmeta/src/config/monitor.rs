//! Config change monitoring.
//!
//! [`ConfigChangedMonitor::check`] asks a [`ConfigDao`] for the configuration's
//! last-modified time and notifies listeners when it moves forward:
//!
//! - the first successful check only records a baseline
//! - a strictly later time updates the baseline and notifies every listener
//!   once, in registration order, on the calling thread
//! - an equal or earlier time does nothing
//! - a failing check is logged and leaves the baseline as it was
//! - a panicking listener is logged and does not stop the others
//!
//! The listener registry has its own lock, held only while it is mutated or
//! copied; notification iterates over a snapshot. Listeners run synchronously,
//! so they must hand slow work off elsewhere.
//!
//! [`PollingScheduler`] drives `check` from a background thread.

use chrono::{DateTime, Utc};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info};

use super::dao::ConfigDao;

pub trait ConfigChangeListener: Send + Sync {
    fn config_changed(&self, changed_at: DateTime<Utc>);
}

impl<F> ConfigChangeListener for F
where
    F: Fn(DateTime<Utc>) + Send + Sync,
{
    fn config_changed(&self, changed_at: DateTime<Utc>) {
        self(changed_at)
    }
}

/// Result of one [`ConfigChangedMonitor::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// First successful check; nothing was notified.
    Baseline(DateTime<Utc>),
    /// Listeners were notified.
    Changed(DateTime<Utc>),
    Unchanged,
    Failed,
}

pub struct ConfigChangedMonitor {
    dao: Arc<dyn ConfigDao>,
    /// Last successfully recorded timestamp. Held across notification so
    /// checks never interleave.
    baseline: Mutex<Option<DateTime<Utc>>>,
    listeners: Mutex<Vec<Arc<dyn ConfigChangeListener>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic")
}

fn same_listener(a: &Arc<dyn ConfigChangeListener>, b: &Arc<dyn ConfigChangeListener>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl ConfigChangedMonitor {
    pub fn new(dao: Arc<dyn ConfigDao>) -> Self {
        Self {
            dao,
            baseline: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn check(&self) -> CheckOutcome {
        let mut baseline = lock(&self.baseline);
        let changed_at = match self.dao.config_changed_at() {
            Ok(at) => at,
            Err(e) => {
                error!("caught error while checking config: {}", e);
                return CheckOutcome::Failed;
            }
        };

        match *baseline {
            None => {
                *baseline = Some(changed_at);
                debug!(%changed_at, "recorded config baseline");
                CheckOutcome::Baseline(changed_at)
            }
            Some(previous) if changed_at > previous => {
                *baseline = Some(changed_at);
                info!(%previous, %changed_at, "config changed");
                self.notify(changed_at);
                CheckOutcome::Changed(changed_at)
            }
            Some(_) => CheckOutcome::Unchanged,
        }
    }

    /// A panicking listener is logged and skipped; the rest are still notified.
    fn notify(&self, changed_at: DateTime<Utc>) {
        for (index, listener) in self.listeners().into_iter().enumerate() {
            let call = panic::catch_unwind(AssertUnwindSafe(|| listener.config_changed(changed_at)));
            if let Err(payload) = call {
                error!(listener = index, "config listener panicked: {}", panic_message(&*payload));
            }
        }
    }

    /// Last recorded timestamp, if any check has succeeded.
    pub fn baseline(&self) -> Option<DateTime<Utc>> {
        *lock(&self.baseline)
    }

    /// Register a listener. Registering the same listener twice is a no-op.
    pub fn add_listener(&self, listener: Arc<dyn ConfigChangeListener>) {
        let mut listeners = lock(&self.listeners);
        if !listeners.iter().any(|l| same_listener(l, &listener)) {
            listeners.push(listener);
        }
    }

    /// Unregister by identity. Returns whether the listener was registered.
    pub fn remove_listener(&self, listener: &Arc<dyn ConfigChangeListener>) -> bool {
        let mut listeners = lock(&self.listeners);
        let before = listeners.len();
        listeners.retain(|l| !same_listener(l, listener));
        listeners.len() != before
    }

    /// Replace all listeners, dropping duplicates.
    pub fn set_listeners(&self, new: Vec<Arc<dyn ConfigChangeListener>>) {
        let mut deduped: Vec<Arc<dyn ConfigChangeListener>> = Vec::with_capacity(new.len());
        for listener in new {
            if !deduped.iter().any(|l| same_listener(l, &listener)) {
                deduped.push(listener);
            }
        }
        *lock(&self.listeners) = deduped;
    }

    /// Snapshot of the registered listeners, in registration order.
    pub fn listeners(&self) -> Vec<Arc<dyn ConfigChangeListener>> {
        lock(&self.listeners).clone()
    }
}

/// Runs [`ConfigChangedMonitor::check`] every `interval` on a background
/// thread until stopped or dropped.
pub struct PollingScheduler {
    stop: Arc<(Mutex<bool>, Condvar)>,
    handle: Option<JoinHandle<()>>,
}

impl PollingScheduler {
    /// The first check runs immediately.
    pub fn start(monitor: Arc<ConfigChangedMonitor>, interval: Duration) -> std::io::Result<Self> {
        let stop = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("retsmeta-config-monitor".to_string())
            .spawn(move || {
                let (stopped, wake) = &*signal;
                loop {
                    monitor.check();
                    let guard = lock(stopped);
                    let (guard, _) = wake
                        .wait_timeout_while(guard, interval, |stopped| !*stopped)
                        .unwrap_or_else(PoisonError::into_inner);
                    if *guard {
                        break;
                    }
                }
                debug!("config monitor stopped");
            })?;
        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Signal the thread and wait for the in-flight check to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let (stopped, wake) = &*self.stop;
        *lock(stopped) = true;
        wake.notify_all();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("config monitor thread panicked");
            }
        }
    }
}

impl Drop for PollingScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
