//! Background delivery for async mode

use super::logger::Shared;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub(crate) const WORKER_THREAD_NAME: &str = "dispatch-logger-worker";

/// Binary semaphore over a one-slot channel.
///
/// `notify` leaves at most one pending token; `wait` consumes it. Repeated
/// notifications before a wait collapse into one wakeup.
pub(crate) struct Signal {
    tx: Sender<()>,
    rx: Receiver<()>,
}

impl Signal {
    pub(crate) fn new() -> Self {
        let (tx, rx) = bounded(1);
        Self { tx, rx }
    }

    #[inline]
    pub(crate) fn notify(&self) {
        // Full means a wakeup is already pending
        let _ = self.tx.try_send(());
    }

    /// Block until notified or until `timeout` elapses.
    /// Returns `true` if a token was consumed.
    pub(crate) fn wait(&self, timeout: Duration) -> bool {
        self.rx.recv_timeout(timeout).is_ok()
    }
}

/// The single consumer of the event queue while the logger is in async mode
pub(crate) struct Worker {
    shared: Arc<Shared>,
    handle: thread::JoinHandle<()>,
}

impl Worker {
    /// Raise the running flag and start the worker thread.
    ///
    /// On spawn failure the flag is lowered again before returning.
    pub(crate) fn spawn(shared: Arc<Shared>, idle_poll: Duration) -> std::io::Result<Self> {
        shared.running.store(true, Ordering::Release);

        let worker_shared = Arc::clone(&shared);
        let spawned = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || Self::run(&worker_shared, idle_poll));

        match spawned {
            Ok(handle) => Ok(Self { shared, handle }),
            Err(e) => {
                shared.running.store(false, Ordering::Release);
                Err(e)
            }
        }
    }

    fn run(shared: &Shared, idle_poll: Duration) {
        while shared.running.load(Ordering::Acquire) {
            // The timeout bounds the cost of a wakeup lost to a stop race
            shared.signal.wait(idle_poll);

            while let Some(event) = shared.pop_queued() {
                shared.deliver_detached(&event);
            }
        }
    }

    /// Lower the running flag, wake the worker and wait for it to exit.
    ///
    /// Events still queued afterwards are left for the caller to drain.
    /// Returns `false` without joining when called on the worker thread
    /// itself (a handler released the last reference to its logger); that
    /// thread leaves its loop once the current delivery returns.
    pub(crate) fn stop(self) -> bool {
        self.shared.running.store(false, Ordering::Release);
        if self.is_current() {
            return false;
        }
        self.shared.signal.notify();

        if let Err(e) = self.handle.join() {
            eprintln!(
                "[LOGGER ERROR] Async worker thread panicked before shutdown: {:?}",
                e
            );
        }
        true
    }

    fn is_current(&self) -> bool {
        thread::current().id() == self.handle.thread().id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_signal_collapses_notifications() {
        let signal = Signal::new();
        signal.notify();
        signal.notify();
        signal.notify();

        assert!(signal.wait(Duration::from_millis(10)));
        assert!(!signal.wait(Duration::from_millis(10)));
    }

    #[test]
    fn test_signal_wait_times_out() {
        let signal = Signal::new();
        let start = Instant::now();
        assert!(!signal.wait(Duration::from_millis(20)));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_signal_wakes_other_thread() {
        let signal = Arc::new(Signal::new());
        let waiter = {
            let signal = Arc::clone(&signal);
            thread::spawn(move || signal.wait(Duration::from_secs(5)))
        };

        thread::sleep(Duration::from_millis(10));
        signal.notify();
        assert!(waiter.join().unwrap());
    }
}
