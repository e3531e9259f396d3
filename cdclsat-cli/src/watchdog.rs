//! Terminates the process when solving takes too long.
use std::process;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::error;

/// A detached thread that ends the process unless solving finished in time.
pub struct Watchdog {
    finished: Arc<AtomicBool>,
    #[cfg_attr(not(test), allow(dead_code))]
    thread: JoinHandle<()>,
}

impl Watchdog {
    /// Exit with code 1 when [`finish`](Watchdog::finish) was not called within the timeout.
    pub fn start(timeout: Duration) -> Watchdog {
        Watchdog::start_with(timeout, move || {
            error!("timeout after {} seconds", timeout.as_secs_f64());
            process::exit(1);
        })
    }

    /// Run `on_timeout` when `finish` was not called within the timeout.
    fn start_with(timeout: Duration, on_timeout: impl FnOnce() + Send + 'static) -> Watchdog {
        let finished = Arc::new(AtomicBool::new(false));
        let thread_finished = finished.clone();

        let thread = thread::spawn(move || {
            thread::sleep(timeout);
            if !thread_finished.load(Ordering::SeqCst) {
                on_timeout();
            }
        });

        Watchdog { finished, thread }
    }

    /// Mark solving as finished, the watchdog will not fire anymore.
    pub fn finish(&self) {
        self.finished.store(true, Ordering::SeqCst);
    }

    #[cfg(test)]
    fn join(self) {
        self.thread.join().unwrap();
    }
}
