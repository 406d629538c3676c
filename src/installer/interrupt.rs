//! Ctrl-C handling while an installer job runs.
//!
//! The installer runs in its own process group, so a terminal Ctrl-C only
//! reaches slsctl. [`InterruptGuard`] catches that SIGINT and exposes it as
//! a flag the caller turns into [`InstallJob::cancel`](super::InstallJob::cancel).

use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Catches SIGINT until dropped, then restores the previous handler.
pub struct InterruptGuard {
    #[cfg(unix)]
    previous: libc::sighandler_t,
}

impl InterruptGuard {
    /// Start catching SIGINT.
    pub fn install() -> Self {
        INTERRUPTED.store(false, Ordering::SeqCst);

        #[cfg(unix)]
        {
            let handler = on_sigint as extern "C" fn(libc::c_int) as libc::sighandler_t;
            // SAFETY: the handler only stores to an atomic, which is async-signal-safe.
            let previous = unsafe { libc::signal(libc::SIGINT, handler) };
            tracing::debug!("SIGINT handler installed");
            Self { previous }
        }

        #[cfg(not(unix))]
        {
            Self {}
        }
    }

    /// Whether SIGINT arrived since [`install`](Self::install).
    pub fn interrupted(&self) -> bool {
        INTERRUPTED.load(Ordering::SeqCst)
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        #[cfg(unix)]
        if self.previous != libc::SIG_ERR {
            // SAFETY: restores the disposition that was active before `install`.
            unsafe {
                libc::signal(libc::SIGINT, self.previous);
            }
        }
    }
}

#[cfg(unix)]
extern "C" fn on_sigint(_signum: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}
