use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::{CancellationToken, DropGuard};
use tokio_util::task::AbortOnDropHandle;

use crate::error::{OcrError, Result};

/// Which source tripped a [`LinkedCancellation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelCause {
    Caller,
    Timeout,
}

/// The caller's token OR-ed with an internal deadline.
///
/// The combined token fires as soon as either source fires. Dropping the scope
/// stops the deadline timer and cancels the combined token, so a worker still
/// holding it bails out at its next checkpoint.
pub struct LinkedCancellation {
    caller: CancellationToken,
    combined: CancellationToken,
    timeout: Duration,
    timed_out: Arc<AtomicBool>,
    _timer: AbortOnDropHandle<()>,
    _guard: DropGuard,
}

impl LinkedCancellation {
    /// Must be called from within a Tokio runtime.
    pub fn new(caller: &CancellationToken, timeout: Duration) -> Self {
        let combined = caller.child_token();
        let timed_out = Arc::new(AtomicBool::new(false));

        let timer = {
            let combined = combined.clone();
            let timed_out = Arc::clone(&timed_out);
            tokio::spawn(async move {
                tokio::select! {
                    _ = tokio::time::sleep(timeout) => {
                        timed_out.store(true, Ordering::SeqCst);
                        combined.cancel();
                    }
                    _ = combined.cancelled() => {}
                }
            })
        };

        Self {
            caller: caller.clone(),
            _guard: combined.clone().drop_guard(),
            combined,
            timeout,
            timed_out,
            _timer: AbortOnDropHandle::new(timer),
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.combined.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.combined.is_cancelled()
    }

    pub async fn cancelled(&self) {
        self.combined.cancelled().await
    }

    /// The caller wins over the deadline when both have fired.
    pub fn cause(&self) -> Option<CancelCause> {
        if self.caller.is_cancelled() {
            Some(CancelCause::Caller)
        } else if self.timed_out.load(Ordering::SeqCst) {
            Some(CancelCause::Timeout)
        } else {
            None
        }
    }

    /// Turn an interruption raised inside the pipeline into the matching error.
    /// Any other error passes through unchanged.
    pub fn classify(&self, err: OcrError) -> OcrError {
        match err {
            OcrError::Cancelled => self.interrupted(),
            other => other,
        }
    }

    /// Error describing why the combined token fired
    pub fn interrupted(&self) -> OcrError {
        match self.cause() {
            Some(CancelCause::Timeout) => OcrError::Timeout {
                secs: self.timeout.as_secs_f64(),
            },
            _ => OcrError::Cancelled,
        }
    }
}

/// Cooperative checkpoint between pipeline stages
pub fn ensure_active(token: &CancellationToken) -> Result<()> {
    if token.is_cancelled() {
        Err(OcrError::Cancelled)
    } else {
        Ok(())
    }
}
