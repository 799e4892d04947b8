//! # Execution Context
//!
//! A [`Context`] carries cancellation from the caller to the store client. The
//! installer never looks at it; it only passes it along with every store call.

use tokio::sync::watch;

/// Cancellation-aware execution context. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Context {
    cancelled: watch::Receiver<bool>,
}

/// Cancels the [`Context`] it was created with.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl Context {
    /// A context that is never cancelled.
    pub fn background() -> Self {
        let (_, cancelled) = watch::channel(false);
        Self { cancelled }
    }

    /// A context that is cancelled when [`CancelHandle::cancel`] is called.
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (sender, cancelled) = watch::channel(false);
        (Self { cancelled }, CancelHandle { sender })
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Resolves once the context is cancelled. Never resolves for a context
    /// that cannot be cancelled any more.
    pub async fn cancelled(&self) {
        let mut cancelled = self.cancelled.clone();
        let closed = cancelled.wait_for(|c| *c).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_background_is_never_cancelled() {
        let ctx = Context::background();
        assert!(!ctx.is_cancelled());
        let waited = tokio::time::timeout(Duration::from_millis(20), ctx.cancelled()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_cancel_wakes_waiters_and_clones() {
        let (ctx, handle) = Context::with_cancel();
        let clone = ctx.clone();
        let waiter = tokio::spawn(async move { clone.cancelled().await });

        assert!(!ctx.is_cancelled());
        handle.cancel();

        waiter.await.unwrap();
        assert!(ctx.is_cancelled());
    }

    #[tokio::test]
    async fn test_dropped_handle_does_not_cancel() {
        let (ctx, handle) = Context::with_cancel();
        drop(handle);
        assert!(!ctx.is_cancelled());
        let waited = tokio::time::timeout(Duration::from_millis(20), ctx.cancelled()).await;
        assert!(waited.is_err());
    }
}
