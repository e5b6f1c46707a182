//! Single-result background operations.
//!
//! [`spawn_result`] runs a unit of work on its own tokio task and hands back a
//! [`ResultChannel`], a future that resolves to exactly one `Result<T, E>`.
//!
//! ```text
//! caller ──spawn_result(stage, work)──► tokio task
//!    │                                     │ work.catch_unwind()
//!    │                                     │   Ok(r)     → send r
//!    │                                     │   panicked  → send Err(E::from(Fault))
//!    ◄──────────── oneshot (one value, then closed) ┘
//! ```
//!
//! Channels nest: a usecase spawns its work, and inside that work awaits the
//! channels returned by the repository. A panic at any level is contained in
//! the task where it happened and surfaces as an ordinary error one level up.
//!
//! `E` only has to implement `From<Fault>`, so each layer keeps its own typed
//! error.

use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tracing::{debug, error};

/// A unit of work that did not produce a result of its own.
///
/// `stage` identifies where it happened (e.g. `"article_repository_save"`);
/// `message` is what gets reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Fault {
    pub stage: &'static str,
    pub message: String,
}

impl Fault {
    pub fn new(stage: &'static str, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }

    fn panicked(stage: &'static str, payload: &Box<dyn Any + Send>) -> Self {
        Self::new(stage, format!("panic: {}", panic_payload_to_string(payload)))
    }

    fn closed(stage: &'static str) -> Self {
        Self::new(stage, "result channel closed")
    }
}

fn panic_payload_to_string(payload: &Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Receiving end of a spawned operation.
///
/// Resolves once, to the value sent by the task. If the task went away
/// without sending (aborted, runtime shutting down) it resolves to
/// `Err(E::from(Fault))` with the message `"result channel closed"`.
#[must_use = "a ResultChannel does nothing unless awaited"]
pub struct ResultChannel<T, E> {
    rx: oneshot::Receiver<Result<T, E>>,
    stage: &'static str,
}

impl<T, E> ResultChannel<T, E> {
    pub fn stage(&self) -> &'static str {
        self.stage
    }
}

impl<T, E: From<Fault>> Future for ResultChannel<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(E::from(Fault::closed(this.stage)))),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Run `work` on a new tokio task and return the channel its result arrives on.
///
/// The task sends exactly one message and then drops its sender, on success,
/// on error and after a recovered panic alike. Must be called from within a
/// tokio runtime.
pub fn spawn_result<T, E, F>(stage: &'static str, work: F) -> ResultChannel<T, E>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: From<Fault> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let outcome = match AssertUnwindSafe(work).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => {
                let fault = Fault::panicked(stage, &payload);
                error!(context = stage, scope = "recover", error = %fault, "operation panicked");
                Err(E::from(fault))
            }
        };

        if tx.send(outcome).is_err() {
            debug!(context = stage, "result discarded, receiver dropped");
        }
    });

    ResultChannel { rx, stage }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Debug, PartialEq, thiserror::Error)]
    enum TestError {
        #[error("failed: {0}")]
        Failed(String),
        #[error(transparent)]
        Fault(#[from] Fault),
    }

    fn explode(msg: &'static str) -> Result<u8, TestError> {
        std::panic::panic_any(msg)
    }

    fn vanish(id: u8) -> Result<u8, TestError> {
        panic!("row {id} vanished")
    }

    #[tokio::test]
    async fn test_delivers_success() {
        let channel = spawn_result("test_ok", async { Ok::<_, TestError>(42) });
        assert_eq!(channel.stage(), "test_ok");
        assert_eq!(channel.await, Ok(42));
    }

    #[tokio::test]
    async fn test_delivers_error_unchanged() {
        let channel: ResultChannel<u8, _> =
            spawn_result("test_err", async { Err(TestError::Failed("boom".into())) });
        assert_eq!(channel.await, Err(TestError::Failed("boom".into())));
    }

    #[tokio::test]
    async fn test_panic_becomes_fault() {
        let channel = spawn_result("test_panic", async { explode("index out of range") });

        match channel.await {
            Err(TestError::Fault(fault)) => {
                assert_eq!(fault.stage, "test_panic");
                assert_eq!(fault.message, "panic: index out of range");
            }
            other => panic!("expected fault, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_panic_with_formatted_payload() {
        let channel = spawn_result("test_panic", async { vanish(7) });

        let err = channel.await.unwrap_err();
        assert_eq!(err.to_string(), "panic: row 7 vanished");
    }

    #[tokio::test]
    async fn test_closed_channel_resolves_to_fault() {
        let (tx, rx) = oneshot::channel::<Result<u8, TestError>>();
        drop(tx);
        let channel = ResultChannel { rx, stage: "test_closed" };

        assert_eq!(
            channel.await,
            Err(TestError::Fault(Fault::new("test_closed", "result channel closed")))
        );
    }

    #[tokio::test]
    async fn test_nested_panic_surfaces_one_level_up() {
        let outer: ResultChannel<u8, TestError> = spawn_result("outer", async {
            let inner = spawn_result("inner", async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                explode("inner exploded")
            });
            let value = inner.await?;
            Ok(value + 1)
        });

        match outer.await {
            Err(TestError::Fault(fault)) => assert_eq!(fault.stage, "inner"),
            other => panic!("expected inner fault, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dropped_receiver_does_not_disturb_the_task() {
        let (done_tx, done_rx) = oneshot::channel();
        let channel: ResultChannel<(), TestError> = spawn_result("test_detached", async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            let _ = done_tx.send(());
            Ok(())
        });
        drop(channel);

        tokio::time::timeout(Duration::from_secs(1), done_rx)
            .await
            .expect("work should still run to completion")
            .expect("work should signal completion");
    }
}
