/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Executors and handles used by the detached calling conventions

use smithy_http::result::SdkError;
use std::fmt;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use uuid::Uuid;

pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Runs detached tasks for [`send_callable`](crate::ServiceClient::send_callable) and
/// [`send_async`](crate::ServiceClient::send_async)
///
/// Tasks must be run to completion once accepted. A task that is dropped instead surfaces to the
/// caller as a dispatch failure.
pub trait Executor: Send + Sync + Debug {
    fn spawn(&self, task: BoxFuture);
}

/// Spawns tasks onto a Tokio runtime
///
/// Without an explicit handle, tasks go to the runtime of the calling context.
#[derive(Clone, Debug, Default)]
pub struct TokioExecutor {
    handle: Option<tokio::runtime::Handle>,
}

impl TokioExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handle(handle: tokio::runtime::Handle) -> Self {
        Self {
            handle: Some(handle),
        }
    }
}

impl Executor for TokioExecutor {
    fn spawn(&self, task: BoxFuture) {
        let handle = match &self.handle {
            Some(handle) => handle.clone(),
            None => match tokio::runtime::Handle::try_current() {
                Ok(handle) => handle,
                Err(err) => {
                    tracing::error!(err = %err, "no tokio runtime available, dropping task");
                    return;
                }
            },
        };
        // completion is reported through the task's own channel
        drop(handle.spawn(task));
    }
}

/// Caller-chosen context handed back to an async handler
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallerContext {
    id: Uuid,
}

impl CallerContext {
    /// A context with a random id
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    pub fn with_id(id: Uuid) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }
}

impl Default for CallerContext {
    fn default() -> Self {
        Self::new()
    }
}

const TASK_DROPPED: &str = "operation task was dropped before completing";

/// Future returned by [`send_callable`](crate::ServiceClient::send_callable)
///
/// Resolves to the outcome of the operation once the spawned task completes.
pub struct OutcomeFuture<T, E> {
    rx: oneshot::Receiver<Result<T, SdkError<E>>>,
}

impl<T, E> OutcomeFuture<T, E> {
    pub(crate) fn channel() -> (oneshot::Sender<Result<T, SdkError<E>>>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, OutcomeFuture { rx })
    }
}

impl<T, E> Debug for OutcomeFuture<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutcomeFuture").finish()
    }
}

impl<T, E> Future for OutcomeFuture<T, E> {
    type Output = Result<T, SdkError<E>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|outcome| match outcome {
            Ok(outcome) => outcome,
            Err(_) => Err(SdkError::DispatchFailure(TASK_DROPPED.into())),
        })
    }
}

#[cfg(test)]
mod test {
    use crate::executor::{BoxFuture, CallerContext, Executor, OutcomeFuture, TokioExecutor};
    use smithy_http::result::SdkError;
    use tracing_test::traced_test;
    use uuid::Uuid;

    #[derive(Debug)]
    struct DropExecutor;

    impl Executor for DropExecutor {
        fn spawn(&self, _task: BoxFuture) {}
    }

    #[tokio::test]
    async fn dropped_task_is_a_dispatch_failure() {
        let (tx, fut) = OutcomeFuture::<(), ()>::channel();
        DropExecutor.spawn(Box::pin(async move {
            let _ = tx.send(Ok(()));
        }));
        match fut.await {
            Err(SdkError::DispatchFailure(err)) => assert_eq!(
                err.to_string(),
                "operation task was dropped before completing"
            ),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn tokio_executor_runs_tasks() {
        let (tx, fut) = OutcomeFuture::<u32, ()>::channel();
        TokioExecutor::new().spawn(Box::pin(async move {
            let _ = tx.send(Ok(5));
        }));
        assert_eq!(fut.await.expect("task completed"), 5);
    }

    #[test]
    fn tokio_executor_with_handle() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (tx, fut) = OutcomeFuture::<u32, ()>::channel();
        TokioExecutor::with_handle(rt.handle().clone()).spawn(Box::pin(async move {
            let _ = tx.send(Ok(7));
        }));
        assert_eq!(rt.block_on(fut).expect("task completed"), 7);
    }

    #[test]
    #[traced_test]
    fn no_runtime_drops_the_task() {
        let (tx, fut) = OutcomeFuture::<u32, ()>::channel();
        TokioExecutor::new().spawn(Box::pin(async move {
            let _ = tx.send(Ok(7));
        }));
        let rt = tokio::runtime::Runtime::new().unwrap();
        assert!(matches!(
            rt.block_on(fut),
            Err(SdkError::DispatchFailure(_))
        ));
        assert!(logs_contain("no tokio runtime available"));
    }

    #[test]
    fn caller_context_ids() {
        let id = Uuid::new_v4();
        assert_eq!(CallerContext::with_id(id).id(), &id);
        assert_ne!(CallerContext::new(), CallerContext::new());
    }
}
