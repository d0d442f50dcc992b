//! Execution context propagation for tool invocations
//!
//! This module provides:
//! - `ExecutionContext`: the (correlation id, tool name) pair of one tool run
//! - `ExecutionScope`: RAII guard that installs a fresh context and restores
//!   the previous one when dropped
//! - `ContextFuture`: future wrapper that carries a context across polls, so
//!   the context follows the logical task rather than the worker thread
//!
//! Synchronous code only needs [`begin_tool`]. Async code that may suspend
//! while a scope is open must run inside a [`ContextFuture`], either through
//! [`tool_scope`] or [`ContextFutureExt::in_current_context`]; the wrapper
//! swaps the task's context in before every poll and back out afterwards.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

thread_local! {
    static CURRENT: RefCell<Option<Arc<ExecutionContext>>> = const { RefCell::new(None) };
}

/// Generate a fresh opaque correlation id (32 lowercase hex characters)
pub fn new_correlation_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Identity of one tool execution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionContext {
    correlation_id: String,
    tool_name: Option<String>,
}

impl ExecutionContext {
    pub fn new(correlation_id: impl Into<String>, tool_name: Option<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            tool_name,
        }
    }

    /// Create a context with a freshly generated correlation id
    pub fn for_tool(tool_name: impl Into<String>) -> Self {
        Self::new(new_correlation_id(), Some(tool_name.into()))
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn tool_name(&self) -> Option<&str> {
        self.tool_name.as_deref()
    }

    /// The context active for the caller's logical call tree, if any
    pub fn current() -> Option<Arc<ExecutionContext>> {
        CURRENT.with(|current| current.borrow().clone())
    }

    /// Install `context` as current and return what was current before.
    pub(crate) fn replace_current(
        context: Option<Arc<ExecutionContext>>,
    ) -> Option<Arc<ExecutionContext>> {
        CURRENT.with(|current| current.replace(context))
    }
}

/// Open a new tool scope with a fresh correlation id.
///
/// The returned guard keeps the scope open; dropping it (including during
/// unwinding) restores whatever context was active before.
///
/// The scope lives on the current thread. Async code that holds it across
/// an `.await` must run inside a [`ContextFuture`] ([`tool_scope`] or
/// [`ContextFutureExt::in_current_context`]); otherwise other tasks polled
/// on the same worker observe it while the task is suspended.
///
/// # Example
///
/// ```
/// use mcp_logger_system::core::{begin_tool, ExecutionContext};
///
/// assert!(ExecutionContext::current().is_none());
/// {
///     let scope = begin_tool("search_files");
///     let current = ExecutionContext::current().unwrap();
///     assert_eq!(current.correlation_id(), scope.correlation_id());
///     assert_eq!(current.tool_name(), Some("search_files"));
/// }
/// assert!(ExecutionContext::current().is_none());
/// ```
pub fn begin_tool(tool_name: impl Into<String>) -> ExecutionScope {
    ExecutionScope::enter(Arc::new(ExecutionContext::for_tool(tool_name)))
}

/// Run `future` inside a fresh tool scope.
///
/// The scope is active on every poll of `future` and never leaks into the
/// code that polls it.
pub fn tool_scope<F: Future>(tool_name: impl Into<String>, future: F) -> ContextFuture<F> {
    ContextFuture::new(
        future,
        Some(Arc::new(ExecutionContext::for_tool(tool_name))),
    )
}

/// RAII guard for an open tool scope
#[must_use = "the tool scope closes as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ExecutionScope {
    context: Arc<ExecutionContext>,
    previous: Option<Arc<ExecutionContext>>,
}

impl ExecutionScope {
    fn enter(context: Arc<ExecutionContext>) -> Self {
        let previous = ExecutionContext::replace_current(Some(Arc::clone(&context)));
        Self { context, previous }
    }

    pub fn context(&self) -> &Arc<ExecutionContext> {
        &self.context
    }

    pub fn correlation_id(&self) -> &str {
        self.context.correlation_id()
    }

    pub fn tool_name(&self) -> Option<&str> {
        self.context.tool_name()
    }
}

impl Drop for ExecutionScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|current| {
            let mut current = current.borrow_mut();
            let owns_thread = current
                .as_ref()
                .is_some_and(|active| Arc::ptr_eq(active, &self.context));
            if owns_thread {
                *current = previous;
            } else {
                eprintln!(
                    "[LOGGER WARNING] Tool scope '{}' ({}) closed while not current on this thread; \
                     leaving the active context untouched",
                    self.context.tool_name().unwrap_or_default(),
                    self.context.correlation_id()
                );
            }
        });
    }
}

/// Future that owns an execution context for its whole lifetime.
///
/// Created by [`tool_scope`] or [`ContextFutureExt`].
///
/// The inner future is also dropped with its context installed, so a task
/// cancelled mid-flight (by `select!` or a timeout) closes its scopes without
/// touching the caller's context.
pub struct ContextFuture<F> {
    inner: Option<Pin<Box<F>>>,
    context: Option<Arc<ExecutionContext>>,
}

impl<F> ContextFuture<F> {
    pub fn new(future: F, context: Option<Arc<ExecutionContext>>) -> Self {
        Self {
            inner: Some(Box::pin(future)),
            context,
        }
    }

    /// The context that will be installed on the next poll
    pub fn context(&self) -> Option<&Arc<ExecutionContext>> {
        self.context.as_ref()
    }
}

/// Swaps the task's context back out of the thread when a poll ends,
/// whether it returns or unwinds.
struct PollGuard<'a> {
    slot: &'a mut Option<Arc<ExecutionContext>>,
    outer: Option<Arc<ExecutionContext>>,
}

impl Drop for PollGuard<'_> {
    fn drop(&mut self) {
        *self.slot = ExecutionContext::replace_current(self.outer.take());
    }
}

impl<F: Future> Future for ContextFuture<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let outer = ExecutionContext::replace_current(this.context.take());
        let _guard = PollGuard {
            slot: &mut this.context,
            outer,
        };
        let poll = match this.inner.as_mut() {
            Some(inner) => inner.as_mut().poll(cx),
            None => panic!("ContextFuture polled after completion"),
        };
        if poll.is_ready() {
            this.inner = None;
        }
        poll
    }
}

impl<F> Drop for ContextFuture<F> {
    fn drop(&mut self) {
        let Some(inner) = self.inner.take() else {
            return;
        };
        let outer = ExecutionContext::replace_current(self.context.take());
        let _guard = PollGuard {
            slot: &mut self.context,
            outer,
        };
        drop(inner);
    }
}

/// Attach execution contexts to futures
pub trait ContextFutureExt: Future + Sized {
    /// Carry the caller's current context into this future.
    ///
    /// Use this when handing work to an executor, e.g.
    /// `tokio::spawn(work.in_current_context())`.
    fn in_current_context(self) -> ContextFuture<Self> {
        ContextFuture::new(self, ExecutionContext::current())
    }

    /// Run this future with an explicit context (or none)
    fn with_execution_context(self, context: Option<Arc<ExecutionContext>>) -> ContextFuture<Self> {
        ContextFuture::new(self, context)
    }
}

impl<F: Future> ContextFutureExt for F {}
