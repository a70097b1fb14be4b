//! Per-service event buses.
//!
//! Dispatch is synchronous and ordered by registration. Handlers are invoked from
//! a snapshot of the subscriber list with no service state borrowed, so a handler
//! may freely mutate any service, including the one dispatching. A handler that
//! returns an error or panics is reported to the bus's [`ErrorSink`] and the
//! remaining handlers still run.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::rc::{Rc, Weak};

use futures::FutureExt;

pub type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

pub type HandlerResult = Result<(), HandlerError>;

/// Failure returned by an event handler.
///
/// Any `std::error::Error` converts into it, so handlers can use `?` on service
/// calls directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError(String);

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<E: std::error::Error> From<E> for HandlerError {
    fn from(err: E) -> Self {
        Self(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    pub service: &'static str,
    pub event: &'static str,
    pub message: String,
    pub panicked: bool,
}

/// Receives handler failures caught at the dispatch boundary.
pub trait ErrorSink {
    fn report(&self, failure: HandlerFailure);
}

/// Default sink: one structured `warn` event per failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, failure: HandlerFailure) {
        tracing::warn!(
            service = failure.service,
            event = failure.event,
            panicked = failure.panicked,
            error = %failure.message,
            "event handler failed"
        );
    }
}

/// Removes a subscription. Disposing twice, or after the bus is gone, is a no-op.
pub struct Disposable {
    unsubscribe: Cell<Option<Box<dyn FnOnce()>>>,
}

impl Disposable {
    fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Cell::new(Some(Box::new(unsubscribe))),
        }
    }

    pub fn dispose(&self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }

    pub fn is_disposed(&self) -> bool {
        let current = self.unsubscribe.take();
        let disposed = current.is_none();
        self.unsubscribe.set(current);
        disposed
    }
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

struct Subscribers<H> {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(u64, H)>>,
}

impl<H: Clone> Subscribers<H> {
    fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            handlers: RefCell::new(Vec::new()),
        }
    }

    fn insert(&self, handler: H) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.handlers.borrow_mut().push((id, handler));
        id
    }

    fn remove(&self, id: u64) {
        self.handlers.borrow_mut().retain(|(sub, _)| *sub != id);
    }

    fn contains(&self, id: u64) -> bool {
        self.handlers.borrow().iter().any(|(sub, _)| *sub == id)
    }

    fn snapshot(&self) -> Vec<(u64, H)> {
        self.handlers.borrow().clone()
    }

    fn len(&self) -> usize {
        self.handlers.borrow().len()
    }
}

fn disposable_for<H: Clone + 'static>(subscribers: &Rc<Subscribers<H>>, id: u64) -> Disposable {
    let weak: Weak<Subscribers<H>> = Rc::downgrade(subscribers);
    Disposable::new(move || {
        if let Some(subscribers) = weak.upgrade() {
            subscribers.remove(id);
        }
    })
}

/// Text of a caught panic payload.
pub fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}

type Handler<E> = Rc<dyn Fn(&E) -> HandlerResult>;

pub struct EventBus<E: ?Sized + 'static> {
    service: &'static str,
    event: &'static str,
    subscribers: Rc<Subscribers<Handler<E>>>,
    sink: Rc<dyn ErrorSink>,
}

impl<E: ?Sized + 'static> EventBus<E> {
    pub fn new(service: &'static str, event: &'static str, sink: Rc<dyn ErrorSink>) -> Self {
        Self {
            service,
            event,
            subscribers: Rc::new(Subscribers::new()),
            sink,
        }
    }

    pub fn subscribe<F>(&self, handler: F) -> Disposable
    where
        F: Fn(&E) -> HandlerResult + 'static,
    {
        let id = self.subscribers.insert(Rc::new(handler));
        disposable_for(&self.subscribers, id)
    }

    /// Runs every handler subscribed before this call, in order. Returns how many
    /// ran. Handlers disposed by an earlier handler of the same dispatch are skipped.
    pub fn emit(&self, event: &E) -> usize {
        let mut ran = 0;
        for (id, handler) in self.subscribers.snapshot() {
            if !self.subscribers.contains(id) {
                continue;
            }
            ran += 1;
            match panic::catch_unwind(AssertUnwindSafe(|| handler(event))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => self.report(err.to_string(), false),
                Err(payload) => self.report(panic_message(payload), true),
            }
        }
        ran
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn report(&self, message: String, panicked: bool) {
        self.sink.report(HandlerFailure {
            service: self.service,
            event: self.event,
            message,
            panicked,
        });
    }
}

type AsyncHandler<E> = Rc<dyn Fn(E) -> LocalBoxFuture<'static, HandlerResult>>;

/// Event bus whose handlers complete asynchronously.
///
/// Handlers run one at a time in registration order; the next handler starts only
/// after the previous future resolves. Other host events may be dispatched while a
/// handler is suspended.
pub struct AsyncEventBus<E: Clone + 'static> {
    service: &'static str,
    event: &'static str,
    subscribers: Rc<Subscribers<AsyncHandler<E>>>,
    sink: Rc<dyn ErrorSink>,
}

impl<E: Clone + 'static> AsyncEventBus<E> {
    pub fn new(service: &'static str, event: &'static str, sink: Rc<dyn ErrorSink>) -> Self {
        Self {
            service,
            event,
            subscribers: Rc::new(Subscribers::new()),
            sink,
        }
    }

    pub fn subscribe<F, Fut>(&self, handler: F) -> Disposable
    where
        F: Fn(E) -> Fut + 'static,
        Fut: Future<Output = HandlerResult> + 'static,
    {
        let handler: AsyncHandler<E> =
            Rc::new(move |event| -> LocalBoxFuture<'static, HandlerResult> {
                Box::pin(handler(event))
            });
        let id = self.subscribers.insert(handler);
        disposable_for(&self.subscribers, id)
    }

    pub async fn emit(&self, event: E) -> usize {
        let mut ran = 0;
        for (id, handler) in self.subscribers.snapshot() {
            if !self.subscribers.contains(id) {
                continue;
            }
            ran += 1;
            let future = match panic::catch_unwind(AssertUnwindSafe(|| handler(event.clone()))) {
                Ok(future) => future,
                Err(payload) => {
                    self.report(panic_message(payload), true);
                    continue;
                }
            };
            match AssertUnwindSafe(future).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => self.report(err.to_string(), false),
                Err(payload) => self.report(panic_message(payload), true),
            }
        }
        ran
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn report(&self, message: String, panicked: bool) {
        self.sink.report(HandlerFailure {
            service: self.service,
            event: self.event,
            message,
            panicked,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/event.rs"]
mod tests;
