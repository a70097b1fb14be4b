//! Host core: the service registry and the event buses services dispatch through.

pub mod event;
pub mod service;

pub use event::{
    AsyncEventBus, Disposable, ErrorSink, EventBus, HandlerError, HandlerFailure, HandlerResult,
    LocalBoxFuture, TracingErrorSink,
    panic_message,
};
pub use service::{NamedService, Service, ServiceError, ServiceRegistry};
