use super::*;
use std::cell::RefCell;

#[derive(Default)]
struct RecordingSink {
    failures: RefCell<Vec<HandlerFailure>>,
}

impl ErrorSink for RecordingSink {
    fn report(&self, failure: HandlerFailure) {
        self.failures.borrow_mut().push(failure);
    }
}

fn bus_with_sink() -> (EventBus<str>, Rc<RecordingSink>) {
    let sink = Rc::new(RecordingSink::default());
    let bus = EventBus::new("search", "search", sink.clone() as Rc<dyn ErrorSink>);
    (bus, sink)
}

#[test]
fn handlers_run_in_registration_order() {
    let (bus, _) = bus_with_sink();
    let log = Rc::new(RefCell::new(Vec::new()));

    for tag in ["a", "b", "c"] {
        let log = Rc::clone(&log);
        let _ = bus.subscribe(move |query: &str| {
            log.borrow_mut().push(format!("{tag}:{query}"));
            Ok(())
        });
    }

    assert_eq!(bus.emit("x"), 3);
    assert_eq!(*log.borrow(), vec!["a:x", "b:x", "c:x"]);
}

#[test]
fn failing_handler_is_reported_and_dispatch_continues() {
    let (bus, sink) = bus_with_sink();
    let reached = Rc::new(Cell::new(false));

    let _ = bus.subscribe(|_: &str| Err(HandlerError::new("boom")));
    let _ = bus.subscribe(|_: &str| panic!("handler exploded"));
    {
        let reached = Rc::clone(&reached);
        let _ = bus.subscribe(move |_: &str| {
            reached.set(true);
            Ok(())
        });
    }

    bus.emit("q");

    assert!(reached.get());
    let failures = sink.failures.borrow();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].message, "boom");
    assert!(!failures[0].panicked);
    assert_eq!(failures[1].message, "handler exploded");
    assert!(failures[1].panicked);
    assert_eq!(failures[1].service, "search");
}

#[test]
fn dispose_unsubscribes_and_is_idempotent() {
    let (bus, _) = bus_with_sink();
    let count = Rc::new(Cell::new(0));

    let disposable = {
        let count = Rc::clone(&count);
        bus.subscribe(move |_: &str| {
            count.set(count.get() + 1);
            Ok(())
        })
    };

    bus.emit("1");
    disposable.dispose();
    disposable.dispose();
    bus.emit("2");

    assert_eq!(count.get(), 1);
    assert!(disposable.is_disposed());
    assert!(bus.is_empty());
}

#[test]
fn handler_disposed_mid_dispatch_is_skipped() {
    let (bus, _) = bus_with_sink();
    let count = Rc::new(Cell::new(0));
    let second: Rc<RefCell<Option<Disposable>>> = Rc::new(RefCell::new(None));

    {
        let second = Rc::clone(&second);
        let _ = bus.subscribe(move |_: &str| {
            if let Some(d) = second.borrow().as_ref() {
                d.dispose();
            }
            Ok(())
        });
    }
    let d = {
        let count = Rc::clone(&count);
        bus.subscribe(move |_: &str| {
            count.set(count.get() + 1);
            Ok(())
        })
    };
    *second.borrow_mut() = Some(d);

    assert_eq!(bus.emit("x"), 1);
    assert_eq!(count.get(), 0);
}

#[test]
fn handler_subscribed_during_dispatch_sees_only_later_events() {
    let bus: Rc<EventBus<str>> = Rc::new(bus_with_sink().0);
    let late_calls = Rc::new(Cell::new(0));

    {
        let bus_ref = Rc::downgrade(&bus);
        let late_calls = Rc::clone(&late_calls);
        let _ = bus.subscribe(move |_: &str| {
            if let Some(bus) = bus_ref.upgrade() {
                let late_calls = Rc::clone(&late_calls);
                let _ = bus.subscribe(move |_: &str| {
                    late_calls.set(late_calls.get() + 1);
                    Ok(())
                });
            }
            Ok(())
        });
    }

    bus.emit("first");
    assert_eq!(late_calls.get(), 0);
    bus.emit("second");
    assert_eq!(late_calls.get(), 1);
}

#[test]
fn dispose_after_bus_dropped_is_noop() {
    let (bus, _) = bus_with_sink();
    let disposable = bus.subscribe(|_: &str| Ok(()));
    drop(bus);
    disposable.dispose();
    assert!(disposable.is_disposed());
}

#[test]
fn async_handlers_run_sequentially_and_report_errors() {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    let sink = Rc::new(RecordingSink::default());
    let bus: AsyncEventBus<u32> =
        AsyncEventBus::new("settings", "changeConfiguration", sink.clone() as Rc<dyn ErrorSink>);
    let log = Rc::new(RefCell::new(Vec::new()));

    {
        let log = Rc::clone(&log);
        let _ = bus.subscribe(move |value: u32| {
            let log = Rc::clone(&log);
            async move {
                tokio::task::yield_now().await;
                log.borrow_mut().push(format!("first:{value}"));
                Ok::<_, HandlerError>(())
            }
        });
    }
    let _ = bus.subscribe(|_: u32| async { Err::<(), _>(HandlerError::new("rejected")) });
    {
        let log = Rc::clone(&log);
        let _ = bus.subscribe(move |value: u32| {
            let log = Rc::clone(&log);
            async move {
                log.borrow_mut().push(format!("third:{value}"));
                Ok::<_, HandlerError>(())
            }
        });
    }

    let ran = rt.block_on(bus.emit(7));

    assert_eq!(ran, 3);
    assert_eq!(*log.borrow(), vec!["first:7", "third:7"]);
    assert_eq!(sink.failures.borrow().len(), 1);
    assert_eq!(sink.failures.borrow()[0].message, "rejected");
}

#[test]
fn handler_error_converts_from_std_errors() {
    fn parse(input: &str) -> Result<u32, HandlerError> {
        Ok(input.parse::<u32>()?)
    }

    assert_eq!(parse("12"), Ok(12));
    assert!(parse("x").is_err());
}

#[test]
fn async_handler_panicking_after_await_is_reported_and_dispatch_continues() {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    let sink = Rc::new(RecordingSink::default());
    let bus: AsyncEventBus<u32> =
        AsyncEventBus::new("settings", "changeConfiguration", sink.clone() as Rc<dyn ErrorSink>);
    let reached = Rc::new(Cell::new(false));

    let _ = bus.subscribe(|value: u32| async move {
        tokio::task::yield_now().await;
        if value > 0 {
            panic!("settings handler exploded");
        }
        Ok::<_, HandlerError>(())
    });
    {
        let reached = Rc::clone(&reached);
        let _ = bus.subscribe(move |_: u32| {
            let reached = Rc::clone(&reached);
            async move {
                reached.set(true);
                Ok::<_, HandlerError>(())
            }
        });
    }

    let ran = rt.block_on(bus.emit(1));

    assert_eq!(ran, 2);
    assert!(reached.get());
    let failures = sink.failures.borrow();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].panicked);
    assert_eq!(failures[0].message, "settings handler exploded");
}
