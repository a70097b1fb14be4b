use super::*;
use std::cell::Cell;

struct TestService {
    value: Cell<i32>,
}

impl Service for TestService {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl NamedService for TestService {
    const NAME: &'static str = "test";
}

struct AnotherService {
    data: String,
}

impl Service for AnotherService {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl NamedService for AnotherService {
    const NAME: &'static str = "another";
}

#[test]
fn test_register_and_resolve() {
    let mut registry = ServiceRegistry::new();
    registry
        .register(Rc::new(TestService {
            value: Cell::new(42),
        }))
        .unwrap();

    let retrieved = registry.resolve::<TestService>().unwrap();
    assert_eq!(retrieved.value.get(), 42);
}

#[test]
fn test_resolve_returns_the_registered_instance() {
    let mut registry = ServiceRegistry::new();
    let service = Rc::new(TestService {
        value: Cell::new(10),
    });
    registry.register(Rc::clone(&service)).unwrap();

    registry.resolve::<TestService>().unwrap().value.set(20);

    assert_eq!(service.value.get(), 20);
    assert!(Rc::ptr_eq(&service, &registry.resolve::<TestService>().unwrap()));
}

#[test]
fn test_get_by_name() {
    let mut registry = ServiceRegistry::new();
    registry
        .register(Rc::new(AnotherService {
            data: "hello".to_string(),
        }))
        .unwrap();

    let service = registry.get("another").unwrap();
    assert_eq!(service.name(), "another");
    assert_eq!(registry.resolve::<AnotherService>().unwrap().data, "hello");
}

#[test]
fn test_unknown_name_is_not_found() {
    let registry = ServiceRegistry::new();
    assert!(matches!(
        registry.get("statusBar"),
        Err(ServiceError::NotFound(name)) if name == "statusBar"
    ));
    assert!(matches!(
        registry.resolve::<TestService>(),
        Err(ServiceError::NotFound(_))
    ));
}

#[test]
fn test_duplicate_registration() {
    let mut registry = ServiceRegistry::new();
    registry
        .register(Rc::new(TestService {
            value: Cell::new(1),
        }))
        .unwrap();

    let result = registry.register(Rc::new(TestService {
        value: Cell::new(2),
    }));
    assert!(matches!(result, Err(ServiceError::AlreadyRegistered(_))));
    assert_eq!(registry.resolve::<TestService>().unwrap().value.get(), 1);
}

#[test]
fn test_names_in_registration_order() {
    let mut registry = ServiceRegistry::new();
    registry
        .register(Rc::new(AnotherService {
            data: String::new(),
        }))
        .unwrap();
    registry
        .register(Rc::new(TestService {
            value: Cell::new(0),
        }))
        .unwrap();

    assert_eq!(registry.names(), &["another", "test"]);
    assert!(registry.contains("test"));
    assert!(!registry.contains("missing"));
}
