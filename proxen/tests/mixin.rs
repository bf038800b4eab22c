//! Interface composition.

mod common;

use common::{class1, class2, init_tracing, interface1, interface2, mixin_interface};
use proxen::{
    BaseType, Enhancer, GenerateError, Proxy, Target, TypeDescriptor, Value,
    compose_interfaces, testing::PassthroughInterceptor,
};
use std::sync::Arc;

#[test]
fn test_mixin_routes_to_implementors() {
    init_tracing();
    let mixin = compose_interfaces([(interface1(), class1()), (interface2(), class2())]).unwrap();

    assert_eq!(mixin.call("first", &[]).unwrap(), Value::text("first behaviour"));
    assert_eq!(mixin.call("second", &[]).unwrap(), Value::text("second behaviour"));
    assert!(mixin.implements("Interface1"));
    assert!(mixin.implements("Interface2"));
    assert!(mixin.conform(&mixin_interface()).is_ok());
}

#[test]
fn test_mixin_results_are_unchanged() {
    let first = interface1().find("first", 0).unwrap().clone();
    let direct = class1().invoke(&first, &[]).unwrap();

    let mixin = compose_interfaces([(interface1(), class1())]).unwrap();
    assert_eq!(mixin.invoke(&first, &[]).unwrap(), direct);
}

#[test]
fn test_mixin_missing_implementation() {
    let mixin = compose_interfaces([(interface1(), class1())]).unwrap();

    assert_eq!(
        mixin.conform(&mixin_interface()).unwrap_err(),
        GenerateError::MissingImplementation {
            interface: "MixinInterface".into(),
            method: "second/0".into(),
        }
    );
}

#[test]
fn test_mixin_duplicate_interface() {
    let err = compose_interfaces([(interface1(), class1()), (interface1(), class2())]).unwrap_err();
    assert_eq!(err, GenerateError::DuplicateInterface("Interface1".into()));
}

#[test]
fn test_first_interface_wins_on_overlap() {
    let overlapping = TypeDescriptor::interface("Overlapping")
        .method("first", proxen::ReturnKind::Text, 0)
        .build();
    let mixin = compose_interfaces([(interface1(), class1()), (overlapping, class2())]).unwrap();

    assert_eq!(mixin.call("first", &[]).unwrap(), Value::text("first behaviour"));
}

#[test]
fn test_mixin_as_proxy_base() {
    let mixin = compose_interfaces([(interface1(), class1()), (interface2(), class2())]).unwrap();
    let base = BaseType::new(mixin_interface(), move || Arc::new(mixin.clone()) as Arc<dyn Target>);
    let interceptor = PassthroughInterceptor::new();

    let proxy = Enhancer::new()
        .base_type(base)
        .callback(interceptor.callback())
        .create()
        .unwrap();

    assert_eq!(proxy.call("first", &[]).unwrap(), Value::text("first behaviour"));
    assert_eq!(proxy.call("second", &[]).unwrap(), Value::text("second behaviour"));
    assert_eq!(interceptor.count(), 2);
}
