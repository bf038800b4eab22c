//! Routing policies: closures, name tables and the callback helper.

mod common;

use common::{HELLO_PROXY, HELLO_WORLD, TestClass, init_tracing, interface1};
use proxen::{
    BaseType, Callback, CallbackHelper, CallbackRegistry, Class, ConfigurationError,
    DispatchError, Enhancer, MethodDescriptor, NamePolicy, Proxy, ProxyError, RegistryBuilder,
    ReturnKind, Value, bind_callbacks, generate_proxy_type,
};

const NOT_ACCEPTABLE: &str = "Not acceptable method!";

fn filter_callbacks() -> [Callback; 2] {
    [Callback::NoOp, Callback::fixed(NOT_ACCEPTABLE)]
}

#[test]
fn test_callback_filter() {
    init_tracing();
    let proxy = Enhancer::new()
        .superclass::<TestClass>()
        .callbacks(filter_callbacks())
        .callback_filter(|method: &MethodDescriptor| -> usize {
            if method.name() == "test" { 0 } else { 1 }
        })
        .create()
        .unwrap();

    assert_eq!(proxy.call("test", &[Value::Null]).unwrap(), Value::text(HELLO_WORLD));
    assert_eq!(proxy.call("test", &[]).unwrap(), Value::text(HELLO_WORLD));
    assert_eq!(proxy.call("to_string", &[]).unwrap(), Value::text(NOT_ACCEPTABLE));
    assert_eq!(proxy.call("delegate", &[]).unwrap(), Value::text(NOT_ACCEPTABLE));
}

#[test]
fn test_name_policy_matches_callback_filter() {
    let proxy = Enhancer::new()
        .superclass::<TestClass>()
        .callbacks(filter_callbacks())
        .callback_filter(NamePolicy::new(1).route("test", 0))
        .create()
        .unwrap();

    assert_eq!(proxy.call("test", &[Value::Null]).unwrap(), Value::text(HELLO_WORLD));
    assert_eq!(proxy.call("to_string", &[]).unwrap(), Value::text(NOT_ACCEPTABLE));
}

#[test]
fn test_declared_only_name_policy_leaves_root_methods_to_fallback() {
    let callbacks = RegistryBuilder::new()
        .register(Callback::fixed(NOT_ACCEPTABLE))
        .register(Callback::NoOp)
        .build();
    let generated = generate_proxy_type(BaseType::of::<TestClass>()).unwrap();
    let policy = NamePolicy::new(1).route("test", 0).route("to_string", 0).declared_only();
    let proxy = bind_callbacks(&generated, callbacks, policy).unwrap();

    assert_eq!(proxy.call("test", &[]).unwrap(), Value::text(NOT_ACCEPTABLE));
    let text = proxy.call("to_string", &[]).unwrap();
    assert!(text.as_text().unwrap().starts_with("TestClass$$Proxy$$"));
}

#[test]
fn test_multiple_callbacks_require_a_policy() {
    let err = Enhancer::new()
        .superclass::<TestClass>()
        .callbacks(filter_callbacks())
        .create()
        .unwrap_err();

    assert!(matches!(
        err,
        ProxyError::Configuration(ConfigurationError::MissingPolicy { count: 2 })
    ));
}

#[test]
fn test_out_of_range_route_fails_at_configuration() {
    let err = Enhancer::new()
        .superclass::<TestClass>()
        .callbacks(filter_callbacks())
        .callback_filter(NamePolicy::new(2))
        .build()
        .unwrap_err();

    assert!(matches!(
        err,
        ProxyError::Configuration(ConfigurationError::RouteOutOfRange { index: 2, len: 2, .. })
    ));
}

#[test]
fn test_out_of_range_route_fails_at_call_time_for_unseen_methods() {
    let proxy = Enhancer::new()
        .superclass::<TestClass>()
        .callbacks(filter_callbacks())
        .callback_filter(NamePolicy::new(0).route("extra", 7))
        .create()
        .unwrap();

    let extra = MethodDescriptor::new("TestClass", "extra", ReturnKind::Text, 0);
    let err = proxy.dispatch(&extra, &[]).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Routing { index: 7, len: 2, .. }
    ));
}

#[test]
fn test_callback_helper() {
    init_tracing();
    let fixed = Callback::fixed(HELLO_PROXY);
    let helper = CallbackHelper::new(&TestClass::describe(), |method| {
        if method.returns() == ReturnKind::Text && !method.is_inherited() {
            fixed.clone()
        } else {
            Callback::NoOp
        }
    });
    assert_eq!(helper.callbacks().len(), 2);

    let proxy = Enhancer::new()
        .superclass::<TestClass>()
        .callback_helper(helper)
        .create()
        .unwrap();

    assert_eq!(proxy.call("test", &[]).unwrap(), Value::text(HELLO_PROXY));
    assert_eq!(proxy.call("test", &[Value::Null]).unwrap(), Value::text(HELLO_PROXY));
    assert!(proxy.call("hash_code", &[]).unwrap().as_int().is_some());
    assert!(proxy.call("get_something", &[]).unwrap().as_object().is_some());
}

#[test]
fn test_callback_helper_for_another_type_fails_configuration() {
    let helper = CallbackHelper::new(&interface1(), |_| Callback::NoOp);
    let (callbacks, policy) = helper.into_parts();
    let generated = generate_proxy_type(BaseType::of::<TestClass>()).unwrap();

    let err = bind_callbacks(&generated, callbacks, policy).unwrap_err();
    assert!(matches!(
        err,
        ConfigurationError::RouteOutOfRange { index: usize::MAX, len: 1, .. }
    ));
}

#[test]
fn test_registry_deduplicates_by_behavior() {
    let fixed = Callback::fixed(HELLO_PROXY);
    let registry: CallbackRegistry = [Callback::NoOp, fixed.clone()].into_iter().collect();

    assert_eq!(registry.position(&fixed), Some(1));
    assert_eq!(registry.position(&Callback::NoOp), Some(0));
    assert_eq!(registry.position(&Callback::fixed(HELLO_PROXY)), None);
}
