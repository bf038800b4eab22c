//! Integration tests for `#[proxen::target]`.

#![cfg(feature = "macros")]

use proxen::{
    Callback, Class, Enhancer, GenerateError, Proxy, ProxyError, ReturnKind, Target, Value,
};

#[derive(Default)]
struct Greeter;

#[proxen::target]
impl Greeter {
    pub fn greet(&self, name: String) -> String {
        format!("{} {name}", self.salutation())
    }

    #[proxen(name = "greet")]
    pub fn greet_anonymous(&self) -> String {
        self.salutation().to_owned()
    }

    #[proxen(sealed)]
    pub fn version(&self) -> i64 {
        1
    }

    #[proxen(skip)]
    pub fn internal(&self) -> i64 {
        2
    }

    pub fn reset(&self) {}

    pub fn nickname(&self, name: Option<String>) -> Option<String> {
        name
    }

    pub fn new_greeter() -> Self {
        Greeter
    }

    fn salutation(&self) -> &'static str {
        "hello"
    }
}

#[derive(Default)]
struct Locked;

#[proxen::target(name = "LockedType", sealed)]
impl Locked {
    pub fn value(&self) -> i64 {
        7
    }
}

#[test]
fn test_describe_lists_public_methods() {
    let ty = Greeter::describe();

    assert_eq!(ty.name(), "Greeter");
    assert_eq!(ty.find("greet", 1).unwrap().returns(), ReturnKind::Text);
    assert_eq!(ty.find("greet", 0).unwrap().returns(), ReturnKind::Text);
    assert_eq!(ty.find("version", 0).unwrap().returns(), ReturnKind::Int);
    assert!(ty.find("version", 0).unwrap().is_final());
    assert_eq!(ty.find("reset", 0).unwrap().returns(), ReturnKind::Void);
    assert_eq!(ty.find("nickname", 1).unwrap().returns(), ReturnKind::Text);
    assert!(ty.find("internal", 0).is_none());
    assert!(ty.find("salutation", 0).is_none());
    assert!(ty.find("new_greeter", 0).is_none());
    assert!(ty.find("to_string", 0).unwrap().is_inherited());
}

#[test]
fn test_invoke_converts_arguments() {
    let ty = Greeter::describe();
    let greeter = Greeter::new_greeter();

    let greet = ty.find("greet", 1).unwrap();
    assert_eq!(
        greeter.invoke(greet, &[Value::text("bob")]).unwrap(),
        Value::text("hello bob")
    );
    assert!(greeter.invoke(greet, &[Value::Int(3)]).is_err());

    let nickname = ty.find("nickname", 1).unwrap();
    assert_eq!(greeter.invoke(nickname, &[Value::Null]).unwrap(), Value::Null);

    let reset = ty.find("reset", 0).unwrap();
    assert_eq!(greeter.invoke(reset, &[]).unwrap(), Value::Null);

    let to_string = ty.find("to_string", 0).unwrap();
    let text = greeter.invoke(to_string, &[]).unwrap();
    assert!(text.as_text().unwrap().starts_with("Greeter@"));
}

#[test]
fn test_generated_class_can_be_proxied() {
    let proxy = Enhancer::new()
        .superclass::<Greeter>()
        .callback(Callback::interceptor(|_proxy, method, args, sup| {
            if method.name() == "greet" && args.len() == 1 {
                Ok(Value::text("intercepted"))
            } else {
                sup.invoke_super(args)
            }
        }))
        .create()
        .unwrap();

    assert_eq!(
        proxy.call("greet", &[Value::text("bob")]).unwrap(),
        Value::text("intercepted")
    );
    assert_eq!(proxy.call("greet", &[]).unwrap(), Value::text("hello"));
    assert_eq!(proxy.call("version", &[]).unwrap(), Value::Int(1));
}

#[test]
fn test_sealed_final_method_bypasses_callbacks() {
    let proxy = Enhancer::new()
        .superclass::<Greeter>()
        .callback(Callback::fixed("fixed"))
        .create()
        .unwrap();

    assert_eq!(proxy.call("greet", &[]).unwrap(), Value::text("fixed"));
    assert_eq!(proxy.call("version", &[]).unwrap(), Value::Int(1));
}

#[test]
fn test_sealed_type_cannot_be_proxied() {
    assert_eq!(Locked::describe().name(), "LockedType");
    assert!(Locked::describe().is_sealed());

    let err = Enhancer::new()
        .superclass::<Locked>()
        .callback(Callback::NoOp)
        .create()
        .unwrap_err();
    assert!(matches!(
        err,
        ProxyError::Generate(GenerateError::UnsupportedBaseType(_))
    ));
}
