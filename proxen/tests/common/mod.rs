#![allow(dead_code)]

use proxen::{
    BoxError, Class, MethodDescriptor, ReturnKind, Target, TypeDescriptor, Value, object,
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

pub const HELLO_WORLD: &str = "Hello world!";
pub const HELLO_PROXY: &str = "Hello proxy!";

// ============================================================================
// Tracing
// ============================================================================

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .try_init();
}

// ============================================================================
// Proxiable Types
// ============================================================================

static SOMETHING_CREATED: AtomicUsize = AtomicUsize::new(0);

/// A plain object handed out by `TestClass::get_something`.
#[derive(Debug)]
pub struct Something {
    pub counter: usize,
}

impl Something {
    pub fn new() -> Self {
        Self {
            counter: SOMETHING_CREATED.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }
}

/// The base type most tests extend.
///
/// - `test/0` returns the construction value, or "Hello world!"
/// - `test/1` returns its argument, or "Hello world!" for null
/// - `get_something/0` returns a fresh [`Something`]
/// - `delegate/0` returns "delegated.."
/// - `class_name/0` is final and returns "TestClass"
#[derive(Debug, Default)]
pub struct TestClass {
    value: Option<String>,
}

impl TestClass {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

impl Target for TestClass {
    fn invoke(&self, method: &MethodDescriptor, args: &[Value]) -> Result<Value, BoxError> {
        match (method.name(), args) {
            ("test", []) => Ok(Value::text(
                self.value.as_deref().unwrap_or(HELLO_WORLD).to_owned(),
            )),
            ("test", [input]) => Ok(match input.as_text() {
                Some(text) => Value::text(text.to_owned()),
                None => Value::text(HELLO_WORLD),
            }),
            ("get_something", []) => Ok(Value::object(Something::new())),
            ("delegate", []) => Ok(Value::text("delegated..")),
            ("class_name", []) => Ok(Value::text("TestClass")),
            _ => Ok(object::invoke_root(self.object_id(), "TestClass", method, args)?),
        }
    }
}

impl Class for TestClass {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::class("TestClass")
            .method("test", ReturnKind::Text, 0)
            .method("test", ReturnKind::Text, 1)
            .method("get_something", ReturnKind::Object, 0)
            .method("delegate", ReturnKind::Text, 0)
            .final_method("class_name", ReturnKind::Text, 0)
            .build()
    }

    fn construct() -> Self {
        Self::default()
    }
}

/// A sealed type; proxies cannot extend it.
#[derive(Debug, Default)]
pub struct FinalTestClass;

impl Target for FinalTestClass {
    fn invoke(&self, method: &MethodDescriptor, args: &[Value]) -> Result<Value, BoxError> {
        match (method.name(), args) {
            ("test", []) => Ok(Value::text(HELLO_WORLD)),
            _ => Ok(object::invoke_root(self.object_id(), "FinalTestClass", method, args)?),
        }
    }
}

impl Class for FinalTestClass {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::class("FinalTestClass")
            .method("test", ReturnKind::Text, 0)
            .sealed()
            .build()
    }

    fn construct() -> Self {
        Self
    }
}

// ============================================================================
// Mixin Interfaces
// ============================================================================

pub fn interface1() -> TypeDescriptor {
    TypeDescriptor::interface("Interface1")
        .method("first", ReturnKind::Text, 0)
        .build()
}

pub fn interface2() -> TypeDescriptor {
    TypeDescriptor::interface("Interface2")
        .method("second", ReturnKind::Text, 0)
        .build()
}

/// Extends both [`interface1`] and [`interface2`].
pub fn mixin_interface() -> TypeDescriptor {
    TypeDescriptor::interface("MixinInterface")
        .method("first", ReturnKind::Text, 0)
        .method("second", ReturnKind::Text, 0)
        .build()
}

pub struct Class1;

impl Target for Class1 {
    fn invoke(&self, method: &MethodDescriptor, args: &[Value]) -> Result<Value, BoxError> {
        match (method.name(), args) {
            ("first", []) => Ok(Value::text("first behaviour")),
            _ => Ok(object::invoke_root(self.object_id(), "Class1", method, args)?),
        }
    }
}

pub struct Class2;

impl Target for Class2 {
    fn invoke(&self, method: &MethodDescriptor, args: &[Value]) -> Result<Value, BoxError> {
        match (method.name(), args) {
            ("second", []) => Ok(Value::text("second behaviour")),
            _ => Ok(object::invoke_root(self.object_id(), "Class2", method, args)?),
        }
    }
}

pub fn class1() -> Arc<dyn Target> {
    Arc::new(Class1)
}

pub fn class2() -> Arc<dyn Target> {
    Arc::new(Class2)
}
