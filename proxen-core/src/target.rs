//! Invocable objects.
//!
//! - [`Target`]: anything that can run a method given its descriptor
//! - [`Class`]: a target that can describe and construct itself
//! - [`BaseType`]: the type-erased pair of descriptor and constructor a proxy extends
//! - [`Proxy`]: a generated stand-in that routes calls through callbacks

use crate::{
    error::{BoxError, DispatchError},
    method::{MethodDescriptor, TypeDescriptor},
    value::Value,
};
use std::{fmt, sync::Arc};

/// An object whose methods can be invoked reflectively.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be invoked reflectively",
    label = "missing `Target` implementation",
    note = "Implement `Target` by hand or put `#[proxen::target]` on its impl block."
)]
pub trait Target: Send + Sync + 'static {
    /// Run `method` on this object.
    fn invoke(&self, method: &MethodDescriptor, args: &[Value]) -> Result<Value, BoxError>;

    /// Identity of this object, used by root-object `equals` and `hash_code`.
    fn object_id(&self) -> usize {
        (self as *const Self).cast::<()>() as usize
    }
}

/// A [`Target`] type that can be used as the base of a proxy.
pub trait Class: Target + Sized {
    /// Reflective description of the type.
    fn describe() -> TypeDescriptor;

    /// The default constructor.
    fn construct() -> Self;
}

type Constructor = dyn Fn() -> Arc<dyn Target> + Send + Sync;

/// A type-erased proxiable type: its descriptor and its default constructor.
#[derive(Clone)]
pub struct BaseType {
    descriptor: Arc<TypeDescriptor>,
    constructor: Arc<Constructor>,
}

impl BaseType {
    /// The base type of a [`Class`].
    pub fn of<C: Class>() -> Self {
        Self::new(C::describe(), || Arc::new(C::construct()) as Arc<dyn Target>)
    }

    /// Pair a descriptor with a constructor.
    pub fn new<F>(descriptor: TypeDescriptor, constructor: F) -> Self
    where
        F: Fn() -> Arc<dyn Target> + Send + Sync + 'static,
    {
        Self {
            descriptor: Arc::new(descriptor),
            constructor: Arc::new(constructor),
        }
    }

    /// Describes the base type.
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Base type name.
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// Run the constructor.
    pub fn construct(&self) -> Arc<dyn Target> {
        (self.constructor)()
    }
}

impl fmt::Debug for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseType")
            .field("name", &self.descriptor.name())
            .field("flags", &self.descriptor.flags())
            .finish_non_exhaustive()
    }
}

/// A generated stand-in object that routes every call through its callbacks.
///
/// Callbacks receive the proxy as `&dyn Proxy`, so they can call back into it.
pub trait Proxy: Target {
    /// Name of the generated type.
    fn type_name(&self) -> &str;

    /// Descriptor of the extended base type.
    fn descriptor(&self) -> &TypeDescriptor;

    /// Route one call.
    fn dispatch(&self, method: &MethodDescriptor, args: &[Value]) -> Result<Value, DispatchError>;

    /// Look a method up by name and argument count, then dispatch it.
    fn call(&self, name: &str, args: &[Value]) -> Result<Value, DispatchError> {
        let method = self.descriptor().find(name, args.len()).cloned().ok_or_else(|| {
            DispatchError::UnknownMethod {
                owner: self.type_name().to_owned(),
                method: format!("{name}/{}", args.len()),
            }
        })?;
        self.dispatch(&method, args)
    }
}
