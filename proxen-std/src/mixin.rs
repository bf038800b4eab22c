//! Interface composition.
//!
//! A [`Mixin`] combines several `(interface, implementor)` pairs into one
//! [`Target`]. Each interface method is routed to the object that was supplied
//! with the first interface declaring it; results are passed through untouched.

use proxen_core::{
    BoxError, DispatchError, GenerateError, MethodDescriptor, Target, TypeDescriptor, Value,
    object, object_methods,
};
use std::{collections::HashMap, fmt, sync::Arc};

const MIXIN: &str = "Mixin";

struct Route {
    delegate: usize,
    method: MethodDescriptor,
}

struct Inner {
    interfaces: Vec<TypeDescriptor>,
    delegates: Vec<Arc<dyn Target>>,
    routes: HashMap<Arc<str>, Vec<Route>>,
}

/// A composite object implementing several interfaces through their implementors.
///
/// Clones are handles to the same composite.
#[derive(Clone)]
pub struct Mixin {
    inner: Arc<Inner>,
}

/// Combine `(interface, implementor)` pairs into a [`Mixin`].
///
/// When two interfaces declare the same name and arity, the first one wins.
/// Supplying the same interface twice fails with
/// [`GenerateError::DuplicateInterface`].
pub fn compose_interfaces<I>(impls: I) -> Result<Mixin, GenerateError>
where
    I: IntoIterator<Item = (TypeDescriptor, Arc<dyn Target>)>,
{
    let mut interfaces: Vec<TypeDescriptor> = Vec::new();
    let mut delegates = Vec::new();
    let mut routes: HashMap<Arc<str>, Vec<Route>> = HashMap::new();

    for (interface, delegate) in impls {
        if interfaces.iter().any(|known| known.name() == interface.name()) {
            return Err(GenerateError::DuplicateInterface(interface.name().to_owned()));
        }

        let index = delegates.len();
        for method in interface.methods().iter().filter(|m| !m.is_inherited()) {
            let overloads = routes.entry(Arc::from(method.name())).or_default();
            if !overloads.iter().any(|r| r.method.arity() == method.arity()) {
                overloads.push(Route {
                    delegate: index,
                    method: method.clone(),
                });
            }
        }

        delegates.push(delegate);
        interfaces.push(interface);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        interfaces = interfaces.len(),
        methods = routes.values().map(Vec::len).sum::<usize>(),
        "composed mixin"
    );

    Ok(Mixin {
        inner: Arc::new(Inner {
            interfaces,
            delegates,
            routes,
        }),
    })
}

impl Mixin {
    /// The composed interfaces, in the order they were supplied.
    pub fn interfaces(&self) -> &[TypeDescriptor] {
        &self.inner.interfaces
    }

    /// Returns `true` if an interface named `name` was composed.
    pub fn implements(&self, name: &str) -> bool {
        self.inner.interfaces.iter().any(|i| i.name() == name)
    }

    /// Check that every method of `interface` has an implementor.
    ///
    /// Used for combined interfaces that extend several composed ones.
    pub fn conform(&self, interface: &TypeDescriptor) -> Result<(), GenerateError> {
        match interface
            .methods()
            .iter()
            .filter(|m| !m.is_inherited())
            .find(|m| self.route(m.name(), m.arity()).is_none())
        {
            Some(missing) => Err(GenerateError::MissingImplementation {
                interface: interface.name().to_owned(),
                method: format!("{}/{}", missing.name(), missing.arity()),
            }),
            None => Ok(()),
        }
    }

    /// Call a method by name; the argument count selects the overload.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, DispatchError> {
        if let Some(route) = self.route(name, args.len()) {
            let delegate = &self.inner.delegates[route.delegate];
            return delegate
                .invoke(&route.method, args)
                .map_err(|source| DispatchError::handler(&route.method, source));
        }

        match object_methods().into_iter().find(|m| m.matches(name, args.len())) {
            Some(method) => object::invoke_root(self.object_id(), MIXIN, &method, args),
            None => Err(DispatchError::UnknownMethod {
                owner: MIXIN.to_owned(),
                method: format!("{name}/{}", args.len()),
            }),
        }
    }

    fn route(&self, name: &str, arity: usize) -> Option<&Route> {
        self.inner
            .routes
            .get(name)?
            .iter()
            .find(|r| r.method.arity() == arity)
    }
}

impl Target for Mixin {
    fn invoke(&self, method: &MethodDescriptor, args: &[Value]) -> Result<Value, BoxError> {
        Ok(self.call(method.name(), args)?)
    }

    fn object_id(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }
}

impl fmt::Debug for Mixin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.inner.interfaces.iter().map(|i| i.name()).collect();
        f.debug_struct("Mixin").field("interfaces", &names).finish()
    }
}
