//! Method and type descriptors.
//!
//! A [`TypeDescriptor`] is the reflective view of a proxiable type: its name,
//! its [`TypeFlags`] and the [`MethodDescriptor`]s a proxy may intercept.

use crate::value::ReturnKind;
use bitflags::bitflags;
use std::{fmt, sync::Arc};

/// Owner name of the methods every class inherits.
pub const OBJECT: &str = "Object";

bitflags! {
    /// Per-method modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MethodFlags: u8 {
        /// Never intercepted; always runs the base implementation.
        const FINAL = 1;
        /// Inherited from [`OBJECT`] and not overridden by the type.
        const INHERITED = 1 << 1;
        /// Callers expect results consistent with object identity.
        const IDENTITY = 1 << 2;
    }
}

bitflags! {
    /// Per-type modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u8 {
        /// The type cannot be extended by a proxy.
        const SEALED = 1;
        /// The type only declares methods; it has no root-object methods.
        const INTERFACE = 1 << 1;
    }
}

/// Identifies one invocable operation of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    owner: Arc<str>,
    name: Arc<str>,
    returns: ReturnKind,
    arity: usize,
    flags: MethodFlags,
}

impl MethodDescriptor {
    /// Describe a method of `owner`.
    ///
    /// `equals/1` and `hash_code/0` are flagged [`MethodFlags::IDENTITY`]
    /// whoever declares them.
    pub fn new(
        owner: impl Into<Arc<str>>,
        name: impl Into<Arc<str>>,
        returns: ReturnKind,
        arity: usize,
    ) -> Self {
        let name = name.into();
        let flags = if is_identity_method(&name, arity) {
            MethodFlags::IDENTITY
        } else {
            MethodFlags::empty()
        };
        Self {
            owner: owner.into(),
            name,
            returns,
            arity,
            flags,
        }
    }

    /// Add modifiers.
    pub fn with_flags(mut self, flags: MethodFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// The declaring type.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared return kind.
    pub fn returns(&self) -> ReturnKind {
        self.returns
    }

    /// Number of parameters.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Modifiers.
    pub fn flags(&self) -> MethodFlags {
        self.flags
    }

    /// Final methods always run base behavior.
    pub fn is_final(&self) -> bool {
        self.flags.contains(MethodFlags::FINAL)
    }

    /// Declared by the root object rather than the type itself.
    pub fn is_inherited(&self) -> bool {
        self.flags.contains(MethodFlags::INHERITED)
    }

    /// Answers depend on which object receives the call.
    pub fn is_identity_sensitive(&self) -> bool {
        self.flags.contains(MethodFlags::IDENTITY)
    }

    /// Returns `true` if this descriptor answers to `name` with `arity` parameters.
    pub fn matches(&self, name: &str, arity: usize) -> bool {
        &*self.name == name && self.arity == arity
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}/{}", self.owner, self.name, self.arity)
    }
}

fn is_identity_method(name: &str, arity: usize) -> bool {
    matches!((name, arity), ("equals", 1) | ("hash_code", 0))
}

/// The methods every class inherits from [`OBJECT`].
pub fn object_methods() -> [MethodDescriptor; 3] {
    [
        MethodDescriptor::new(OBJECT, "equals", ReturnKind::Bool, 1),
        MethodDescriptor::new(OBJECT, "hash_code", ReturnKind::Int, 0),
        MethodDescriptor::new(OBJECT, "to_string", ReturnKind::Text, 0),
    ]
    .map(|m| m.with_flags(MethodFlags::INHERITED))
}

/// Reflective description of a proxiable type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: Arc<str>,
    flags: TypeFlags,
    methods: Vec<MethodDescriptor>,
}

impl TypeDescriptor {
    /// Start describing a class. Root-object methods are added on build.
    pub fn class(name: impl Into<Arc<str>>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(name.into(), TypeFlags::empty())
    }

    /// Start describing an interface.
    pub fn interface(name: impl Into<Arc<str>>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(name.into(), TypeFlags::INTERFACE)
    }

    /// Type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type modifiers.
    pub fn flags(&self) -> TypeFlags {
        self.flags
    }

    /// Sealed types cannot be extended by a proxy.
    pub fn is_sealed(&self) -> bool {
        self.flags.contains(TypeFlags::SEALED)
    }

    /// Interfaces carry no base behavior of their own.
    pub fn is_interface(&self) -> bool {
        self.flags.contains(TypeFlags::INTERFACE)
    }

    /// All methods, declared ones first.
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Look up a method by name and arity.
    pub fn find(&self, name: &str, arity: usize) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.matches(name, arity))
    }
}

/// Builder for [`TypeDescriptor`].
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    name: Arc<str>,
    flags: TypeFlags,
    methods: Vec<MethodDescriptor>,
}

impl TypeDescriptorBuilder {
    fn new(name: Arc<str>, flags: TypeFlags) -> Self {
        Self {
            name,
            flags,
            methods: Vec::new(),
        }
    }

    /// Declare a method. A second declaration of the same name and arity is ignored.
    pub fn method(self, name: impl Into<Arc<str>>, returns: ReturnKind, arity: usize) -> Self {
        self.declare(name.into(), returns, arity, MethodFlags::empty())
    }

    /// Declare a method that proxies may not intercept.
    pub fn final_method(
        self,
        name: impl Into<Arc<str>>,
        returns: ReturnKind,
        arity: usize,
    ) -> Self {
        self.declare(name.into(), returns, arity, MethodFlags::FINAL)
    }

    /// Mark the type as not extensible.
    pub fn sealed(mut self) -> Self {
        self.flags |= TypeFlags::SEALED;
        self
    }

    fn declare(
        mut self,
        name: Arc<str>,
        returns: ReturnKind,
        arity: usize,
        flags: MethodFlags,
    ) -> Self {
        if !self.methods.iter().any(|m| m.matches(&name, arity)) {
            let method = MethodDescriptor::new(self.name.clone(), name, returns, arity);
            self.methods.push(method.with_flags(flags));
        }
        self
    }

    /// Finish the descriptor.
    pub fn build(mut self) -> TypeDescriptor {
        if !self.flags.contains(TypeFlags::INTERFACE) {
            for inherited in object_methods() {
                if !self
                    .methods
                    .iter()
                    .any(|m| m.matches(inherited.name(), inherited.arity()))
                {
                    self.methods.push(inherited);
                }
            }
        }
        TypeDescriptor {
            name: self.name,
            flags: self.flags,
            methods: self.methods,
        }
    }
}
