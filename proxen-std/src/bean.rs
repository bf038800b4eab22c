//! Record type generation.
//!
//! [`BeanGenerator`] synthesizes a [`RecordType`] from property declarations.
//! Every property `x` gets a `get_x/0` accessor returning its kind and a
//! `set_x/1` accessor returning nothing. Instances ([`Bean`]) start with the
//! default value of each property kind.

use parking_lot::RwLock;
use proxen_core::{
    BaseType, BoxError, DispatchError, GenerateError, MethodDescriptor, ReturnKind, Target,
    TypeDescriptor, Value, ValueKind, object,
};
use std::{fmt, sync::Arc};
use thiserror::Error;

const GETTER: &str = "get_";
const SETTER: &str = "set_";

/// A value could not be stored in a bean property.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyTypeError {
    /// The record type has no such property.
    #[error("no property `{0}`")]
    Unknown(String),

    /// The property kind does not accept the value.
    #[error("property `{property}` holds {expected}, got {found}")]
    Mismatch {
        /// The property.
        property: String,
        /// Declared kind.
        expected: ReturnKind,
        /// Kind of the rejected value.
        found: ValueKind,
    },
}

/// Builder for [`RecordType`]s.
///
/// # Example
///
/// ```rust,ignore
/// let record = BeanGenerator::new()
///     .property("hidden_field", ReturnKind::Text)
///     .generate()?;
///
/// let bean = record.create();
/// bean.set("hidden_field", Value::text("set by a generator"))?;
/// ```
#[derive(Debug, Clone)]
pub struct BeanGenerator {
    name: String,
    properties: Vec<(String, ReturnKind)>,
}

impl Default for BeanGenerator {
    fn default() -> Self {
        Self {
            name: "Bean".to_owned(),
            properties: Vec::new(),
        }
    }
}

impl BeanGenerator {
    /// Create a generator for a type named `Bean`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the generated type.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Declare a property.
    pub fn property(mut self, name: impl Into<String>, kind: ReturnKind) -> Self {
        self.properties.push((name.into(), kind));
        self
    }

    /// Validate the declarations and generate the record type.
    pub fn generate(self) -> Result<RecordType, GenerateError> {
        let mut properties: Vec<(Arc<str>, ReturnKind)> = Vec::with_capacity(self.properties.len());

        for (name, kind) in self.properties {
            if !is_identifier(&name) {
                return Err(GenerateError::InvalidPropertyName(name));
            }
            if kind == ReturnKind::Void {
                return Err(GenerateError::InvalidPropertyType(name));
            }
            if properties.iter().any(|(known, _)| **known == *name) {
                return Err(GenerateError::DuplicateProperty(name));
            }
            properties.push((name.into(), kind));
        }

        let descriptor = properties
            .iter()
            .fold(TypeDescriptor::class(self.name), |builder, (name, kind)| {
                builder
                    .method(format!("{GETTER}{name}"), *kind, 0)
                    .method(format!("{SETTER}{name}"), ReturnKind::Void, 1)
            })
            .build();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            record = %descriptor.name(),
            properties = properties.len(),
            "generated record type"
        );

        Ok(RecordType {
            inner: Arc::new(RecordInner {
                descriptor,
                properties,
            }),
        })
    }
}

/// Generate a record type named `Bean` from `(name, kind)` declarations.
pub fn generate_record_type<I, S>(specs: I) -> Result<RecordType, GenerateError>
where
    I: IntoIterator<Item = (S, ReturnKind)>,
    S: Into<String>,
{
    specs
        .into_iter()
        .fold(BeanGenerator::new(), |generator, (name, kind)| {
            generator.property(name, kind)
        })
        .generate()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

struct RecordInner {
    descriptor: TypeDescriptor,
    properties: Vec<(Arc<str>, ReturnKind)>,
}

/// A generated record type. Cheap to clone.
#[derive(Clone)]
pub struct RecordType {
    inner: Arc<RecordInner>,
}

impl RecordType {
    /// Name of the generated type.
    pub fn name(&self) -> &str {
        self.inner.descriptor.name()
    }

    /// Descriptor with one getter and one setter per property.
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.inner.descriptor
    }

    /// Declared properties, in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, ReturnKind)> + '_ {
        self.inner
            .properties
            .iter()
            .map(|(name, kind)| (&**name, *kind))
    }

    /// Create an instance holding default values.
    pub fn create(&self) -> Bean {
        let values = self
            .inner
            .properties
            .iter()
            .map(|(_, kind)| kind.default_value())
            .collect();
        Bean {
            record: self.clone(),
            values: RwLock::new(values),
        }
    }

    /// Use this record type as the base of a proxy.
    pub fn base_type(&self) -> BaseType {
        let record = self.clone();
        BaseType::new(self.inner.descriptor.clone(), move || {
            Arc::new(record.create()) as Arc<dyn Target>
        })
    }

    fn position(&self, property: &str) -> Option<(usize, ReturnKind)> {
        self.inner
            .properties
            .iter()
            .position(|(name, _)| &**name == property)
            .map(|index| (index, self.inner.properties[index].1))
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("name", &self.name())
            .field("properties", &self.inner.properties)
            .finish()
    }
}

/// An instance of a [`RecordType`].
pub struct Bean {
    record: RecordType,
    values: RwLock<Vec<Value>>,
}

impl Bean {
    /// The record type of this instance.
    pub fn record(&self) -> &RecordType {
        &self.record
    }

    /// Current value of `property`, or `None` if there is no such property.
    pub fn get(&self, property: &str) -> Option<Value> {
        let (index, _) = self.record.position(property)?;
        Some(self.values.read()[index].clone())
    }

    /// Store `value` in `property`.
    pub fn set(&self, property: &str, value: Value) -> Result<(), PropertyTypeError> {
        let (index, kind) = self
            .record
            .position(property)
            .ok_or_else(|| PropertyTypeError::Unknown(property.to_owned()))?;
        if !kind.accepts(&value) {
            return Err(PropertyTypeError::Mismatch {
                property: property.to_owned(),
                expected: kind,
                found: value.kind(),
            });
        }
        self.values.write()[index] = value;
        Ok(())
    }
}

impl Target for Bean {
    fn invoke(&self, method: &MethodDescriptor, args: &[Value]) -> Result<Value, BoxError> {
        if method.is_inherited() {
            return Ok(object::invoke_root(
                self.object_id(),
                self.record.name(),
                method,
                args,
            )?);
        }

        let name = method.name();
        match (name.strip_prefix(GETTER), name.strip_prefix(SETTER), args) {
            (Some(property), _, []) => self.get(property).ok_or_else(|| unknown(self, method)),
            (_, Some(property), [value]) => {
                self.set(property, value.clone())?;
                Ok(Value::Null)
            }
            _ => Err(unknown(self, method)),
        }
    }
}

fn unknown(bean: &Bean, method: &MethodDescriptor) -> BoxError {
    DispatchError::UnknownMethod {
        owner: bean.record.name().to_owned(),
        method: format!("{}/{}", method.name(), method.arity()),
    }
    .into()
}

impl fmt::Debug for Bean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.values.read();
        let mut map = f.debug_map();
        for ((name, _), value) in self.record.inner.properties.iter().zip(values.iter()) {
            map.entry(name, value);
        }
        map.finish()
    }
}
