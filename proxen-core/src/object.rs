//! Default behavior of the root-object methods.
//!
//! Every class inherits `equals/1`, `hash_code/0` and `to_string/0`. Types
//! that don't override them fall back to [`invoke_root`], which derives all
//! three from the receiver's identity.

use crate::{error::DispatchError, method::MethodDescriptor, value::Value};

/// Run an inherited root-object method for the object identified by `identity`.
///
/// Fails with [`DispatchError::UnknownMethod`] for anything that is not a
/// root-object method.
pub fn invoke_root(
    identity: usize,
    type_name: &str,
    method: &MethodDescriptor,
    args: &[Value],
) -> Result<Value, DispatchError> {
    match (method.name(), args) {
        ("equals", [other]) => Ok(Value::Bool(
            matches!(other, Value::Instance(o) if o.object_id() == identity),
        )),
        ("hash_code", []) => Ok(Value::Int(identity_hash(identity))),
        ("to_string", []) => Ok(Value::text(format!(
            "{type_name}@{:x}",
            identity_hash(identity)
        ))),
        _ => Err(DispatchError::UnknownMethod {
            owner: type_name.to_owned(),
            method: method.to_string(),
        }),
    }
}

/// Hash derived from an object identity.
pub fn identity_hash(identity: usize) -> i64 {
    // Allocation addresses are aligned; drop the always-zero bits.
    (((identity as u64) >> 3) & 0x7fff_ffff) as i64
}
