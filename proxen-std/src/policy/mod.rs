//! Routing policies.
//!
//! - [`NamePolicy`]: method name to index, with a fallback
//! - [`CallbackHelper`]: one selector producing both callbacks and policy
//! - `StaticNamePolicy`: compile-time name table (`phf` feature)
//!
//! Closures `Fn(&MethodDescriptor) -> usize` and [`SingleCallback`] work as
//! policies too.
//!
//! [`SingleCallback`]: proxen_core::SingleCallback

pub mod helper;
pub mod names;
#[cfg(feature = "phf")]
pub mod static_names;

pub use helper::{CallbackHelper, HelperPolicy};
pub use names::NamePolicy;
#[cfg(feature = "phf")]
pub use static_names::StaticNamePolicy;
