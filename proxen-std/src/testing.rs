//! Testing utilities for Proxen.
//!
//! Callback implementations that record how often and with what they were
//! invoked:
//!
//! - [`CountingLoader`]: a loader that counts its loads
//! - [`RecordingHandler`]: an invocation handler that records method names
//! - [`PassthroughInterceptor`]: an interceptor that counts calls and runs the base

use parking_lot::Mutex;
use proxen_core::{
    BoxError, Callback, InvocationHandler, Loader, MethodDescriptor, MethodInterceptor, Proxy,
    SuperMethod, Value,
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Counting Loader
// ============================================================================

type Produce = dyn Fn(usize) -> Value + Send + Sync;

/// A loader that counts how many times it was asked to load.
///
/// Clones share the counter.
///
/// # Example
///
/// ```rust,ignore
/// let loader = CountingLoader::new(|_| Value::text("loaded"));
/// let proxy = Enhancer::new()
///     .superclass::<TestClass>()
///     .callback(loader.lazy())
///     .create()?;
///
/// proxy.call("test", &[])?;
/// proxy.call("test", &[])?;
/// assert_eq!(loader.count(), 1);
/// ```
#[derive(Clone)]
pub struct CountingLoader {
    count: Arc<AtomicUsize>,
    produce: Arc<Produce>,
}

impl CountingLoader {
    /// Create a loader; `produce` receives the number of earlier loads.
    pub fn new<F>(produce: F) -> Self
    where
        F: Fn(usize) -> Value + Send + Sync + 'static,
    {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            produce: Arc::new(produce),
        }
    }

    /// A loader that always produces `value`.
    pub fn returning(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::new(move |_| value.clone())
    }

    /// Number of loads so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }

    /// Use this loader as a [`Callback::LazyLoader`].
    pub fn lazy(&self) -> Callback {
        Callback::LazyLoader(Arc::new(self.clone()))
    }

    /// Use this loader as a [`Callback::Dispatcher`].
    pub fn dispatcher(&self) -> Callback {
        Callback::Dispatcher(Arc::new(self.clone()))
    }
}

impl Loader for CountingLoader {
    fn load(&self) -> Result<Value, BoxError> {
        let seen = self.count.fetch_add(1, Ordering::SeqCst);
        Ok((self.produce)(seen))
    }
}

// ============================================================================
// Recording Handler
// ============================================================================

/// An invocation handler that records the name of every method it serves.
///
/// Returns a fixed value for every call. Clones share the record.
#[derive(Clone)]
pub struct RecordingHandler {
    calls: Arc<Mutex<Vec<String>>>,
    result: Value,
}

impl RecordingHandler {
    /// Create a handler answering every call with `result`.
    pub fn new(result: impl Into<Value>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            result: result.into(),
        }
    }

    /// Names of the methods served so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Number of calls served.
    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Forget every recorded call.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    /// Use this handler as a [`Callback::InvocationHandler`].
    pub fn callback(&self) -> Callback {
        Callback::InvocationHandler(Arc::new(self.clone()))
    }
}

impl InvocationHandler for RecordingHandler {
    fn invoke(
        &self,
        _proxy: &dyn Proxy,
        method: &MethodDescriptor,
        _args: &[Value],
    ) -> Result<Value, BoxError> {
        self.calls.lock().push(method.name().to_owned());
        Ok(self.result.clone())
    }
}

// ============================================================================
// Passthrough Interceptor
// ============================================================================

/// An interceptor that counts calls and always runs the base implementation.
#[derive(Clone, Default)]
pub struct PassthroughInterceptor {
    count: Arc<AtomicUsize>,
}

impl PassthroughInterceptor {
    /// Create an interceptor with a zero count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of intercepted calls.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Use this interceptor as a [`Callback::MethodInterceptor`].
    pub fn callback(&self) -> Callback {
        Callback::MethodInterceptor(Arc::new(self.clone()))
    }
}

impl MethodInterceptor for PassthroughInterceptor {
    fn intercept(
        &self,
        _proxy: &dyn Proxy,
        _method: &MethodDescriptor,
        args: &[Value],
        sup: SuperMethod<'_>,
    ) -> Result<Value, BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        sup.invoke_super(args)
    }
}
