use proc_macro::TokenStream;

mod target;

/// Make an impl block's type proxiable.
///
/// Every `pub fn` taking `&self` becomes a declared method. Its arity is the
/// number of non-receiver parameters and its return kind is
/// `IntoValue::KIND` of the return type. Parameters are converted with
/// `FromValue`, so they must be owned types. The type must implement
/// `Default`, which serves as the constructor.
///
/// # Arguments
///
/// - `name = "..."`: type name (defaults to the type's identifier)
/// - `sealed`: proxies may not extend the type
///
/// # Method attributes
///
/// - `#[proxen(name = "...")]`: declare the method under another name;
///   methods sharing a name are overloads told apart by arity
/// - `#[proxen(sealed)]`: the method is final and never intercepted
/// - `#[proxen(skip)]`: do not declare the method
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct TestClass;
///
/// #[proxen::target]
/// impl TestClass {
///     pub fn test(&self) -> String {
///         "Hello world!".to_owned()
///     }
///
///     #[proxen(name = "test")]
///     pub fn test_with(&self, input: Option<String>) -> Option<String> {
///         input
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn target(attr: TokenStream, item: TokenStream) -> TokenStream {
    target::target_impl(attr, item)
}
