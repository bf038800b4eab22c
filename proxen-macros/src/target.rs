//! Target-related macros.
//!
//! This module contains:
//! - `#[target]` - Attribute macro implementing `Target` and `Class` for an impl block

use proc_macro::TokenStream;
use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{
    Attribute, FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, ReturnType, Token, Type,
    Visibility, parse::Parse, parse_macro_input, parse_quote,
};

/// Arguments for the `#[target]` macro.
pub(crate) struct TargetArgs {
    pub name: Option<String>,
    pub sealed: bool,
}

impl Parse for TargetArgs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut name = None;
        let mut sealed = false;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;

            match ident.to_string().as_str() {
                "name" => {
                    input.parse::<Token![=]>()?;
                    let lit: LitStr = input.parse()?;
                    name = Some(lit.value());
                }
                "sealed" => sealed = true,
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(TargetArgs { name, sealed })
    }
}

/// Arguments of a `#[proxen(...)]` method attribute.
#[derive(Default)]
struct MethodArgs {
    name: Option<String>,
    sealed: bool,
    skip: bool,
}

impl Parse for MethodArgs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut args = MethodArgs::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;

            match ident.to_string().as_str() {
                "name" => {
                    input.parse::<Token![=]>()?;
                    let lit: LitStr = input.parse()?;
                    args.name = Some(lit.value());
                }
                "sealed" => args.sealed = true,
                "skip" => args.skip = true,
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

struct Method {
    ident: Ident,
    name: String,
    sealed: bool,
    params: Vec<Type>,
    returns: Type,
}

/// Implementation of the `#[target]` macro.
pub fn target_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as TargetArgs);
    let mut input = parse_macro_input!(item as ItemImpl);

    match expand(&args, &mut input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: &TargetArgs, input: &mut ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[proxen::target] must be placed on an inherent impl block",
        ));
    }
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[proxen::target] does not support generic types",
        ));
    }

    let self_ty = (*input.self_ty).clone();
    let type_name = match &args.name {
        Some(name) => name.clone(),
        None => type_ident(&self_ty)?.to_string(),
    };

    let mut methods: Vec<Method> = Vec::new();
    for item in &mut input.items {
        let ImplItem::Fn(func) = item else { continue };
        let method_args = take_method_args(&mut func.attrs)?;
        if method_args.skip || !matches!(func.vis, Visibility::Public(_)) {
            continue;
        }
        let Some(method) = describe_method(func, method_args)? else {
            continue;
        };
        if methods
            .iter()
            .any(|m| m.name == method.name && m.params.len() == method.params.len())
        {
            return Err(syn::Error::new_spanned(
                &func.sig,
                format!(
                    "method `{}/{}` is declared twice",
                    method.name,
                    method.params.len()
                ),
            ));
        }
        methods.push(method);
    }

    let arms = methods.iter().map(|m| {
        let ident = &m.ident;
        let name = &m.name;
        let arity = Literal::usize_unsuffixed(m.params.len());
        let tys = &m.params;
        let bindings: Vec<Ident> = (0..tys.len()).map(|i| format_ident!("__arg{}", i)).collect();
        let indices = (0..tys.len()).map(Literal::usize_unsuffixed);

        quote! {
            (#name, #arity) => {
                #(
                    let #bindings = <#tys as ::proxen::FromValue>::from_value(&__args[#indices])?;
                )*
                let __result = self.#ident(#(#bindings),*);
                ::core::result::Result::Ok(::proxen::IntoValue::into_value(__result))
            }
        }
    });

    let declarations = methods.iter().map(|m| {
        let name = &m.name;
        let arity = Literal::usize_unsuffixed(m.params.len());
        let returns = &m.returns;
        let declare = if m.sealed {
            quote! { final_method }
        } else {
            quote! { method }
        };

        quote! {
            .#declare(#name, <#returns as ::proxen::IntoValue>::KIND, #arity)
        }
    });

    let sealed = args.sealed.then(|| quote! { .sealed() });

    let expanded = quote! {
        #input

        impl ::proxen::Target for #self_ty {
            fn invoke(
                &self,
                __method: &::proxen::MethodDescriptor,
                __args: &[::proxen::Value],
            ) -> ::core::result::Result<::proxen::Value, ::proxen::BoxError> {
                match (__method.name(), __args.len()) {
                    #(#arms)*
                    _ => ::core::result::Result::Ok(::proxen::object::invoke_root(
                        ::proxen::Target::object_id(self),
                        #type_name,
                        __method,
                        __args,
                    )?),
                }
            }
        }

        impl ::proxen::Class for #self_ty {
            fn describe() -> ::proxen::TypeDescriptor {
                ::proxen::TypeDescriptor::class(#type_name)
                    #(#declarations)*
                    #sealed
                    .build()
            }

            fn construct() -> Self {
                <Self as ::core::default::Default>::default()
            }
        }
    };

    Ok(expanded)
}

/// Strip `#[proxen(...)]` attributes, merging their arguments.
fn take_method_args(attrs: &mut Vec<Attribute>) -> syn::Result<MethodArgs> {
    let mut args = MethodArgs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("proxen")) {
        let parsed: MethodArgs = attr.parse_args()?;
        args.name = parsed.name.or(args.name);
        args.sealed |= parsed.sealed;
        args.skip |= parsed.skip;
    }
    attrs.retain(|a| !a.path().is_ident("proxen"));
    Ok(args)
}

/// Describe a public method. Associated functions without a receiver are skipped.
fn describe_method(func: &ImplItemFn, args: MethodArgs) -> syn::Result<Option<Method>> {
    let sig = &func.sig;
    let Some(receiver) = sig.receiver() else {
        return Ok(None);
    };
    if receiver.reference.is_none() || receiver.mutability.is_some() {
        return Err(syn::Error::new_spanned(
            receiver,
            "proxied methods must take `&self`",
        ));
    }
    if sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            sig.asyncness,
            "proxied methods cannot be async",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "proxied methods cannot be generic",
        ));
    }

    let mut params = Vec::new();
    for input in sig.inputs.iter().skip(1) {
        let FnArg::Typed(pat_type) = input else {
            continue;
        };
        if let Type::Reference(_) = &*pat_type.ty {
            return Err(syn::Error::new_spanned(
                &pat_type.ty,
                "proxied method parameters must be owned types",
            ));
        }
        params.push((*pat_type.ty).clone());
    }

    let returns = match &sig.output {
        ReturnType::Default => parse_quote! { () },
        ReturnType::Type(_, ty) => (**ty).clone(),
    };

    Ok(Some(Method {
        ident: sig.ident.clone(),
        name: args.name.unwrap_or_else(|| sig.ident.to_string()),
        sealed: args.sealed,
        params,
        returns,
    }))
}

fn type_ident(ty: &Type) -> syn::Result<&Ident> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .map(|segment| &segment.ident)
            .ok_or_else(|| syn::Error::new_spanned(ty, "expected a type name")),
        _ => Err(syn::Error::new_spanned(
            ty,
            "#[proxen::target] needs a named type; pass `name = \"...\"`",
        )),
    }
}
