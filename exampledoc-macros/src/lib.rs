//! exampledoc Macros
//!
//! Procedural macro for example registration.
//!
//! ## Macros
//!
//! - `#[example]` - Register a function, an async function or a `Default`
//!   struct implementing `Example` as a documentation example

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Item, ItemFn, ItemStruct, parse_macro_input};

// ============================================================================
// Attribute Parsing Helpers
// ============================================================================

mod attr {
    use syn::meta::ParseNestedMeta;

    /// Get the attribute name as a string
    pub fn name(meta: &ParseNestedMeta) -> String {
        meta.path
            .get_ident()
            .map(|i| i.to_string())
            .unwrap_or_default()
    }

    /// Parse a string literal attribute: `attr = "value"`
    pub fn string(meta: &ParseNestedMeta) -> syn::Result<String> {
        let value: syn::LitStr = meta.value()?.parse()?;
        Ok(value.value())
    }

    /// Parse an integer literal attribute: `attr = 42`
    pub fn int<T>(meta: &ParseNestedMeta) -> syn::Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let value: syn::LitInt = meta.value()?.parse()?;
        Ok(value.base10_parse().ok())
    }

    /// Create an unknown attribute error
    pub fn unknown(meta: &ParseNestedMeta, name: &str) -> syn::Error {
        meta.error(format!("unknown attribute: {}", name))
    }
}

/// Register a documentation example
///
/// # Example
///
/// ```ignore
/// // Function form: the qualified name is `<module path>.<function name>`
/// #[example]
/// fn squaring(out: &mut Console) {
///     writeln!(out, "4");
/// }
///
/// // Explicit qualified name, fallible body
/// #[example(name = "demos.code_examples.Parsing")]
/// fn parsing(out: &mut Console) -> anyhow::Result<()> {
///     let n: i32 = "42".parse()?;
///     writeln!(out, "{}", n);
///     Ok(())
/// }
///
/// // Async body, run on a tokio runtime
/// #[example(runtime = "multi_thread", worker_threads = 2)]
/// async fn waiting(out: &mut Console) { ... }
///
/// // Struct form: instantiated through `Default`, then `Example::main` is invoked
/// #[example]
/// #[derive(Default)]
/// struct Greeting;
/// ```
#[proc_macro_attribute]
pub fn example(args: TokenStream, item: TokenStream) -> TokenStream {
    let args = TokenStream2::from(args);
    let item = parse_macro_input!(item as Item);

    example_impl(args, item)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn example_impl(args: TokenStream2, item: Item) -> Result<TokenStream2, syn::Error> {
    let config = parse_example_config(args)?;

    match item {
        Item::Fn(func) => fn_example(config, func),
        Item::Struct(input) => struct_example(config, input),
        other => Err(syn::Error::new_spanned(
            other,
            "exampledoc: #[example] applies to functions and structs only",
        )),
    }
}

fn fn_example(config: ExampleConfig, func: ItemFn) -> Result<TokenStream2, syn::Error> {
    validate_signature(&func)?;
    if config.async_runtime.is_some() && func.sig.asyncness.is_none() {
        return Err(syn::Error::new_spanned(
            &func.sig,
            "exampledoc: runtime options only apply to async functions",
        ));
    }

    let fn_name = &func.sig.ident;
    let wrapper_name = format_ident!("__exampledoc_run_{}", fn_name);

    let runner_block = if func.sig.asyncness.is_some() {
        generate_async_runner(&config, fn_name)
    } else {
        quote! {
            ::exampledoc::IntoExampleResult::into_example_result(#fn_name(out))
        }
    };

    let registration = generate_registration(&config, fn_name, &wrapper_name);

    Ok(quote! {
        #func

        #[doc(hidden)]
        #[allow(non_snake_case)]
        fn #wrapper_name(out: &mut ::exampledoc::Console) -> ::exampledoc::ExampleResult {
            #runner_block
        }

        #registration
    })
}

fn struct_example(config: ExampleConfig, input: ItemStruct) -> Result<TokenStream2, syn::Error> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "exampledoc: example structs cannot be generic",
        ));
    }
    if config.async_runtime.is_some() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "exampledoc: runtime options only apply to async functions",
        ));
    }

    let struct_name = &input.ident;
    let wrapper_name = format_ident!("__exampledoc_run_{}", struct_name);
    let registration = generate_registration(&config, struct_name, &wrapper_name);

    Ok(quote! {
        #input

        #[doc(hidden)]
        #[allow(non_snake_case)]
        fn #wrapper_name(out: &mut ::exampledoc::Console) -> ::exampledoc::ExampleResult {
            let mut example = <#struct_name as ::core::default::Default>::default();
            ::exampledoc::Example::main(&mut example, out)
        }

        #registration
    })
}

fn generate_registration(
    config: &ExampleConfig,
    item: &syn::Ident,
    wrapper_name: &syn::Ident,
) -> TokenStream2 {
    let item_str = item.to_string();
    let name = match &config.name {
        Some(name) => quote! { Some(#name) },
        None => quote! { None },
    };

    quote! {
        ::exampledoc::internal::inventory::submit! {
            ::exampledoc::ExampleDef {
                name: #name,
                item: #item_str,
                module_path: module_path!(),
                file: file!(),
                line: line!(),
                runner_fn: #wrapper_name,
            }
        }
    }
}

fn generate_async_runner(config: &ExampleConfig, fn_name: &syn::Ident) -> TokenStream2 {
    let runtime_builder = match config.async_runtime.clone().unwrap_or_default() {
        AsyncRuntimeConfig::CurrentThread => quote! { new_current_thread() },
        AsyncRuntimeConfig::MultiThread { worker_threads } => {
            let workers = worker_threads
                .map(|n| quote! { .worker_threads(#n) })
                .unwrap_or(quote! {});
            quote! { new_multi_thread() #workers }
        }
    };

    quote! {
        let rt = ::exampledoc::internal::tokio::runtime::Builder::#runtime_builder
            .enable_all()
            .build()?;

        ::exampledoc::IntoExampleResult::into_example_result(rt.block_on(#fn_name(out)))
    }
}

#[derive(Debug, Clone, Default)]
enum AsyncRuntimeConfig {
    #[default]
    CurrentThread,
    MultiThread {
        worker_threads: Option<usize>,
    },
}

#[derive(Default)]
struct ExampleConfig {
    name: Option<String>,
    async_runtime: Option<AsyncRuntimeConfig>,
}

fn parse_example_config(args: TokenStream2) -> Result<ExampleConfig, syn::Error> {
    let mut config = ExampleConfig::default();
    let mut runtime_type: Option<String> = None;
    let mut worker_threads: Option<usize> = None;

    if args.is_empty() {
        return Ok(config);
    }

    let parser = syn::meta::parser(|meta| {
        let name = attr::name(&meta);
        match name.as_str() {
            "name" => {
                let value = attr::string(&meta)?;
                if value.split('.').any(str::is_empty) {
                    return Err(meta.error(format!(
                        "exampledoc: `{}` is not a dot separated qualified name",
                        value
                    )));
                }
                config.name = Some(value);
            }
            "runtime" => runtime_type = Some(attr::string(&meta)?),
            "worker_threads" => worker_threads = attr::int(&meta)?,
            _ => return Err(attr::unknown(&meta, &name)),
        }
        Ok(())
    });

    syn::parse::Parser::parse2(parser, args)?;

    config.async_runtime = match (runtime_type.as_deref(), worker_threads) {
        (Some("multi_thread") | Some("multi-thread"), _) | (None, Some(_)) => {
            Some(AsyncRuntimeConfig::MultiThread { worker_threads })
        }
        (Some("current_thread") | Some("current-thread"), _) => {
            Some(AsyncRuntimeConfig::CurrentThread)
        }
        (Some(other), _) => {
            return Err(syn::Error::new(
                proc_macro2::Span::call_site(),
                format!("exampledoc: unknown runtime: {}", other),
            ));
        }
        (None, None) => None,
    };

    Ok(config)
}

fn validate_signature(func: &ItemFn) -> syn::Result<()> {
    if func.sig.inputs.len() != 1 {
        return Err(syn::Error::new_spanned(
            &func.sig,
            "exampledoc: Function must take exactly one argument: `&mut Console`",
        ));
    }
    if !func.sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &func.sig.generics,
            "exampledoc: example functions cannot be generic",
        ));
    }
    Ok(())
}
