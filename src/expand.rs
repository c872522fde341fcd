use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{FnArg, ItemFn};

use crate::args::HookArgs;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookKind {
    Premain,
    Postmain,
}

impl HookKind {
    fn attr_name(self) -> &'static str {
        match self {
            HookKind::Premain => "premain",
            HookKind::Postmain => "postmain",
        }
    }
}

/// ELF initializer section; the linker sorts `.init_array.NNNNN` by priority.
fn elf_section(priority: Option<u16>) -> String {
    match priority {
        Some(priority) => format!(".init_array.{:05}", priority),
        None => ".init_array".to_string(),
    }
}

const MACH_O_SECTION: &str = "__DATA,__mod_init_func";
const COFF_SECTION: &str = ".CRT$XCU";

fn check_signature(kind: HookKind, func: &ItemFn) -> syn::Result<()> {
    let sig = &func.sig;
    let name = kind.attr_name();

    if let Some(arg) = sig.inputs.first() {
        let msg = match arg {
            FnArg::Receiver(_) => format!("#[{}] can't be used on methods", name),
            FnArg::Typed(_) => format!("#[{}] functions can't take arguments", name),
        };
        return Err(syn::Error::new_spanned(&sig.inputs, msg));
    }
    if let Some(variadic) = &sig.variadic {
        return Err(syn::Error::new_spanned(
            variadic,
            format!("#[{}] functions can't take arguments", name),
        ));
    }
    if !sig.generics.params.is_empty() || sig.generics.where_clause.is_some() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            format!("#[{}] functions can't be generic", name),
        ));
    }
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            format!("#[{}] functions can't be async", name),
        ));
    }
    if let Some(constness) = &sig.constness {
        return Err(syn::Error::new_spanned(
            constness,
            format!("#[{}] functions can't be const", name),
        ));
    }
    if let Some(abi) = &sig.abi {
        return Err(syn::Error::new_spanned(
            abi,
            format!("#[{}] functions must use the Rust ABI", name),
        ));
    }

    Ok(())
}

/// Generates the tagged function plus the initializer table entry that
/// makes the loader run it.
///
/// ```ignore
/// #[premain(101)]
/// fn announce() { println!("hi"); }
/// ```
///
/// will expand to
///
/// ```ignore
/// fn announce() { println!("hi"); }
/// const _: () = {
///     #[used]
///     #[cfg_attr(any(target_os = "linux", ..), link_section = ".init_array.00101")]
///     #[cfg_attr(target_vendor = "apple", link_section = "__DATA,__mod_init_func")]
///     #[cfg_attr(windows, link_section = ".CRT$XCU")]
///     static __PREMAIN_ANNOUNCE: extern "C" fn() = {
///         extern "C" fn __premain_announce() { let _ = announce(); }
///         __premain_announce
///     };
/// };
/// ```
///
/// `#[postmain]` expands the same way, except the table entry hands a
/// second thunk to the C runtime's `atexit` instead of calling the
/// function directly.
pub fn expand(kind: HookKind, attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let args = syn::parse2::<HookArgs>(attr)?;
    let func = syn::parse2::<ItemFn>(item)?;
    check_signature(kind, &func)?;

    let fn_name = &func.sig.ident;
    let prefix = kind.attr_name();
    let snake = change_case::snake_case(fn_name.to_string().trim_start_matches("r#"));
    let static_name = format_ident!("__{}_{}", prefix.to_uppercase(), snake.to_uppercase());
    let entry_name = format_ident!("__{}_{}", prefix, snake);

    let call = if func.sig.unsafety.is_some() {
        quote! { unsafe { #fn_name() } }
    } else {
        quote! { #fn_name() }
    };

    let entry = match kind {
        HookKind::Premain => quote! {
            #[allow(clippy::let_unit_value)]
            extern "C" fn #entry_name() {
                let _ = #call;
            }
        },
        HookKind::Postmain => quote! {
            extern "C" fn #entry_name() {
                // declared here, the calling crate may not depend on libc
                extern "C" {
                    fn atexit(cb: extern "C" fn()) -> ::core::ffi::c_int;
                }

                #[allow(clippy::let_unit_value)]
                extern "C" fn run() {
                    let _ = #call;
                }

                unsafe {
                    atexit(run);
                }
            }
        },
    };

    let elf = elf_section(args.priority);
    let unsupported = format!(
        "#[{}] is not supported on this target: no initializer table is known for it",
        prefix
    );

    Ok(quote! {
        #func

        const _: () = {
            #[used]
            #[cfg_attr(
                any(
                    target_os = "linux",
                    target_os = "android",
                    target_os = "freebsd",
                    target_os = "netbsd",
                    target_os = "openbsd",
                    target_os = "dragonfly",
                    target_os = "illumos",
                    target_os = "solaris",
                    target_os = "fuchsia",
                ),
                link_section = #elf
            )]
            #[cfg_attr(target_vendor = "apple", link_section = #MACH_O_SECTION)]
            #[cfg_attr(windows, link_section = #COFF_SECTION)]
            static #static_name: extern "C" fn() = {
                #entry
                #entry_name
            };

            #[cfg(not(any(
                target_os = "linux",
                target_os = "android",
                target_os = "freebsd",
                target_os = "netbsd",
                target_os = "openbsd",
                target_os = "dragonfly",
                target_os = "illumos",
                target_os = "solaris",
                target_os = "fuchsia",
                target_vendor = "apple",
                windows,
            )))]
            compile_error!(#unsupported);
        };
    })
}
