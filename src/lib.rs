use proc_macro::TokenStream;

mod args;
mod expand;

use expand::HookKind;

fn hook(kind: HookKind, attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = proc_macro2::TokenStream::from(item);
    match expand::expand(kind, attr.into(), item.clone()) {
        Ok(tokens) => tokens.into(),
        // keep the function around so callers get one error, not two
        Err(err) => {
            let err = err.to_compile_error();
            (quote::quote! { #err #item }).into()
        }
    }
}

///
/// Run a function before `main`.
///
/// The function must take no arguments and must not be generic, `async`,
/// `const` or `extern`. Its return value, if any, is discarded.
///
/// ```ignore
/// use premain::premain;
///
/// #[premain]
/// fn announce() {
///     println!("[*] In premain()");
/// }
/// ```
///
/// An optional priority between 101 and 65535 orders hooks on ELF targets:
/// lower priorities run first, and every prioritized hook runs before the
/// unprioritized ones. Other targets ignore it.
///
/// ```ignore
/// #[premain(101)]
/// fn first() {}
///
/// #[premain(200)]
/// fn second() {}
/// ```
///
/// Hooks run before the Rust runtime has finished setting up `main`, so
/// they should stick to simple work: no threads, no panics.
///
#[proc_macro_attribute]
pub fn premain(attr: TokenStream, item: TokenStream) -> TokenStream {
    hook(HookKind::Premain, attr, item)
}

///
/// Run a function after `main` returns, as the process exits normally.
///
/// The hook is registered with the C runtime's `atexit` before `main`
/// starts, so it runs after Rust has flushed standard output. It does not
/// run when the process is killed, aborts or calls `_exit`.
///
/// ```ignore
/// use premain::postmain;
///
/// #[postmain]
/// fn announce() {
///     println!("[*] In postmain()");
/// }
/// ```
///
/// Takes the same optional priority as [`macro@premain`]. Hooks with a
/// larger priority run before hooks with a smaller one.
///
#[proc_macro_attribute]
pub fn postmain(attr: TokenStream, item: TokenStream) -> TokenStream {
    hook(HookKind::Postmain, attr, item)
}
