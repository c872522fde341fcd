use syn::parse::{Parse, ParseStream};

/// Priorities `0..=100` are reserved for the toolchain and the runtime.
pub const MIN_PRIORITY: u16 = 101;

/// Arguments of `#[premain(..)]` and `#[postmain(..)]`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct HookArgs {
    pub priority: Option<u16>,
}

impl Parse for HookArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            return Ok(HookArgs::default());
        }

        let lit = input.parse::<syn::LitInt>().map_err(|err| {
            syn::Error::new(
                err.span(),
                "expected an optional integer priority, for example: `#[premain(101)]`",
            )
        })?;
        let priority = lit
            .base10_parse::<u16>()
            .ok()
            .filter(|it| *it >= MIN_PRIORITY)
            .ok_or_else(|| {
                syn::Error::new(
                    lit.span(),
                    format!("priority must be between {} and {}", MIN_PRIORITY, u16::MAX),
                )
            })?;

        if !input.is_empty() {
            return Err(input.error("unexpected tokens after priority"));
        }

        Ok(HookArgs {
            priority: Some(priority),
        })
    }
}
