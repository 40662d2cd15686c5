use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, Ident, LitStr, Result, Variant, parse_macro_input};

// =============================================================================
// FlagTable derive
// =============================================================================

#[proc_macro_derive(FlagTable, attributes(flag))]
pub fn derive_flag_table(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_flag_table_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_flag_table_impl(input: DeriveInput) -> Result<TokenStream2> {
    let variants = match &input.data {
        Data::Enum(data) => &data.variants,
        _ => {
            return Err(Error::new_spanned(
                &input,
                "FlagTable can only be derived for enums",
            ));
        }
    };

    let repr = parse_repr(&input)?;
    let signed = repr.to_string().starts_with('i');

    let mut flags = Vec::with_capacity(variants.len());
    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new_spanned(
                variant,
                "FlagTable variants cannot have fields",
            ));
        }
        flags.push(ParsedFlag {
            name: parse_flag_name(variant)?,
            variant: variant.ident.clone(),
        });
    }

    validate_names(&flags)?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let entries = flags.iter().map(|flag| {
        let flag_name = &flag.name;
        let variant = &flag.variant;
        quote! {
            (#flag_name, #name::#variant as #repr as u64),
        }
    });

    // Signed reprs would sign-extend negative discriminants into huge values.
    let sign_checks = if signed {
        let checks = flags.iter().map(|flag| {
            let variant = &flag.variant;
            let msg = format!("flag `{}` must not be negative", flag.name.value());
            quote! {
                assert!((#name::#variant as #repr) >= 0, "{}", #msg);
            }
        });
        quote! {
            const _: () = {
                #(#checks)*
            };
        }
    } else {
        quote! {}
    };

    Ok(quote! {
        #sign_checks

        impl #impl_generics nexus_mask::FlagTable for #name #ty_generics #where_clause {
            const NATIVE: nexus_mask::NativeType = nexus_mask::NativeType::of::<#repr>();

            #[inline]
            fn flags() -> &'static [(&'static str, u64)] {
                const FLAGS: &[(&str, u64)] = &[
                    #(#entries)*
                ];
                FLAGS
            }
        }
    })
}

// =============================================================================
// Parsing
// =============================================================================

/// Variant with its resolved flag name.
struct ParsedFlag {
    name: LitStr,
    variant: Ident,
}

fn parse_repr(input: &DeriveInput) -> Result<Ident> {
    for attr in &input.attrs {
        if attr.path().is_ident("repr") {
            let repr: Ident = attr.parse_args()?;
            match repr.to_string().as_str() {
                "u8" | "u16" | "u32" | "u64" | "i8" | "i16" | "i32" | "i64" => {
                    return Ok(repr);
                }
                _ => {
                    return Err(Error::new_spanned(
                        repr,
                        "FlagTable requires repr(u8), repr(u16), repr(u32), repr(u64), repr(i8), repr(i16), repr(i32), or repr(i64)",
                    ));
                }
            }
        }
    }

    Err(Error::new_spanned(
        input,
        "FlagTable requires a #[repr(u8/u16/u32/u64/i8/i16/i32/i64)] attribute",
    ))
}

/// `#[flag(name = "...")]`, or the variant name in snake_case.
fn parse_flag_name(variant: &Variant) -> Result<LitStr> {
    let mut name = None;

    for attr in &variant.attrs {
        if attr.path().is_ident("flag") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(Error::new_spanned(lit, "flag name cannot be empty"));
                    }
                    name = Some(lit);
                    Ok(())
                } else {
                    Err(meta.error("expected `name`"))
                }
            })?;
        }
    }

    Ok(name.unwrap_or_else(|| {
        LitStr::new(
            &to_snake_case(&variant.ident.to_string()),
            variant.ident.span(),
        )
    }))
}

// =============================================================================
// Validation
// =============================================================================

fn validate_names(flags: &[ParsedFlag]) -> Result<()> {
    for (i, flag) in flags.iter().enumerate() {
        let name = flag.name.value();
        if flags[..i].iter().any(|earlier| earlier.name.value() == name) {
            return Err(Error::new_spanned(
                &flag.name,
                format!("duplicate flag name `{name}`"),
            ));
        }
    }
    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}
