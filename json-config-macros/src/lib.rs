//! Proc macros for the json-config crate.
//!
//! This crate provides the `#[derive(Config)]` macro

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Expr, Fields, Lit, parse_macro_input, spanned::Spanned};

/// Options parsed from a field's `#[config(...)]` attribute.
struct FieldOptions {
    rename: Option<String>,
    skip: bool,
}

impl FieldOptions {
    fn from_attrs(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut rename = None;
        let mut skip = false;

        for attr in attrs {
            if attr.path().is_ident("config") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        let value: Expr = meta.value()?.parse()?;
                        if let Expr::Lit(expr_lit) = value {
                            if let Lit::Str(lit_str) = expr_lit.lit {
                                rename = Some(lit_str.value());
                            } else {
                                return Err(syn::Error::new(
                                    expr_lit.span(),
                                    "rename must be a string",
                                ));
                            }
                        } else {
                            return Err(syn::Error::new(value.span(), "rename must be a literal"));
                        }
                    } else if meta.path.is_ident("skip") {
                        skip = true;
                    } else {
                        return Err(syn::Error::new(
                            meta.path.span(),
                            format!("unknown config attribute: {:?}", meta.path.get_ident()),
                        ));
                    }
                    Ok(())
                })?;
            }
        }

        Ok(Self { rename, skip })
    }
}

/// Derive macro for the `Record` and `FromConfig` traits.
///
/// Fields are listed in declaration order under their own name, unless
/// renamed. The struct must implement `Default`; skipped fields and fields
/// that fail to cast keep their default value.
///
/// # Example
///
/// ```rust,ignore
/// use json_config::Config;
///
/// #[derive(Debug, Default, Config)]
/// struct AppConfig {
///     name: String,
///     #[config(rename = "listen-port")]
///     port: u16,
///     #[config(skip)]
///     generation: u32,
/// }
/// ```
///
/// This expands to roughly:
///
/// ```rust,ignore
/// impl json_config::Record for AppConfig {
///     fn fields(&mut self, fields: &mut json_config::Fields<'_, '_>) -> Result<(), json_config::ConfigError> {
///         fields.field("name", &mut self.name)?;
///         fields.field("listen-port", &mut self.port)?;
///         Ok(())
///     }
/// }
///
/// impl json_config::FromConfig for AppConfig {
///     fn from_config(ctx: &json_config::Context<'_>) -> Result<Self, json_config::ConfigError> {
///         json_config::record(ctx)
///     }
/// }
/// ```
#[proc_macro_derive(Config, attributes(config))]
pub fn derive_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_config_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_config_impl(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            other => {
                return Err(syn::Error::new(
                    other.span(),
                    "Config can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.span(),
                "Config can only be derived for structs",
            ));
        }
    };

    let mut listed = Vec::new();
    let mut bounds = Vec::new();
    for field in fields {
        let options = FieldOptions::from_attrs(&field.attrs)?;
        if options.skip {
            continue;
        }
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new(field.span(), "expected a named field"))?;
        let key = options.rename.unwrap_or_else(|| ident.to_string());
        let ty = &field.ty;

        listed.push(quote! {
            fields.field(#key, &mut self.#ident)?;
        });
        bounds.push(quote! { #ty: ::json_config::FromConfig });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let mut predicates: Vec<proc_macro2::TokenStream> = where_clause
        .map(|w| w.predicates.iter().map(|p| quote! { #p }).collect())
        .unwrap_or_default();
    if !input.generics.params.is_empty() {
        predicates.extend(bounds);
    }

    Ok(quote! {
        impl #impl_generics ::json_config::Record for #name #ty_generics
        where
            Self: ::std::default::Default,
            #(#predicates,)*
        {
            #[allow(unused_variables)]
            fn fields(
                &mut self,
                fields: &mut ::json_config::Fields<'_, '_>,
            ) -> ::std::result::Result<(), ::json_config::ConfigError> {
                #(#listed)*
                ::std::result::Result::Ok(())
            }
        }

        impl #impl_generics ::json_config::FromConfig for #name #ty_generics
        where
            Self: ::std::default::Default,
            #(#predicates,)*
        {
            fn from_config(
                ctx: &::json_config::Context<'_>,
            ) -> ::std::result::Result<Self, ::json_config::ConfigError> {
                ::json_config::record(ctx)
            }
        }
    })
}
