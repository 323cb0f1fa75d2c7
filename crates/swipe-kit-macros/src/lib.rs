//! Proc-macros for swipe-kit.
//!
//! Currently provided:
//! - `#[derive(WithBuilders)]`: generates `with_<field>(...)` builder-style methods
//!   for each named field in a struct.
//!
//! ## Optional fields
//! A field of type `Option<T>` gets a builder taking `T` and storing `Some(value)`.
//! Options structs can then tell "never set" apart from any real value.
//!
//! ## Field control
//! - `#[with_builders(skip)]`: do not generate a builder for this field.
//! - `#[with_builders(into)]`: take `impl Into<T>` instead of `T`.
//!
//! ### Example
//! ```ignore
//! use swipe_kit_macros::WithBuilders;
//!
//! #[derive(Clone, Debug, Default, WithBuilders)]
//! pub struct Options {
//!     #[with_builders(into)]
//!     pub selector: Option<String>,
//!     pub duration: Option<u32>,
//!     #[with_builders(skip)]
//!     pub debug_only: bool,
//! }
//!
//! let o = Options::default()
//!     .with_selector(".js-carousel")
//!     .with_duration(300);
//! // .with_debug_only(...) is NOT generated.
//! ```

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, spanned::Spanned, Data, DeriveInput, Fields, GenericArgument,
    PathArguments, Type,
};

/// Derive that generates `with_<field>` builder methods for structs with named fields.
///
/// Generated methods take `self` by value (builder style) and return `Self`.
///
/// Field attributes:
/// - `#[with_builders(skip)]`: do not generate a builder method for this field.
/// - `#[with_builders(into)]`: accept `impl Into<T>` for the value.
#[proc_macro_derive(WithBuilders, attributes(with_builders))]
pub fn derive_with_builders(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let ident = &input.ident;
    let generics = &input.generics;

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(
            input.span(),
            "#[derive(WithBuilders)] only supports structs",
        )
        .to_compile_error()
        .into();
    };

    let Fields::Named(fields_named) = &data_struct.fields else {
        return syn::Error::new(
            data_struct.fields.span(),
            "#[derive(WithBuilders)] only supports structs with named fields",
        )
        .to_compile_error()
        .into();
    };

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut methods = Vec::with_capacity(fields_named.named.len());
    for field in fields_named.named.iter() {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };

        let flags = parse_flags(field);
        if flags.skip {
            continue;
        }

        let method_ident = format_ident!("with_{}", field_ident);

        let method = match option_inner(&field.ty) {
            Some(inner) if flags.into => quote! {
                #[inline]
                pub fn #method_ident(mut self, value: impl ::core::convert::Into<#inner>) -> Self {
                    self.#field_ident = ::core::option::Option::Some(value.into());
                    self
                }
            },
            Some(inner) => quote! {
                #[inline]
                pub fn #method_ident(mut self, value: #inner) -> Self {
                    self.#field_ident = ::core::option::Option::Some(value);
                    self
                }
            },
            None => {
                let field_ty = &field.ty;
                if flags.into {
                    quote! {
                        #[inline]
                        pub fn #method_ident(
                            mut self,
                            value: impl ::core::convert::Into<#field_ty>,
                        ) -> Self {
                            self.#field_ident = value.into();
                            self
                        }
                    }
                } else {
                    quote! {
                        #[inline]
                        pub fn #method_ident(mut self, value: #field_ty) -> Self {
                            self.#field_ident = value;
                            self
                        }
                    }
                }
            }
        };

        methods.push(method);
    }

    quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#methods)*
        }
    }
    .into()
}

#[derive(Default)]
struct FieldFlags {
    skip: bool,
    into: bool,
}

fn parse_flags(field: &syn::Field) -> FieldFlags {
    let mut flags = FieldFlags::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("with_builders") {
            continue;
        }

        // Unknown nested items are ignored
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                flags.skip = true;
            } else if meta.path.is_ident("into") {
                flags.into = true;
            }
            Ok(())
        });
    }

    flags
}

/// `T` for a field written as `Option<T>` (or `std::option::Option<T>`)
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }

    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}
