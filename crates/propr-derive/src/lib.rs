//! Derive macro for propr-abi records.
//!
//! `#[derive(Record)]` generates the field table a record exposes to the
//! converter, plus the decoder and nested-field implementations:
//! `Record`, `FromMap` and `Prop` for the annotated struct.
//!
//! # Example
//!
//! ```ignore
//! use propr_abi::Record;
//!
//! #[derive(Debug, Default, Record)]
//! struct Props {
//!     #[react("className")]
//!     name: String,
//!     #[react("count,omitempty")]
//!     count: i64,
//! }
//!
//! let map = Props { name: "box".into(), count: 0 }.to_map();
//! assert_eq!(map.len(), 1);
//! ```

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Fields, GenericParam, Generics, LitStr};

/// Derive `Record`, `FromMap` and `Prop` for a struct with named fields.
///
/// # Attributes
///
/// - `#[react("name")]` - output key `name` instead of the field name
/// - `#[react("name,omitempty")]` - omit the field while it holds its zero value
/// - `#[react(",omitempty")]` - keep the field name, omit when zero
/// - `#[react("-")]` - never emitted nor decoded
///
/// The struct must implement `Default`, and every non-skipped field type must
/// implement `propr_abi::Prop`. Skipped fields still take part in the zero
/// check, compared against the struct's default, so their types need
/// `PartialEq`. Type parameters are bounded by `propr_abi::Prop`.
#[proc_macro_derive(Record, attributes(react))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let expanded = match &input.data {
        Data::Struct(data) => derive_struct(&input, &data.fields),
        Data::Enum(_) | Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "Record can only be derived for structs",
        )),
    };

    match expanded {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

struct FieldSpec<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    name: String,
    tag: String,
}

fn derive_struct(input: &DeriveInput, fields: &Fields) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let name_str = name.unraw().to_string();
    let generics = add_prop_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut skipped = Vec::new();
    let specs = match fields {
        Fields::Named(named) => {
            let mut specs = Vec::with_capacity(named.named.len());
            for f in &named.named {
                let ident = f.ident.as_ref().expect("named field");
                let tag = get_tag(&f.attrs)?.unwrap_or_default();
                if tag == "-" {
                    skipped.push(ident);
                    continue;
                }
                specs.push(FieldSpec {
                    ident,
                    ty: &f.ty,
                    name: ident.unraw().to_string(),
                    tag,
                });
            }
            specs
        }
        Fields::Unit => Vec::new(),
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "Record requires named fields; tuple structs have no keys",
            ));
        }
    };

    let field_entries: Vec<_> = specs
        .iter()
        .map(|f| {
            let ident = f.ident;
            let field_name = &f.name;
            let tag = &f.tag;
            quote! {
                propr_abi::Field::new(#field_name, #tag, &self.#ident)
            }
        })
        .collect();

    let locals: Vec<_> = (0..specs.len()).map(|i| format_ident!("__propr_field{}", i)).collect();

    let field_lookups: Vec<_> = specs
        .iter()
        .zip(&locals)
        .map(|(f, local)| {
            let ty = f.ty;
            let field_name = &f.name;
            let tag = &f.tag;
            quote! {
                let #local = propr_abi::decode_field::<#ty>(map, #field_name, #tag, config)?;
            }
        })
        .collect();

    let field_assignments: Vec<_> = specs
        .iter()
        .zip(&locals)
        .map(|(f, local)| {
            let ident = f.ident;
            let ty = f.ty;
            quote! {
                match #local {
                    propr_abi::__private::Some(update) => update.apply(&mut dest.#ident),
                    propr_abi::__private::None => {
                        if zero_fields {
                            dest.#ident = <#ty as propr_abi::__private::Default>::default();
                        }
                    }
                }
            }
        })
        .collect();

    let zero_checks: Vec<_> = specs
        .iter()
        .map(|f| {
            let ident = f.ident;
            quote! { && propr_abi::Prop::is_zero(&self.#ident) }
        })
        .collect();

    // Skipped fields are never emitted, but still count towards zero-ness.
    let skipped_zero = if skipped.is_empty() {
        quote! {}
    } else {
        quote! {
            && {
                let zero = <Self as propr_abi::__private::Default>::default();
                true #(&& self.#skipped == zero.#skipped)*
            }
        }
    };

    Ok(quote! {
        impl #impl_generics propr_abi::Record for #name #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #name_str
            }

            fn fields(&self) -> propr_abi::__private::Vec<propr_abi::Field<'_>> {
                propr_abi::__private::vec![
                    #(#field_entries),*
                ]
            }
        }

        impl #impl_generics propr_abi::FromMap for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn patch(
                map: &propr_abi::Map,
                config: &propr_abi::DecoderConfig,
            ) -> propr_abi::__private::Result<propr_abi::Patch<Self>, propr_abi::ConversionError> {
                #(#field_lookups)*
                let zero_fields = config.zero_fields;
                propr_abi::__private::Ok(propr_abi::Patch::new(move |dest: &mut Self| {
                    #(#field_assignments)*
                }))
            }
        }

        impl #impl_generics propr_abi::Prop for #name #ty_generics #where_clause {
            fn to_prop(&self) -> propr_abi::PropValue<'_> {
                propr_abi::PropValue::Record(self)
            }

            fn is_zero(&self) -> bool {
                true #(#zero_checks)* #skipped_zero
            }

            fn from_value(
                value: propr_abi::Value,
            ) -> propr_abi::__private::Result<Self, propr_abi::ConversionError> {
                match value {
                    propr_abi::Value::Map(map) => <Self as propr_abi::FromMap>::from_map(&map),
                    other => propr_abi::__private::Err(propr_abi::ConversionError::ExpectedMap(other.kind())),
                }
            }

            fn lookup_update(
                map: &propr_abi::Map,
                field_name: &str,
                tag: &propr_abi::Tag<'_>,
                config: &propr_abi::DecoderConfig,
            ) -> propr_abi::__private::Result<
                propr_abi::__private::Option<propr_abi::Update<Self>>,
                propr_abi::ConversionError,
            > {
                match map.get(tag.key(field_name)) {
                    propr_abi::__private::Some(propr_abi::Value::Map(inner)) if !config.zero_fields => {
                        let patch = <Self as propr_abi::FromMap>::patch(inner, config)?;
                        propr_abi::__private::Ok(propr_abi::__private::Some(propr_abi::Update::Merge(patch)))
                    }
                    _ => {
                        let found = <Self as propr_abi::Prop>::lookup(map, field_name, tag)?;
                        propr_abi::__private::Ok(found.map(propr_abi::Update::Replace))
                    }
                }
            }
        }
    })
}

/// Every type parameter must itself be a field type.
fn add_prop_bounds(mut generics: Generics) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(propr_abi::Prop));
        }
    }
    generics
}

/// Extract the directive from `#[react("...")]`.
fn get_tag(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut found = None;
    for attr in attrs {
        if attr.path().is_ident("react") {
            if found.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate #[react] attribute"));
            }
            let lit: LitStr = attr.parse_args()?;
            found = Some(lit.value());
        }
    }
    Ok(found)
}
