//! `#[derive(Record)]` implementation.

use darling::{FromDeriveInput, FromField};
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::HashMap;
use syn::DeriveInput;

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(record), supports(struct_named))]
struct RecordOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<(), FieldOpts>,
}

/// Per-field attributes parsed from `#[record(...)]`.
#[derive(Debug, FromField)]
#[darling(attributes(record))]
struct FieldOpts {
    ident: Option<syn::Ident>,

    /// Column name override
    #[darling(default)]
    column: Option<String>,

    /// Never populated by the mapper
    #[darling(default)]
    skip: bool,
}

pub fn derive_record_impl(input: DeriveInput) -> TokenStream {
    let opts = match RecordOpts::from_derive_input(&input) {
        Ok(o) => o,
        Err(e) => return e.write_errors(),
    };

    let fields = match opts.data.as_ref().take_struct() {
        Some(fields) => fields.fields,
        None => {
            return darling::Error::unsupported_shape("enum")
                .with_span(&opts.ident)
                .write_errors()
        }
    };

    let mut errors = darling::Error::accumulator();
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut bindings = Vec::new();

    for field in fields.into_iter().filter(|f| !f.skip) {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = ident.to_string();
        let field_name = field_name.strip_prefix("r#").unwrap_or(&field_name).to_string();
        let column = match &field.column {
            Some(column) if column.trim().is_empty() => {
                errors.push(darling::Error::custom("column name cannot be empty").with_span(ident));
                continue;
            }
            Some(column) => column.clone(),
            None => field_name.to_lowercase(),
        };

        if let Some(previous) = seen.insert(column.to_lowercase(), field_name.clone()) {
            errors.push(
                darling::Error::custom(format!(
                    "column \"{column}\" is already bound to field `{previous}`"
                ))
                .with_span(ident),
            );
            continue;
        }

        bindings.push(quote! {
            ::quill_db::Binding::new(
                #field_name,
                #column,
                |record: &mut Self, value: &::quill_db::Value| {
                    ::quill_db::assign(&mut record.#ident, value)
                },
            )
        });
    }

    if let Err(e) = errors.finish() {
        return e.write_errors();
    }

    let name = &opts.ident;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    quote! {
        impl #impl_generics ::quill_db::Record for #name #ty_generics #where_clause {
            fn bindings() -> ::std::vec::Vec<::quill_db::Binding<Self>> {
                ::std::vec![#(#bindings),*]
            }
        }
    }
}
