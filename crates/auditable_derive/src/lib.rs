use proc_macro::TokenStream;
use quote::quote;
use std::collections::HashSet;
use syn::{
    Expr, ExprLit, Fields, Ident, ItemStruct, Lit, Meta, Path, Token, parse_macro_input,
    parse_quote, punctuated::Punctuated,
};

const ID_FIELD: &str = "id";
const CREATED_AT_FIELD: &str = "created_at";
const UPDATED_AT_FIELD: &str = "updated_at";

struct AuditableConfig {
    traits_path: Path,
    active_model_ident: Ident,
}

impl Default for AuditableConfig {
    fn default() -> Self {
        Self {
            traits_path: parse_quote!(crate::db::dao::base_traits),
            active_model_ident: Ident::new("ActiveModel", proc_macro2::Span::call_site()),
        }
    }
}

/// Prepends the auditable record (`id`, `created_at`, `updated_at`) to a
/// sea-orm model and wires the timestamp traits the DAO layer relies on.
///
/// Must be placed above `#[sea_orm::model]`.
#[proc_macro_attribute]
pub fn auditable(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr with Punctuated<Meta, Token![,]>::parse_terminated);
    let mut config = AuditableConfig::default();
    if let Err(err) = apply_args(&mut config, args) {
        return err.to_compile_error().into();
    }

    let mut input = parse_macro_input!(item as ItemStruct);
    let fields = match &mut input.fields {
        Fields::Named(fields) => fields,
        _ => {
            return syn::Error::new_spanned(input, "auditable requires a struct with named fields")
                .to_compile_error()
                .into();
        }
    };

    let existing: HashSet<String> = fields
        .named
        .iter()
        .filter_map(|field| field.ident.as_ref().map(|ident| ident.to_string()))
        .collect();

    for reserved in [ID_FIELD, CREATED_AT_FIELD, UPDATED_AT_FIELD] {
        if existing.contains(reserved) {
            return syn::Error::new_spanned(
                &input.ident,
                format!("auditable injects `{reserved}`; remove it from the struct"),
            )
            .to_compile_error()
            .into();
        }
    }

    let mut new_fields: Punctuated<syn::Field, Token![,]> = Punctuated::new();
    new_fields.push(parse_quote! {
        #[sea_orm(primary_key)]
        pub id: i32
    });
    new_fields.push(parse_quote! {
        #[sea_orm(default_expr = "Expr::current_timestamp()")]
        pub created_at: sea_orm::entity::prelude::DateTimeWithTimeZone
    });
    new_fields.push(parse_quote! {
        #[sea_orm(default_expr = "Expr::current_timestamp()")]
        pub updated_at: sea_orm::entity::prelude::DateTimeWithTimeZone
    });
    for field in fields.named.iter().cloned() {
        new_fields.push(field);
    }
    fields.named = new_fields;

    let traits_path = config.traits_path;
    let active_model = config.active_model_ident;

    let expanded = quote! {
        #input

        impl #traits_path::TimestampedActiveModel for #active_model {
            fn set_created_at(
                &mut self,
                ts: sea_orm::entity::prelude::DateTimeWithTimeZone,
            ) {
                self.created_at = sea_orm::ActiveValue::Set(ts);
            }

            fn set_updated_at(
                &mut self,
                ts: sea_orm::entity::prelude::DateTimeWithTimeZone,
            ) {
                self.updated_at = sea_orm::ActiveValue::Set(ts);
            }
        }

        impl #traits_path::AuditableEntity for Entity {
            fn id_column() -> Column {
                Column::Id
            }

            fn created_at_column() -> Column {
                Column::CreatedAt
            }
        }
    };

    expanded.into()
}

fn apply_args(
    config: &mut AuditableConfig,
    args: Punctuated<Meta, Token![,]>,
) -> Result<(), syn::Error> {
    for meta in args {
        let Meta::NameValue(name_value) = meta else {
            return Err(syn::Error::new_spanned(
                meta,
                "expected name-value pair, e.g. traits = \"path::to::traits\"",
            ));
        };

        let Some(ident) = name_value.path.get_ident() else {
            return Err(syn::Error::new_spanned(
                name_value.path,
                "expected simple identifier for attribute key",
            ));
        };

        let value = match name_value.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit_str),
                ..
            }) => lit_str,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "expected string literal for attribute value",
                ));
            }
        };

        match ident.to_string().as_str() {
            "traits" => {
                config.traits_path = value.parse::<Path>().map_err(|err| {
                    syn::Error::new(value.span(), format!("invalid traits path: {err}"))
                })?;
            }
            "active_model" => {
                config.active_model_ident = Ident::new(&value.value(), value.span());
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "unknown auditable attribute key",
                ));
            }
        }
    }

    Ok(())
}
