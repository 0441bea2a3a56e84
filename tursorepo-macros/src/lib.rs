//! Derive macro generating the tursorepo entity capability
//!
//! `#[derive(Entity)]` on a plain struct produces the `<Name>Entity` marker
//! type plus the `EntityTrait`, `ModelTrait`, and `FromRow` implementations
//! the repository is generic over.

use convert_case::Case;
use convert_case::Casing;
use darling::FromDeriveInput;
use darling::FromField;
use proc_macro2::Ident;
use proc_macro2::TokenStream as TokenStream2;
use quote::format_ident;
use quote::quote;
use syn::DeriveInput;
use syn::Type;

#[derive(Debug, FromField)]
#[darling(attributes(tursorepo))]
struct FieldReceiver {
    pub ident: Option<Ident>,
    pub ty:    Type,

    #[darling(default)]
    pub primary_key: bool,

    #[darling(default)]
    pub auto_increment: bool,

    #[darling(default)]
    pub column_name: Option<String>,

    #[darling(default)]
    pub soft_delete: bool,
}

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(tursorepo), supports(struct_named))]
struct EntityReceiver {
    pub ident: Ident,
    pub vis:   syn::Visibility,
    pub data:  darling::ast::Data<(), FieldReceiver>,

    #[darling(default)]
    pub table_name: Option<String>,
}

#[derive(Debug)]
struct FieldInfo {
    pub field_name:        Ident,
    pub column_name:       String,
    pub is_primary_key:    bool,
    pub is_auto_increment: bool,
    pub is_soft_delete:    bool,
}

#[derive(Debug)]
struct EntityInfo {
    pub struct_name: Ident,
    pub vis:         syn::Visibility,
    pub table_name:  String,
    pub fields:      Vec<FieldInfo>,
}

impl FieldReceiver {
    fn to_field_info(self) -> FieldInfo {
        let field_name = self.ident.expect("Expected named field");
        let column_name = self.column_name.unwrap_or_else(|| field_name.to_string());

        FieldInfo {
            field_name,
            column_name,
            is_primary_key: self.primary_key,
            is_auto_increment: self.auto_increment,
            is_soft_delete: self.soft_delete,
        }
    }
}

impl EntityReceiver {
    fn to_entity_info(self) -> EntityInfo {
        let table_name =
            self.table_name.unwrap_or_else(|| format!("{}s", self.ident.to_string().to_case(Case::Snake)));

        let fields =
            self.data.take_struct().expect("Expected struct").fields.into_iter().map(|f| f.to_field_info()).collect();

        EntityInfo { struct_name: self.ident, vis: self.vis, table_name, fields }
    }
}

#[proc_macro_derive(Entity, attributes(tursorepo))]
pub fn derive_entity(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    let receiver = match EntityReceiver::from_derive_input(&input) {
        Ok(r) => r,
        Err(e) => return e.write_errors().into(),
    };

    let entity_info = receiver.to_entity_info();

    let expanded = impl_entity(&entity_info);
    proc_macro::TokenStream::from(expanded)
}

fn impl_entity(entity_info: &EntityInfo) -> TokenStream2 {
    let name = &entity_info.struct_name;
    let vis = &entity_info.vis;
    let entity_name = format_ident!("{}Entity", name);
    let table_name = entity_info.table_name.clone();

    let primary_key_fields = entity_info.fields.iter().filter(|f| f.is_primary_key).collect::<Vec<_>>();

    if primary_key_fields.is_empty() {
        panic!("Entity must have a primary key field marked with #[tursorepo(primary_key)]");
    } else if primary_key_fields.len() > 1 {
        panic!("Entity must have only one primary key field marked with #[tursorepo(primary_key)]");
    }

    let primary_key_field = primary_key_fields[0];
    let pk_field_name = &primary_key_field.field_name;
    let pk_column_name = &primary_key_field.column_name;
    let pk_auto_increment = primary_key_field.is_auto_increment;

    let soft_delete_fields = entity_info.fields.iter().filter(|f| f.is_soft_delete).collect::<Vec<_>>();

    if soft_delete_fields.len() > 1 {
        panic!("Entity must have at most one field marked with #[tursorepo(soft_delete)]");
    }

    let soft_delete_column = match soft_delete_fields.first() {
        Some(field) => {
            let column = &field.column_name;
            quote! { Some(#column) }
        }
        None => quote! { None },
    };

    let to_row_entries: Vec<_> = entity_info
        .fields
        .iter()
        .map(|f| {
            let field_name = &f.field_name;
            let column_name = &f.column_name;
            quote! {
                (#column_name, tursorepo::IntoValue::into_value(self.#field_name.clone()))
            }
        })
        .collect();

    let from_row_fields: Vec<_> = entity_info
        .fields
        .iter()
        .enumerate()
        .map(|(idx, f)| {
            let field_name = &f.field_name;
            quote! {
                #field_name: tursorepo::FromValue::from_value(row.get_value(#idx)?)?
            }
        })
        .collect();

    quote! {
        #[derive(Clone, Copy, Debug, Default)]
        #vis struct #entity_name;

        impl tursorepo::EntityTrait for #entity_name {
            type Model = #name;

            fn table_name() -> &'static str {
                #table_name
            }

            fn primary_key() -> &'static str {
                #pk_column_name
            }

            fn primary_key_auto_increment() -> bool {
                #pk_auto_increment
            }

            fn soft_delete_column() -> Option<&'static str> {
                #soft_delete_column
            }
        }

        impl tursorepo::ModelTrait for #name {
            type Entity = #entity_name;

            fn primary_key_value(&self) -> tursorepo::Value {
                tursorepo::IntoValue::into_value(self.#pk_field_name.clone())
            }

            fn to_row(&self) -> Vec<(&'static str, tursorepo::Value)> {
                vec![
                    #(#to_row_entries),*
                ]
            }
        }

        impl tursorepo::FromRow for #name {
            fn from_row(row: &tursorepo::Row) -> tursorepo::Result<Self> {
                Ok(Self {
                    #(#from_row_fields),*
                })
            }
        }
    }
}
