// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This crate provides procedural macros for the Pyxis configuration crates.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

/// A derive macro that implements the `pyxis_config::ConfigSection` trait.
///
/// The section name defaults to the struct's own name and can be overridden
/// with `#[section(name = "...")]`. Each field to populate carries
/// `#[config(key = "...")]`, optionally with `with = SomeParser` to bypass
/// the registry's default parser for the field's type; fields without the
/// attribute are left alone. Override parsers are instantiated through
/// `Default`, so they need a parameterless construction path.
///
/// ```ignore
/// #[derive(Default, ConfigSection)]
/// #[section(name = "TestConfig")]
/// struct TestConfig {
///     #[config(key = "IntValue")]
///     int_value: i32,
///     #[config(key = "LongValue", with = LongParser)]
///     long_value: i64,
/// }
/// ```
#[proc_macro_derive(ConfigSection, attributes(section, config))]
pub fn derive_config_section(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree.
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    // Resolve the section name: the struct's name unless overridden.
    let mut section_name = name.to_string();
    for attr in &input.attrs {
        if !attr.path().is_ident("section") {
            continue;
        }
        let result = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                section_name = value.value();
                Ok(())
            } else {
                Err(meta.error("unsupported section attribute; expected `name`"))
            }
        });
        if let Err(error) = result {
            return error.to_compile_error().into();
        }
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return syn::Error::new_spanned(
                    name,
                    "ConfigSection can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "ConfigSection can only be derived for structs")
                .to_compile_error()
                .into()
        }
    };

    // Generate one binder call per `#[config]` field.
    let mut bindings = Vec::new();
    for field in fields {
        let Some(ident) = &field.ident else { continue };

        let mut key: Option<LitStr> = None;
        let mut parser: Option<syn::Path> = None;
        let mut saw_config_attr = false;
        for attr in &field.attrs {
            if !attr.path().is_ident("config") {
                continue;
            }
            saw_config_attr = true;
            let result = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    key = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("with") {
                    parser = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported config attribute; expected `key` or `with`"))
                }
            });
            if let Err(error) = result {
                return error.to_compile_error().into();
            }
        }

        let Some(key) = key else {
            if saw_config_attr {
                return syn::Error::new_spanned(
                    field,
                    "#[config] requires a key, e.g. #[config(key = \"IntValue\")]",
                )
                .to_compile_error()
                .into();
            }
            continue;
        };

        let binding = match parser {
            Some(parser_type) => quote! {
                binder.bind_with(
                    #key,
                    &mut self.#ident,
                    &<#parser_type as ::core::default::Default>::default(),
                );
            },
            None => quote! {
                binder.bind(#key, &mut self.#ident);
            },
        };
        bindings.push(binding);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Generate the implementation of the ConfigSection trait.
    let expanded = quote! {
        impl #impl_generics ::pyxis_config::ConfigSection for #name #ty_generics #where_clause {
            const SECTION_NAME: &'static str = #section_name;

            fn bind(&mut self, binder: &mut ::pyxis_config::SectionBinder<'_>) {
                #(#bindings)*
            }
        }
    };

    // Hand the output tokens back to the compiler.
    TokenStream::from(expanded)
}
