//! Expansion of the `Record` derive.

use heck::ToKebabCase;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr};

/// Parsed `#[argmap(...)]` metadata for one field.
#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub present: bool,
    pub tag: Option<String>,
    pub optional: bool,
    pub readonly: bool,
    pub skip: bool,
}

impl FieldAttrs {
    pub(crate) fn parse(field: &syn::Field) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("argmap")) {
            out.present = true;
            match &attr.meta {
                syn::Meta::Path(_) => {}
                syn::Meta::List(_) => attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("tag") {
                        let lit: LitStr = meta.value()?.parse()?;
                        out.tag = Some(lit.value());
                        Ok(())
                    } else if meta.path.is_ident("optional") {
                        out.optional = true;
                        Ok(())
                    } else if meta.path.is_ident("readonly") {
                        out.readonly = true;
                        Ok(())
                    } else if meta.path.is_ident("skip") {
                        out.skip = true;
                        Ok(())
                    } else {
                        Err(meta.error("unsupported argmap attribute"))
                    }
                })?,
                syn::Meta::NameValue(nv) => {
                    return Err(syn::Error::new_spanned(nv, "expected #[argmap(...)]"));
                }
            }
        }
        if out.skip && (out.tag.is_some() || out.optional || out.readonly) {
            return Err(syn::Error::new_spanned(
                field,
                "argmap(skip) cannot be combined with other argmap attributes",
            ));
        }
        Ok(out)
    }

    /// The raw tag annotation handed to the mapper for this field.
    ///
    /// No attribute means an empty tag (the field is walked but does not
    /// participate as a leaf); a missing `tag` key derives the name from
    /// the field identifier in kebab-case.
    pub(crate) fn raw_tag(&self, ident: &syn::Ident) -> String {
        if !self.present {
            return String::new();
        }
        match &self.tag {
            Some(tag) if self.optional && !tag.contains(',') => format!("{tag},optional"),
            Some(tag) => tag.clone(),
            None => {
                let name = ident.to_string().to_kebab_case();
                if self.optional {
                    format!("{name},optional")
                } else {
                    name
                }
            }
        }
    }
}

pub(crate) fn derive(input: &DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic types",
        ));
    }
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &data.fields,
                    "Record requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut visits = Vec::new();
    for field in fields {
        let attrs = FieldAttrs::parse(field)?;
        if attrs.skip {
            continue;
        }
        let Some(name) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "Record requires named fields"));
        };
        let raw_tag = attrs.raw_tag(name);
        let writable = !attrs.readonly;
        visits.push(quote! {
            visit(::argmap::Field {
                tag: #raw_tag,
                writable: #writable,
                slot: ::argmap::ArgField::slot(&mut self.#name),
            })?;
        });
    }

    // Fieldless records never touch the visitor.
    let visit_param = if visits.is_empty() {
        quote! { _visit }
    } else {
        quote! { visit }
    };

    Ok(quote! {
        #[automatically_derived]
        impl ::argmap::Record for #ident {
            fn type_id(&self) -> &'static str {
                ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#ident))
            }

            fn visit_fields<'a>(
                &'a mut self,
                #visit_param: &mut dyn ::core::ops::FnMut(
                    ::argmap::Field<'a>,
                ) -> ::core::result::Result<(), ::argmap::ArgvError>,
            ) -> ::core::result::Result<(), ::argmap::ArgvError> {
                #(#visits)*
                ::core::result::Result::Ok(())
            }

            fn assign_boxed(&mut self, value: ::std::boxed::Box<dyn ::core::any::Any>) -> bool {
                value.downcast::<Self>().map(|boxed| *self = *boxed).is_ok()
            }
        }

        #[automatically_derived]
        impl ::argmap::ArgField for #ident {
            fn slot(&mut self) -> ::argmap::Slot<'_> {
                ::argmap::Slot::Record(self)
            }
        }
    })
}
