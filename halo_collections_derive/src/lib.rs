use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DataStruct, DeriveInput, Fields, Ident, LitStr, Member, Token, Type, TypePath,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

struct LinkedAttribute {
    crate_path: syn::Path,
}

/// Parses the attribute in the format: `crate_path = "path::to::crate"`.
impl Parse for LinkedAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let key: Ident = input.parse()?;
        if key != "crate_path" {
            return Err(syn::Error::new(key.span(), "expected attribute `crate_path`"));
        }

        let _: Token![=] = input.parse()?;
        let value: LitStr = input.parse()?;
        let path: syn::Path = value.parse()?;

        Ok(LinkedAttribute { crate_path: path })
    }
}

fn is_list_link(ty: &Type) -> bool {
    match ty {
        Type::Path(TypePath { qself: None, path }) => path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "ListLink"),
        _ => false,
    }
}

/// Derive macro implementing `HasLink` for structs that embed a `ListLink`.
///
/// The link field is the one marked `#[list_link]`, or else the only field whose type
/// is `ListLink`.
#[proc_macro_derive(Linked, attributes(linked, list_link))]
pub fn linked_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Find absolute crate path
    let mut crate_path = quote! { ::halo_collections };

    for attr in &input.attrs {
        if attr.path().is_ident("linked") {
            match attr.parse_args::<LinkedAttribute>() {
                Ok(linked_attr) => {
                    let path = linked_attr.crate_path;
                    crate_path = quote! { #path };
                    break;
                }
                Err(e) => return e.to_compile_error().into(),
            }
        }
    }

    let fields = if let Data::Struct(DataStruct { ref fields, .. }) = input.data {
        fields
    } else {
        return syn::Error::new_spanned(&input, "Linked derive macro only supports structs")
            .to_compile_error()
            .into();
    };

    let members: Vec<(Member, &syn::Field)> = match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|field| field.ident.clone().map(|ident| (Member::Named(ident), field)))
            .collect(),
        Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .iter()
            .enumerate()
            .map(|(index, field)| (Member::Unnamed(index.into()), field))
            .collect(),
        Fields::Unit => Vec::new(),
    };

    let marked: Vec<&Member> = members
        .iter()
        .filter(|(_, field)| field.attrs.iter().any(|attr| attr.path().is_ident("list_link")))
        .map(|(member, _)| member)
        .collect();

    let link_member = match marked.as_slice() {
        [member] => (*member).clone(),
        [] => {
            let candidates: Vec<&Member> = members
                .iter()
                .filter(|(_, field)| is_list_link(&field.ty))
                .map(|(member, _)| member)
                .collect();
            match candidates.as_slice() {
                [member] => (*member).clone(),
                [] => {
                    return syn::Error::new_spanned(
                        struct_name,
                        "Struct must have a field of type `ListLink` or a field marked `#[list_link]`",
                    )
                    .to_compile_error()
                    .into();
                }
                _ => {
                    return syn::Error::new_spanned(
                        struct_name,
                        "Struct has several `ListLink` fields, mark the one to use with `#[list_link]`",
                    )
                    .to_compile_error()
                    .into();
                }
            }
        }
        _ => {
            return syn::Error::new_spanned(struct_name, "Only one field can be marked `#[list_link]`")
                .to_compile_error()
                .into();
        }
    };

    let intrusive_path = quote! { #crate_path::linked_list::intrusive };

    let expanded = quote! {
        unsafe impl #impl_generics #intrusive_path::traits::HasLink for #struct_name #ty_generics #where_clause {
            const LINK_OFFSET: usize = ::core::mem::offset_of!(#struct_name #ty_generics, #link_member);
        }
    };

    TokenStream::from(expanded)
}
