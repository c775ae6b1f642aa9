use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::Path;

/// `Some("..")` or `None` for an optional string.
pub fn quote_str_option(value: Option<&String>) -> TokenStream {
    match value {
        Some(value) => quote!(Some(#value)),
        None => quote!(None),
    }
}

/// `Some(Uuid::from_u128(..))` or `None`.
pub fn quote_uuid_option(value: Option<u128>) -> TokenStream {
    match value {
        Some(value) => {
            let lit = Literal::u128_suffixed(value);
            quote!(Some(::typesync::__reexports::uuid::Uuid::from_u128(#lit)))
        }
        None => quote!(None),
    }
}

/// Resolve a declared type to its `PATH` constant.
pub fn to_path(path: &Path) -> TokenStream {
    quote!(<#path as ::typesync::schema::decl::Declared>::PATH)
}

/// `&[<A as Declared>::PATH, ..]`
pub fn quote_paths<'a>(paths: impl IntoIterator<Item = &'a Path>) -> TokenStream {
    let items = paths.into_iter().map(to_path);

    quote!(&[#(#items),*])
}
