use proc_macro::TokenStream;

mod attr;
mod declare;
mod helper;

/// Turn an annotated struct into a static type declaration.
///
/// The marker attribute selects the category: `#[document_type(..)]`,
/// `#[media_type(..)]`, `#[member_type(..)]` or `#[data_type(..)]`. Plain
/// base types derive without a marker. `#[declare(base = Parent)]` names the
/// type this one extends; fields take `#[property(..)]`.
#[proc_macro_derive(
    Declare,
    attributes(declare, document_type, media_type, member_type, data_type, property)
)]
pub fn derive_declare(input: TokenStream) -> TokenStream {
    declare::derive_declare(input.into()).into()
}
