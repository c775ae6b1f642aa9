use crate::{
    attr::{DeclareArgs, MarkerArgs, MarkerKind, PropertyArgs},
    helper::{quote_paths, quote_str_option, quote_uuid_option, to_path},
};
use darling::{Error, FromMeta, util::SpannedValue};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Field, Fields, Meta, ext::IdentExt};
use uuid::Uuid;

pub fn derive_declare(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    expand(&input).unwrap_or_else(Error::write_errors)
}

pub(crate) fn expand(input: &DeriveInput) -> darling::Result<TokenStream> {
    let mut errors = Error::accumulator();

    if !input.generics.params.is_empty() {
        errors.push(
            Error::custom("Declare cannot be derived for generic types").with_span(&input.generics),
        );
    }

    let fields: Vec<&Field> = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                errors.push(
                    Error::custom("Declare requires named fields").with_span(&data.fields),
                );
                Vec::new()
            }
        },
        _ => {
            errors.push(Error::custom("Declare can only be derived for structs").with_span(&input.ident));
            Vec::new()
        }
    };

    let declare = errors.handle(declare_args(&input.attrs)).unwrap_or_default();
    let marker = errors.handle(marker(&input.attrs)).flatten();

    // data types carry no properties
    let members: Vec<TokenStream> = if marker.as_ref().is_none_or(|(kind, _)| kind.has_properties()) {
        fields
            .iter()
            .filter_map(|field| errors.handle(member(field)).flatten())
            .collect()
    } else {
        Vec::new()
    };

    let marker = match marker {
        Some((kind, args)) => errors.handle(marker_tokens(kind, &args)),
        None => Some(quote!(None)),
    };

    let marker = errors.finish_with(marker)?.unwrap_or_else(|| quote!(None));
    let ident = &input.ident;
    let ident_str = ident.unraw().to_string();
    let base = declare
        .base
        .as_ref()
        .map_or_else(|| quote!(None), |base| {
            let path = to_path(base);
            quote!(Some(#path))
        });
    let member_count = members.len();

    Ok(quote! {
        impl ::typesync::schema::decl::Declared for #ident {
            const PATH: &'static str = concat!(module_path!(), "::", #ident_str);

            fn decl() -> &'static ::typesync::schema::decl::TypeDecl {
                static MEMBERS: [::typesync::schema::decl::MemberDecl; #member_count] = [#(#members),*];
                static DECL: ::typesync::schema::decl::TypeDecl = ::typesync::schema::decl::TypeDecl {
                    path: <#ident as ::typesync::schema::decl::Declared>::PATH,
                    ident: #ident_str,
                    base: #base,
                    marker: #marker,
                    members: &MEMBERS,
                };

                &DECL
            }
        }
    })
}

fn declare_args(attrs: &[Attribute]) -> darling::Result<DeclareArgs> {
    let mut found = attrs.iter().filter(|attr| attr.path().is_ident("declare"));

    let Some(first) = found.next() else {
        return Ok(DeclareArgs::default());
    };
    if let Some(extra) = found.next() {
        return Err(Error::custom("duplicate #[declare] attribute").with_span(extra));
    }

    DeclareArgs::from_meta(&first.meta)
}

fn marker(attrs: &[Attribute]) -> darling::Result<Option<(MarkerKind, MarkerArgs)>> {
    let mut found = attrs
        .iter()
        .filter_map(|attr| MarkerKind::of(attr).map(|kind| (kind, attr)));

    let Some((kind, attr)) = found.next() else {
        return Ok(None);
    };
    if let Some((_, extra)) = found.next() {
        return Err(Error::custom("a type takes exactly one marker attribute").with_span(extra));
    }

    let args = MarkerArgs::from_meta(&attr.meta)?;
    let misplaced = args.misplaced(kind);
    if !misplaced.is_empty() {
        return Err(Error::custom(format!(
            "#[{}] does not accept: {}",
            kind.attr_name(),
            misplaced.join(", ")
        ))
        .with_span(attr));
    }

    Ok(Some((kind, args)))
}

fn marker_tokens(kind: MarkerKind, args: &MarkerArgs) -> darling::Result<TokenStream> {
    let category = kind.category();
    let id = quote_uuid_option(parse_id(args.id.as_ref())?);
    let name = &args.name;
    let alias = quote_str_option(args.alias.as_ref());
    let description = quote_str_option(args.description.as_ref());
    let icon = quote_str_option(args.icon.as_ref());
    let is_container = args.container.is_present();
    let allowed_as_root = args.allowed_as_root.is_present();
    let thumbnail = quote_str_option(args.thumbnail.as_ref());
    let compositions = quote_paths(args.compositions.iter());
    let allowed_children = quote_paths(args.allowed_children.iter());
    let editor = quote_str_option(args.editor.as_ref());

    Ok(quote! {
        Some(::typesync::schema::decl::TypeAttr {
            category: #category,
            id: #id,
            name: #name,
            alias: #alias,
            description: #description,
            icon: #icon,
            is_container: #is_container,
            allowed_as_root: #allowed_as_root,
            thumbnail: #thumbnail,
            compositions: #compositions,
            allowed_children: #allowed_children,
            editor: #editor,
        })
    })
}

fn member(field: &Field) -> darling::Result<Option<TokenStream>> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(Error::custom("Declare requires named fields").with_span(field));
    };
    let args = property_args(&field.attrs)?;
    if args.ignore.is_present() {
        return Ok(None);
    }

    let access = match (args.read_only.is_present(), args.write_only.is_present()) {
        (false, false) => quote!(ReadWrite),
        (true, false) => quote!(ReadOnly),
        (false, true) => quote!(WriteOnly),
        (true, true) => {
            return Err(
                Error::custom("read_only and write_only are mutually exclusive").with_span(field),
            );
        }
    };

    if let Some(default) = &args.default {
        serde_json::from_str::<serde_json::Value>(default).map_err(|err| {
            Error::from(syn::Error::new(
                default.span(),
                format!("default is not a JSON literal: {err}"),
            ))
        })?;
    }

    let ident_str = ident.unraw().to_string();
    let ty = &field.ty;
    let id = quote_uuid_option(parse_id(args.id.as_ref())?);
    let alias = quote_str_option(args.alias.as_ref());
    let name = quote_str_option(args.name.as_ref());
    let mandatory = args.mandatory.is_present();
    let sort_order = args
        .sort_order
        .map_or_else(|| quote!(None), |order| quote!(Some(#order)));
    let description = quote_str_option(args.description.as_ref());
    let group = quote_str_option(args.group.as_ref());
    let validation = quote_str_option(args.validation.as_ref());
    let editor = quote_str_option(args.editor.as_ref());
    let default = quote_str_option(args.default.as_deref());

    Ok(Some(quote! {
        ::typesync::schema::decl::MemberDecl {
            ident: #ident_str,
            value_type: <#ty as ::typesync::schema::decl::PropertyValue>::VALUE_TYPE,
            access: ::typesync::schema::types::Access::#access,
            scaffold: true,
            attr: ::typesync::schema::decl::PropertyAttr {
                id: #id,
                alias: #alias,
                name: #name,
                mandatory: #mandatory,
                sort_order: #sort_order,
                description: #description,
                group: #group,
                validation: #validation,
                editor: #editor,
                default: #default,
            },
        }
    }))
}

fn property_args(attrs: &[Attribute]) -> darling::Result<PropertyArgs> {
    let mut found = attrs.iter().filter(|attr| attr.path().is_ident("property"));

    let Some(first) = found.next() else {
        return Ok(PropertyArgs::default());
    };
    if let Some(extra) = found.next() {
        return Err(Error::custom("duplicate #[property] attribute").with_span(extra));
    }

    match &first.meta {
        Meta::Path(_) => Ok(PropertyArgs::default()),
        meta => PropertyArgs::from_meta(meta),
    }
}

fn parse_id(id: Option<&SpannedValue<String>>) -> darling::Result<Option<u128>> {
    id.map(|id| {
        Uuid::parse_str(id.trim())
            .map(|uuid| uuid.as_u128())
            .map_err(|err| Error::from(syn::Error::new(id.span(), format!("invalid id: {err}"))))
    })
    .transpose()
}
