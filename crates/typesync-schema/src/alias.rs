use convert_case::{Case, Casing};

/// Derive the default alias for a type or member ident (`PageTitle` -> `pageTitle`).
#[must_use]
pub fn derive_alias(ident: &str) -> String {
    ident.trim_start_matches("r#").to_case(Case::Camel)
}

/// Derive a display name for a member ident (`page_title` -> `Page Title`).
#[must_use]
pub fn derive_name(ident: &str) -> String {
    ident.trim_start_matches("r#").to_case(Case::Title)
}

/// Case-insensitive alias comparison, the only equality aliases have.
#[must_use]
pub fn alias_eq(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

/// Grouping key for case-insensitive alias uniqueness checks.
#[must_use]
pub fn alias_key(alias: &str) -> String {
    alias.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_are_camel_case() {
        assert_eq!(derive_alias("Page"), "page");
        assert_eq!(derive_alias("PageTitle"), "pageTitle");
        assert_eq!(derive_alias("meta_description"), "metaDescription");
        assert_eq!(derive_alias("r#type"), "type");
    }

    #[test]
    fn names_are_title_case() {
        assert_eq!(derive_name("title"), "Title");
        assert_eq!(derive_name("meta_description"), "Meta Description");
    }

    #[test]
    fn alias_equality_ignores_case() {
        assert!(alias_eq("baz", "BAZ"));
        assert!(alias_eq("pageTitle", "PAGETITLE"));
        assert!(!alias_eq("page", "pages"));
        assert_eq!(alias_key("Page"), alias_key("pAGE"));
    }
}
