use crate::{decl::TypeDecl, error::ModelError, types::Category};
use std::collections::HashMap;

///
/// TypeScanner
///
/// Supplies every declaring type known to the host, annotated or not. Plain
/// base types must be included so inheritance chains can be walked.
///

pub trait TypeScanner {
    fn discover(&self) -> Vec<&'static TypeDecl>;
}

///
/// StaticScanner
/// Scanner over an explicit list of declarations.
///

#[derive(Clone, Debug, Default)]
pub struct StaticScanner {
    decls: Vec<&'static TypeDecl>,
}

impl StaticScanner {
    #[must_use]
    pub fn new(decls: impl IntoIterator<Item = &'static TypeDecl>) -> Self {
        Self {
            decls: decls.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with(mut self, decl: &'static TypeDecl) -> Self {
        self.decls.push(decl);
        self
    }
}

impl TypeScanner for StaticScanner {
    fn discover(&self) -> Vec<&'static TypeDecl> {
        self.decls.clone()
    }
}

///
/// TypeRegistry
///
/// Path-indexed view over the scanned declarations. Declaration order is
/// kept; it drives model order and therefore every tie-break downstream.
///

#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    order: Vec<&'static TypeDecl>,
    by_path: HashMap<&'static str, &'static TypeDecl>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a scanner; later duplicates of a path are ignored.
    #[must_use]
    pub fn from_scanner(scanner: &dyn TypeScanner) -> Self {
        let mut registry = Self::new();
        for decl in scanner.discover() {
            registry.insert(decl);
        }

        registry
    }

    /// Register a declaration; returns `false` if the path was already known.
    pub fn insert(&mut self, decl: &'static TypeDecl) -> bool {
        if self.by_path.contains_key(decl.path) {
            return false;
        }
        self.by_path.insert(decl.path, decl);
        self.order.push(decl);

        true
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&'static TypeDecl> {
        self.by_path.get(path).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static TypeDecl> + '_ {
        self.order.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Declaring types annotated with the marker for `category`.
    pub fn model_types(&self, category: Category) -> impl Iterator<Item = &'static TypeDecl> + '_ {
        self.iter().filter(move |decl| decl.is_annotated_as(category))
    }

    /// Walk the base chain of `decl`, nearest ancestor first.
    pub fn ancestors(&self, decl: &TypeDecl) -> Result<Vec<&'static TypeDecl>, ModelError> {
        let mut out: Vec<&'static TypeDecl> = Vec::new();
        let mut next = decl.base;

        while let Some(path) = next {
            let base = self.get(path).ok_or_else(|| ModelError::UnknownBase {
                ty: decl.path.to_string(),
                base: path.to_string(),
            })?;

            // a cycle can only come from hand-built declarations
            if base.path == decl.path || out.iter().any(|seen| seen.path == base.path) {
                return Err(ModelError::InheritanceCycle {
                    ty: decl.path.to_string(),
                });
            }

            out.push(base);
            next = base.base;
        }

        Ok(out)
    }
}
