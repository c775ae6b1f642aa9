use derive_more::Display;
use std::fmt;
use thiserror::Error as ThisError;

///
/// ConflictKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ConflictKind {
    #[display("duplicate id")]
    DuplicateId,
    #[display("duplicate alias")]
    DuplicateAlias,
    #[display("duplicate property id")]
    DuplicatePropertyId,
    #[display("duplicate property alias")]
    DuplicatePropertyAlias,
}

///
/// DeclarationConflict
///
/// One duplicated id or alias. `names` are the conflicting declaring types,
/// or the conflicting members when `owner` names the model they live on.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeclarationConflict {
    pub kind: ConflictKind,
    pub key: String,
    pub owner: Option<String>,
    pub names: Vec<String>,
}

impl fmt::Display for DeclarationConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.key)?;
        if let Some(owner) = &self.owner {
            write!(f, " on '{owner}'")?;
        }
        write!(f, " declared by {}", self.names.join(", "))
    }
}

///
/// Conflicts
/// Collector for one validation pass.
///

#[derive(Debug, Default)]
pub struct Conflicts {
    conflicts: Vec<DeclarationConflict>,
}

impl Conflicts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, conflict: DeclarationConflict) {
        self.conflicts.push(conflict);
    }

    /// Record a conflict if more than one name claimed `key`.
    pub fn check(
        &mut self,
        kind: ConflictKind,
        key: String,
        owner: Option<&str>,
        names: Vec<&str>,
    ) {
        if names.len() > 1 {
            self.push(DeclarationConflict {
                kind,
                key,
                owner: owner.map(str::to_string),
                names: names.into_iter().map(str::to_string).collect(),
            });
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    pub fn merge(&mut self, other: Self) {
        self.conflicts.extend(other.conflicts);
    }

    pub fn result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                conflicts: self.conflicts,
            })
        }
    }
}

///
/// ValidationError
///

#[derive(Debug, ThisError)]
pub struct ValidationError {
    pub conflicts: Vec<DeclarationConflict>,
}

impl ValidationError {
    pub fn of_kind(&self, kind: ConflictKind) -> impl Iterator<Item = &DeclarationConflict> {
        self.conflicts.iter().filter(move |c| c.kind == kind)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} declaration conflict(s)", self.conflicts.len())?;
        for conflict in &self.conflicts {
            write!(f, "\n  - {conflict}")?;
        }

        Ok(())
    }
}
