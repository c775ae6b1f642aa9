use super::{Identified, PropertyTypeRecord, RuntimeId};
use serde::{Deserialize, Serialize};
use typesync_schema::alias::alias_eq;

///
/// ContentTypeRecord
///
/// Persisted content-bearing type (document, media or member type).
/// Properties live either in a named group or in the ungrouped list.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ContentTypeRecord {
    pub id: Option<RuntimeId>,
    pub alias: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub thumbnail: String,
    pub is_container: bool,
    pub allowed_as_root: bool,

    pub parent: Option<RuntimeId>,
    pub compositions: Vec<CompositionRef>,
    pub allowed_children: Vec<AllowedChild>,

    pub groups: Vec<PropertyGroup>,
    pub properties: Vec<PropertyTypeRecord>,
}

///
/// PropertyGroup
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PropertyGroup {
    pub name: String,
    pub sort_order: i32,
    pub properties: Vec<PropertyTypeRecord>,
}

///
/// CompositionRef
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CompositionRef {
    pub id: RuntimeId,
    pub alias: String,
}

///
/// AllowedChild
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AllowedChild {
    pub id: RuntimeId,
    pub alias: String,
    pub sort_order: i32,
}

impl ContentTypeRecord {
    /// Every property type, grouped ones first in group order.
    pub fn property_types(&self) -> impl Iterator<Item = &PropertyTypeRecord> {
        self.groups
            .iter()
            .flat_map(|g| g.properties.iter())
            .chain(self.properties.iter())
    }

    pub fn property_types_mut(&mut self) -> impl Iterator<Item = &mut PropertyTypeRecord> {
        self.groups
            .iter_mut()
            .flat_map(|g| g.properties.iter_mut())
            .chain(self.properties.iter_mut())
    }

    #[must_use]
    pub fn property(&self, alias: &str) -> Option<&PropertyTypeRecord> {
        self.property_types().find(|p| alias_eq(&p.alias, alias))
    }

    pub fn property_mut(&mut self, alias: &str) -> Option<&mut PropertyTypeRecord> {
        self.property_types_mut().find(|p| alias_eq(&p.alias, alias))
    }

    /// Group holding `alias`: `Some(None)` when ungrouped, `None` when absent.
    #[must_use]
    pub fn group_of(&self, alias: &str) -> Option<Option<&str>> {
        for group in &self.groups {
            if group.properties.iter().any(|p| alias_eq(&p.alias, alias)) {
                return Some(Some(group.name.as_str()));
            }
        }

        self.properties
            .iter()
            .any(|p| alias_eq(&p.alias, alias))
            .then_some(None)
    }

    #[must_use]
    pub fn group(&self, name: &str) -> Option<&PropertyGroup> {
        self.groups.iter().find(|g| g.name.eq_ignore_ascii_case(name))
    }

    /// Append a property to `group`, creating the group when needed.
    pub fn add_property(&mut self, group: Option<&str>, property: PropertyTypeRecord) {
        match group {
            None => self.properties.push(property),
            Some(name) => self.group_entry(name).properties.push(property),
        }
    }

    /// Remove and return the property with `alias`.
    pub fn remove_property(&mut self, alias: &str) -> Option<PropertyTypeRecord> {
        for group in &mut self.groups {
            if let Some(pos) = group.properties.iter().position(|p| alias_eq(&p.alias, alias)) {
                return Some(group.properties.remove(pos));
            }
        }

        let pos = self.properties.iter().position(|p| alias_eq(&p.alias, alias))?;
        Some(self.properties.remove(pos))
    }

    /// Move the property with `alias` to `group`; returns `false` if absent.
    pub fn move_property(&mut self, alias: &str, group: Option<&str>) -> bool {
        match self.remove_property(alias) {
            Some(property) => {
                self.add_property(group, property);
                true
            }
            None => false,
        }
    }

    fn group_entry(&mut self, name: &str) -> &mut PropertyGroup {
        let pos = match self.groups.iter().position(|g| g.name.eq_ignore_ascii_case(name)) {
            Some(pos) => pos,
            None => {
                let sort_order = i32::try_from(self.groups.len()).unwrap_or(i32::MAX);
                self.groups.push(PropertyGroup {
                    name: name.to_string(),
                    sort_order,
                    properties: Vec::new(),
                });
                self.groups.len() - 1
            }
        };

        &mut self.groups[pos]
    }
}

impl Identified for ContentTypeRecord {
    fn runtime_id(&self) -> Option<RuntimeId> {
        self.id
    }

    fn alias(&self) -> &str {
        &self.alias
    }
}
