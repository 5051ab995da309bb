//! Read-only cuisine id -> display name directory

use std::collections::HashMap;

const BUILTIN_CUISINES: &[(&str, &str)] = &[
    ("67ac7d222ee4b070bd485694", "Indian"),
    ("67ac7d292ee4b070bd485696", "Italian"),
    ("67ad9f22af8c34b3272d8cb2", "Continental"),
    ("67aeda63d3af1523c01ef462", "Chinese"),
    ("67dba24c024b2035f1d88ec0", "North Indian / Punjabi"),
    ("67dba279024b2035f1d88ec9", "Mughlai / North Indian"),
    ("67dba33c024b2035f1d88f32", "Maharashtrian / South India"),
    ("67dba444024b2035f1d88f95", "Asian / Chinese"),
    ("67dba51f024b2035f1d89005", "Japanese / Fusion"),
    ("67dba648024b2035f1d89134", "Continental / European"),
    ("67e6853b4fc3da47168b4845", "American"),
];

/// Built once at startup and shared behind an `Arc`; never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct CuisineDirectory {
    names: HashMap<String, String>,
}

impl CuisineDirectory {
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            names: entries.into_iter().collect(),
        }
    }

    /// Directory with the backend's known cuisine ids
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_CUISINES
                .iter()
                .map(|(id, name)| (id.to_string(), name.to_string())),
        )
    }

    pub fn name_for(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Display name for a known id, otherwise the key unchanged
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.name_for(key).unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
